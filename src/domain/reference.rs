// ==========================================
// 代课公告系统 - 参照数据模型
// ==========================================
// 职责: 教师 / 科目 / 教室 / 班级分组 / 课时 / 事件关联
// 生命周期: 每份文档构建一次，之后只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// TeacherRef - 教职工
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRef {
    pub id: String,
    pub name: String,         // 显示全名（学生版: 名 姓；教师版: 姓 名）
    pub abbreviation: String, // 缩写（如 KOP）
}

// ==========================================
// SubjectRef - 科目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    pub id: String,
    pub abbreviation: String,
}

// ==========================================
// RoomRef - 教室
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    pub id: String,
    pub code: String,
}

// ==========================================
// ClassGroupRef - 班级 / 分组
// ==========================================
// parent_id 为 None 表示顶层班级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroupRef {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

impl ClassGroupRef {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

// ==========================================
// PeriodRef - 课时
// ==========================================
// start_hour / end_hour 为课时序号（非钟点），可能跨多节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRef {
    pub id: String,
    pub label: String,
    pub start_hour: Option<u8>,
    pub end_hour: Option<u8>,
}

// ==========================================
// AbsenceReasonRef - 缺勤原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceReasonRef {
    pub id: String,
    pub name: String,
}

// ==========================================
// EventAssociation - 事件关联
// ==========================================
// room_ids / teacher_ids 保持关联表中的原始顺序，允许重复
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAssociation {
    pub event_id: String,
    pub group_id: Option<String>,
    pub room_ids: Vec<String>,
    pub teacher_ids: Vec<String>,
}

impl EventAssociation {
    pub fn new(event_id: &str) -> Self {
        Self {
            event_id: event_id.to_string(),
            ..Default::default()
        }
    }
}
