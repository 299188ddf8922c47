// ==========================================
// 代课公告系统 - 代课记录模型
// ==========================================
// 职责: 原始记录 → 解析后条目 / 缺勤条目
// 红线: 输出字段不允许为 null，缺失一律为空字符串
// ==========================================

use crate::domain::types::PeriodSpan;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

// ==========================================
// RawRecord - 原始代课行
// ==========================================
// 用途: 导入层写入一次，解析器只读
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub event_id: String,
    pub period_id: Option<String>,
    pub subject_id: Option<String>,
    pub teacher_id: Option<String>, // 仅教师版：行上直接携带教师
    pub resolution: String,
    pub note: String,
    pub time_from: Option<NaiveTime>, // 显式授课起止时间（CasOd/CasDo）
    pub time_to: Option<NaiveTime>,
    pub row_number: usize,
}

// ==========================================
// RawAbsence - 原始缺勤窗口
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAbsence {
    pub event_id: String,
    pub reason_id: Option<String>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub row_number: usize,
}

// ==========================================
// TeacherName - 教师显示信息
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherName {
    pub name: String,
    pub abbreviation: String,
}

// ==========================================
// BoardEntry - 过滤/排序共用接口
// ==========================================
pub trait BoardEntry: Clone {
    fn period(&self) -> &PeriodSpan;

    /// 替换课时区间（截止裁剪用）
    fn with_period(&self, period: PeriodSpan) -> Self;

    /// 参与班级过滤的班级名
    fn class_key(&self) -> Option<&str>;
}

// ==========================================
// ResolvedEntry - 学生版代课条目
// ==========================================
// group_name 为空 = 全班
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    pub class_name: String,
    pub group_name: String,
    pub period: PeriodSpan,
    pub subject: String,
    pub room: String,
    pub teachers: Vec<TeacherName>,
    pub resolution: String,
    pub note: String,
}

impl ResolvedEntry {
    pub fn is_whole_class(&self) -> bool {
        self.group_name.trim().is_empty()
    }

    pub fn is_cancellation(&self, marker: &str) -> bool {
        self.resolution.trim() == marker
    }

    /// 全班停课：空分组 + 停课标记
    pub fn is_general_cancellation(&self, marker: &str) -> bool {
        self.is_whole_class() && self.is_cancellation(marker)
    }

    /// 教师全名（逗号分隔，跳过空名）
    pub fn teacher_names(&self) -> String {
        join_non_empty(self.teachers.iter().map(|t| t.name.as_str()))
    }

    /// 教师缩写（逗号分隔，跳过空缩写）
    pub fn teacher_abbreviations(&self) -> String {
        join_non_empty(self.teachers.iter().map(|t| t.abbreviation.as_str()))
    }

    /// 仅改写备注，其余字段保持不变
    pub fn with_note(&self, note: String) -> Self {
        Self {
            note,
            ..self.clone()
        }
    }
}

impl BoardEntry for ResolvedEntry {
    fn period(&self) -> &PeriodSpan {
        &self.period
    }

    fn with_period(&self, period: PeriodSpan) -> Self {
        Self {
            period,
            ..self.clone()
        }
    }

    fn class_key(&self) -> Option<&str> {
        Some(&self.class_name)
    }
}

// ==========================================
// TeacherEntry - 教师版代课条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherEntry {
    pub teacher: TeacherName,
    pub subject: String,
    pub period: PeriodSpan,
    pub room: String,
    pub class_label: String, // "3A" 或 "3A (sem1)"
    pub resolution: String,
    pub note: String,
}

impl BoardEntry for TeacherEntry {
    fn period(&self) -> &PeriodSpan {
        &self.period
    }

    fn with_period(&self, period: PeriodSpan) -> Self {
        Self {
            period,
            ..self.clone()
        }
    }

    // 班级过滤只作用于学生版
    fn class_key(&self) -> Option<&str> {
        None
    }
}

// ==========================================
// AbsenceEntry - 缺勤条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceEntry {
    pub teacher: String,
    pub abbreviation: String,
    pub reason: String,
    pub from: String,         // HH:MM
    pub to: String,           // HH:MM
    pub periods: Option<PeriodSpan>,
    pub period_label: String, // "5" / "2-4" / "celý den" / ""
}

pub(crate) fn join_non_empty<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
