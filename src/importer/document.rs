// ==========================================
// 代课公告系统 - 文档输入模型
// ==========================================
// 职责: 已解析文档的结构化行（字段名沿用导出源元素名）
// 规则: 所有字段可缺失；数字/文本统一转为字符串
// ==========================================

use crate::domain::types::FlowKind;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Deserializer, Serialize};

/// 文本或数字单元格 → Option<String>
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Scalar::Text(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

// ==========================================
// 参照表行
// ==========================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherRow {
    #[serde(rename = "OSOBA_ID", deserialize_with = "text")]
    pub person_id: Option<String>,
    #[serde(rename = "Jmeno", deserialize_with = "text")]
    pub first_name: Option<String>,
    #[serde(rename = "Prijmeni", deserialize_with = "text")]
    pub last_name: Option<String>,
    #[serde(rename = "Zkratka", deserialize_with = "text")]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectRow {
    #[serde(rename = "REALIZACE_ID", deserialize_with = "text")]
    pub subject_id: Option<String>,
    #[serde(rename = "Zkratka", deserialize_with = "text")]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomRow {
    #[serde(rename = "MISTNOST_ID", deserialize_with = "text")]
    pub room_id: Option<String>,
    #[serde(rename = "Zkratka", deserialize_with = "text")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodRow {
    #[serde(rename = "OBDOBI_DNE_ID", deserialize_with = "text")]
    pub period_id: Option<String>,
    #[serde(rename = "Nazev", deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(rename = "HodinaOd", deserialize_with = "text")]
    pub hour_from: Option<String>,
    #[serde(rename = "HodinaDo", deserialize_with = "text")]
    pub hour_to: Option<String>,
}

/// 顶层班级（Trida）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassRow {
    #[serde(rename = "SKUPINA_ID", deserialize_with = "text")]
    pub group_id: Option<String>,
    #[serde(rename = "Nazev", deserialize_with = "text")]
    pub name: Option<String>,
}

/// 班级分组 / 选修组（TridaSkupinaSeminar）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupRow {
    #[serde(rename = "SKUPINA_ID", deserialize_with = "text")]
    pub group_id: Option<String>,
    #[serde(rename = "SKUPINA_ID_PARENT", deserialize_with = "text")]
    pub parent_id: Option<String>,
    #[serde(rename = "Nazev", deserialize_with = "text")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsenceReasonRow {
    #[serde(rename = "SUPL_DRUH_ABSENCE_ID", deserialize_with = "text")]
    pub reason_id: Option<String>,
    #[serde(rename = "Nazev", deserialize_with = "text")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarRow {
    #[serde(rename = "Datum", deserialize_with = "text")]
    pub date: Option<String>,
}

// ==========================================
// 事件关联行
// ==========================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventGroupRow {
    #[serde(rename = "UDALOST_ID", deserialize_with = "text")]
    pub event_id: Option<String>,
    #[serde(rename = "SKUPINA_ID", deserialize_with = "text")]
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRoomRow {
    #[serde(rename = "UDALOST_ID", deserialize_with = "text")]
    pub event_id: Option<String>,
    #[serde(rename = "MISTNOST_ID", deserialize_with = "text")]
    pub room_id: Option<String>,
}

/// 事件 → 人员（UdalostOsoba / AbsenceUcitele 共用）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPersonRow {
    #[serde(rename = "UDALOST_ID", deserialize_with = "text")]
    pub event_id: Option<String>,
    #[serde(rename = "OSOBA_ID", deserialize_with = "text")]
    pub person_id: Option<String>,
}

// ==========================================
// 代课 / 缺勤行
// ==========================================

/// 学生版代课行（VypisSuplovaniZaka）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentSubstitutionRow {
    #[serde(rename = "UDALOST_ID", deserialize_with = "text")]
    pub event_id: Option<String>,
    #[serde(rename = "OBDOBI_DNE_ID", deserialize_with = "text")]
    pub period_id: Option<String>,
    #[serde(rename = "REALIZACE_ID", deserialize_with = "text")]
    pub subject_id: Option<String>,
    #[serde(rename = "ZpusobReseni", deserialize_with = "text")]
    pub resolution: Option<String>,
    #[serde(rename = "Poznamka", deserialize_with = "text")]
    pub note: Option<String>,
    #[serde(rename = "CasOd", deserialize_with = "text")]
    pub time_from: Option<String>,
    #[serde(rename = "CasDo", deserialize_with = "text")]
    pub time_to: Option<String>,
}

/// 教师版代课行（VypisSuplovani）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherSubstitutionRow {
    #[serde(rename = "OSOBA_ID", deserialize_with = "text")]
    pub person_id: Option<String>,
    #[serde(rename = "UDALOST_ID", deserialize_with = "text")]
    pub event_id: Option<String>,
    #[serde(rename = "OBDOBI_DNE_ID", deserialize_with = "text")]
    pub period_id: Option<String>,
    #[serde(rename = "REALIZACE_ID", deserialize_with = "text")]
    pub subject_id: Option<String>,
    #[serde(rename = "ZpusobReseni", deserialize_with = "text")]
    pub resolution: Option<String>,
    #[serde(rename = "Poznamka", deserialize_with = "text")]
    pub note: Option<String>,
    #[serde(rename = "CasOd", deserialize_with = "text")]
    pub time_from: Option<String>,
    #[serde(rename = "CasDo", deserialize_with = "text")]
    pub time_to: Option<String>,
}

/// 缺勤窗口（AbsenceZdrojeVeDni）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsenceWindowRow {
    #[serde(rename = "UDALOST_ID", deserialize_with = "text")]
    pub event_id: Option<String>,
    #[serde(rename = "SUPL_DRUH_ABSENCE_ID", deserialize_with = "text")]
    pub reason_id: Option<String>,
    #[serde(rename = "Od", deserialize_with = "text")]
    pub from: Option<String>,
    #[serde(rename = "Do", deserialize_with = "text")]
    pub to: Option<String>,
}

// ==========================================
// SubstitutionDocument - 单日代课文档
// ==========================================
// 两套关联表结构：学生版 / 教师版，语义相同，元素名不同
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionDocument {
    #[serde(rename = "Kalendar")]
    pub calendar: Option<CalendarRow>,

    // ===== 参照表 =====
    #[serde(rename = "Ucitel")]
    pub teachers: Vec<TeacherRow>,
    #[serde(rename = "Ucitel2")]
    pub teachers_secondary: Vec<TeacherRow>,
    #[serde(rename = "Predmet")]
    pub subjects: Vec<SubjectRow>,
    #[serde(rename = "Mistnost")]
    pub rooms: Vec<RoomRow>,
    #[serde(rename = "VyucovaciHodinaOd")]
    pub periods: Vec<PeriodRow>,
    #[serde(rename = "Trida")]
    pub classes: Vec<ClassRow>,
    #[serde(rename = "TridaSkupinaSeminar")]
    pub groups: Vec<GroupRow>,
    #[serde(rename = "SuplovaniDruhAbsence")]
    pub absence_reasons: Vec<AbsenceReasonRow>,

    // ===== 学生版关联表 =====
    #[serde(rename = "UdalostStudijniSkupina")]
    pub student_event_groups: Vec<EventGroupRow>,
    #[serde(rename = "UdalostMistnost")]
    pub student_event_rooms: Vec<EventRoomRow>,
    #[serde(rename = "UdalostOsoba")]
    pub student_event_persons: Vec<EventPersonRow>,

    // ===== 教师版关联表 =====
    #[serde(rename = "UdalostStudijniSkupiny")]
    pub teacher_event_groups: Vec<EventGroupRow>,
    #[serde(rename = "KalendarovaUdalostMistnost")]
    pub teacher_event_rooms: Vec<EventRoomRow>,

    // ===== 缺勤 =====
    #[serde(rename = "AbsenceZdrojeVeDni")]
    pub absence_windows: Vec<AbsenceWindowRow>,
    #[serde(rename = "AbsenceUcitele")]
    pub absence_teachers: Vec<EventPersonRow>,

    // ===== 代课记录（顶层记录类型，决定流向）=====
    #[serde(rename = "VypisSuplovaniZaka")]
    pub student_substitutions: Vec<StudentSubstitutionRow>,
    #[serde(rename = "VypisSuplovani")]
    pub teacher_substitutions: Vec<TeacherSubstitutionRow>,
}

impl SubstitutionDocument {
    /// 根据顶层记录类型判定流向
    ///
    /// # 规则
    /// 1. 存在 VypisSuplovaniZaka → 学生版
    /// 2. 存在 VypisSuplovani → 教师版
    /// 3. 都不存在 → MalformedDocument
    pub fn detect_flow(&self) -> ImportResult<FlowKind> {
        if !self.student_substitutions.is_empty() {
            Ok(FlowKind::Students)
        } else if !self.teacher_substitutions.is_empty() {
            Ok(FlowKind::Teachers)
        } else {
            Err(ImportError::MalformedDocument(
                "缺少 VypisSuplovaniZaka / VypisSuplovani 记录".to_string(),
            ))
        }
    }

    /// 全部教师行（Ucitel + Ucitel2）
    pub fn all_teachers(&self) -> impl Iterator<Item = &TeacherRow> {
        self.teachers.iter().chain(self.teachers_secondary.iter())
    }
}
