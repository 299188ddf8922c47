// ==========================================
// 代课公告系统 - 记录解析器
// ==========================================
// 职责: RawRecord + 参照表 + 事件索引 → ResolvedEntry / TeacherEntry
// 规则: 参照缺失替换为空字符串并记 warn，不丢弃记录
// 规则: 多教室拼接时跳过未知教室（不留空位）
// 规则: 课时无法定位时返回 UnresolvedPeriod，由过滤阶段丢弃
// 红线: 纯函数，无副作用（日志除外）
// ==========================================

use crate::domain::entry::{join_non_empty, RawRecord, ResolvedEntry, TeacherEntry, TeacherName};
use crate::domain::reference::EventAssociation;
use crate::domain::types::PeriodSpan;
use crate::engine::error::{ResolutionError, ResolutionResult};
use crate::engine::event_index::EventIndex;
use crate::engine::period_calculator::PeriodCalculator;
use crate::engine::reference_tables::{ClassPlacement, ReferenceTables};
use tracing::warn;

pub struct RecordResolver<'a> {
    tables: &'a ReferenceTables,
    events: &'a EventIndex,
    periods: PeriodCalculator<'a>,
}

impl<'a> RecordResolver<'a> {
    pub fn new(tables: &'a ReferenceTables, events: &'a EventIndex, periods: PeriodCalculator<'a>) -> Self {
        Self {
            tables,
            events,
            periods,
        }
    }

    /// 学生版: 解析一条代课行
    ///
    /// # 步骤
    /// 1. 事件 → 分组 → (班级, 分组)
    /// 2. 课时（显式时间优先）
    /// 3. 科目 / 教室 / 教师
    pub fn resolve_student(&self, record: &RawRecord) -> ResolutionResult<ResolvedEntry> {
        let event = self.event(record);
        let placement = self.placement(&record.event_id, event);
        let period = self.period(record)?;

        let teachers = event
            .map(|e| e.teacher_ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| match self.tables.teacher(id) {
                Ok(teacher) => Some(TeacherName {
                    name: teacher.name.clone(),
                    abbreviation: teacher.abbreviation.clone(),
                }),
                Err(e) => {
                    log_unresolved(record, &e);
                    None
                }
            })
            .collect();

        Ok(ResolvedEntry {
            class_name: placement.class_name,
            group_name: placement.group_name,
            period,
            subject: self.subject(record),
            room: self.rooms(record, event),
            teachers,
            resolution: record.resolution.trim().to_string(),
            note: record.note.trim().to_string(),
        })
    }

    /// 教师版: 解析一条代课行（教师 ID 在行上）
    pub fn resolve_teacher(&self, record: &RawRecord) -> ResolutionResult<TeacherEntry> {
        let event = self.event(record);
        let placement = self.placement(&record.event_id, event);
        let period = self.period(record)?;

        let teacher = match record.teacher_id.as_deref() {
            Some(id) => match self.tables.teacher(id) {
                Ok(t) => TeacherName {
                    name: t.name.clone(),
                    abbreviation: t.abbreviation.clone(),
                },
                Err(e) => {
                    log_unresolved(record, &e);
                    TeacherName::default()
                }
            },
            None => TeacherName::default(),
        };

        Ok(TeacherEntry {
            teacher,
            subject: self.subject(record),
            period,
            room: self.rooms(record, event),
            class_label: placement.label(),
            resolution: record.resolution.trim().to_string(),
            note: record.note.trim().to_string(),
        })
    }

    fn event(&self, record: &RawRecord) -> Option<&'a EventAssociation> {
        match self.events.get(&record.event_id) {
            Ok(event) => Some(event),
            Err(e) => {
                log_unresolved(record, &e);
                None
            }
        }
    }

    fn placement(&self, event_id: &str, event: Option<&EventAssociation>) -> ClassPlacement {
        let group_id = match event.and_then(|e| e.group_id.as_deref()) {
            Some(id) => id,
            None => return ClassPlacement::default(),
        };

        match self.tables.classes().resolve(group_id) {
            Ok(placement) => placement,
            Err(e) => {
                warn!(event_id = %event_id, error = %e, "分组无法解析，班级置空");
                ClassPlacement::default()
            }
        }
    }

    fn period(&self, record: &RawRecord) -> ResolutionResult<PeriodSpan> {
        self.periods.resolve(
            &record.event_id,
            record.period_id.as_deref(),
            record.time_from,
            record.time_to,
        )
    }

    fn subject(&self, record: &RawRecord) -> String {
        match record.subject_id.as_deref() {
            Some(id) => match self.tables.subject(id) {
                Ok(subject) => subject.abbreviation.clone(),
                Err(e) => {
                    log_unresolved(record, &e);
                    String::new()
                }
            },
            None => String::new(),
        }
    }

    /// 教室逐个解析，按关联顺序以 ", " 拼接
    fn rooms(&self, record: &RawRecord, event: Option<&EventAssociation>) -> String {
        let codes: Vec<String> = event
            .map(|e| e.room_ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|id| match self.tables.room(id) {
                Ok(room) => room.code.clone(),
                Err(e) => {
                    log_unresolved(record, &e);
                    String::new()
                }
            })
            .collect();

        join_non_empty(codes.iter().map(String::as_str))
    }
}

fn log_unresolved(record: &RawRecord, error: &ResolutionError) {
    if let ResolutionError::UnresolvedReference { table, id } = error {
        warn!(
            row = record.row_number,
            event_id = %record.event_id,
            table = *table,
            id = %id,
            "参照缺失，替换为空值"
        );
    }
}
