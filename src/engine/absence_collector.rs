// ==========================================
// 代课公告系统 - 缺勤收集器
// ==========================================
// 职责: 缺勤窗口 + 事件教师 → AbsenceEntry
// 规则: 排除名单内的人员缩写不输出；每位教师独立，无合并
// ==========================================

use crate::domain::entry::{AbsenceEntry, RawAbsence};
use crate::engine::event_index::EventIndex;
use crate::engine::period_calculator::PeriodCalculator;
use crate::engine::reference_tables::ReferenceTables;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const UNKNOWN_REASON: &str = "Neznámý důvod";
pub const UNKNOWN_TEACHER: &str = "Neznámý učitel";

pub struct AbsenceCollector<'a> {
    tables: &'a ReferenceTables,
    events: &'a EventIndex,
    periods: PeriodCalculator<'a>,
    excluded_staff: HashSet<String>,
}

impl<'a> AbsenceCollector<'a> {
    pub fn new(
        tables: &'a ReferenceTables,
        events: &'a EventIndex,
        periods: PeriodCalculator<'a>,
        excluded_staff: HashSet<String>,
    ) -> Self {
        Self {
            tables,
            events,
            periods,
            excluded_staff: excluded_staff
                .into_iter()
                .map(|s| s.trim().to_uppercase())
                .collect(),
        }
    }

    /// 收集全部缺勤条目（保持文档顺序）
    pub fn collect(&self, absences: &[RawAbsence]) -> Vec<AbsenceEntry> {
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for absence in absences {
            let reason = match absence.reason_id.as_deref() {
                Some(id) => self
                    .tables
                    .absence_reason(id)
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|_| UNKNOWN_REASON.to_string()),
                None => UNKNOWN_REASON.to_string(),
            };

            let teacher_ids = self.events.absence_teacher_ids(&absence.event_id);
            if teacher_ids.is_empty() {
                warn!(
                    row = absence.row_number,
                    event_id = %absence.event_id,
                    "缺勤事件无教师，跳过"
                );
                continue;
            }

            for teacher_id in teacher_ids {
                let (name, abbreviation) = match self.tables.teacher(teacher_id) {
                    Ok(t) => (t.name.clone(), t.abbreviation.clone()),
                    Err(e) => {
                        warn!(row = absence.row_number, error = %e, "缺勤教师未知");
                        (UNKNOWN_TEACHER.to_string(), String::new())
                    }
                };

                if self.excluded_staff.contains(&abbreviation.trim().to_uppercase()) {
                    skipped += 1;
                    continue;
                }

                entries.push(self.entry(absence, name, abbreviation, &reason));
            }
        }

        debug!(entries = entries.len(), excluded = skipped, "缺勤收集完成");
        entries
    }

    fn entry(&self, absence: &RawAbsence, teacher: String, abbreviation: String, reason: &str) -> AbsenceEntry {
        let (periods, period_label) = match (absence.time_from, absence.time_to) {
            (Some(from), Some(to)) => self.periods.absence_window(from, to),
            _ => (None, String::new()),
        };

        AbsenceEntry {
            teacher,
            abbreviation,
            reason: reason.to_string(),
            from: absence
                .time_from
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            to: absence
                .time_to
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            periods,
            period_label,
        }
    }
}
