// ==========================================
// 代课公告系统 - 原始记录读取
// ==========================================
// 职责: 文档行 → RawRecord / RawAbsence
// 规则: 时间字段格式错误只记 warn 并视为缺失，不中断整份文档
// ==========================================

use crate::domain::entry::{RawAbsence, RawRecord};
use crate::domain::types::FlowKind;
use crate::importer::document::SubstitutionDocument;
use crate::importer::field_parser::FieldParser;
use chrono::NaiveTime;
use tracing::{debug, warn};

pub struct RecordReader {
    parser: FieldParser,
}

impl Default for RecordReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordReader {
    pub fn new() -> Self {
        Self { parser: FieldParser }
    }

    /// 读取代课行（按流向选择 VypisSuplovaniZaka / VypisSuplovani）
    ///
    /// # 返回
    /// 按文档顺序排列的原始记录，row_number 从 1 开始
    pub fn read_substitutions(&self, document: &SubstitutionDocument, flow: FlowKind) -> Vec<RawRecord> {
        let records: Vec<RawRecord> = match flow {
            FlowKind::Students => document
                .student_substitutions
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    let row_number = idx + 1;
                    RawRecord {
                        event_id: self.parser.clean_text(row.event_id.as_ref()),
                        period_id: self.parser.normalize_null(row.period_id.as_ref()),
                        subject_id: self.parser.normalize_null(row.subject_id.as_ref()),
                        teacher_id: None,
                        resolution: self.parser.clean_text(row.resolution.as_ref()),
                        note: self.parser.clean_text(row.note.as_ref()),
                        time_from: self.time_or_none(row.time_from.as_ref(), "CasOd", row_number),
                        time_to: self.time_or_none(row.time_to.as_ref(), "CasDo", row_number),
                        row_number,
                    }
                })
                .collect(),
            FlowKind::Teachers => document
                .teacher_substitutions
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    let row_number = idx + 1;
                    RawRecord {
                        event_id: self.parser.clean_text(row.event_id.as_ref()),
                        period_id: self.parser.normalize_null(row.period_id.as_ref()),
                        subject_id: self.parser.normalize_null(row.subject_id.as_ref()),
                        teacher_id: self.parser.normalize_null(row.person_id.as_ref()),
                        resolution: self.parser.clean_text(row.resolution.as_ref()),
                        note: self.parser.clean_text(row.note.as_ref()),
                        time_from: self.time_or_none(row.time_from.as_ref(), "CasOd", row_number),
                        time_to: self.time_or_none(row.time_to.as_ref(), "CasDo", row_number),
                        row_number,
                    }
                })
                .collect(),
        };

        debug!(flow = %flow, rows = records.len(), "代课行读取完成");
        records
    }

    /// 读取缺勤窗口（AbsenceZdrojeVeDni）
    pub fn read_absences(&self, document: &SubstitutionDocument) -> Vec<RawAbsence> {
        document
            .absence_windows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let row_number = idx + 1;
                RawAbsence {
                    event_id: self.parser.clean_text(row.event_id.as_ref()),
                    reason_id: self.parser.normalize_null(row.reason_id.as_ref()),
                    time_from: self.time_or_none(row.from.as_ref(), "Od", row_number),
                    time_to: self.time_or_none(row.to.as_ref(), "Do", row_number),
                    row_number,
                }
            })
            .collect()
    }

    fn time_or_none(&self, value: Option<&String>, field: &str, row_number: usize) -> Option<NaiveTime> {
        match self.parser.parse_time(value, field, row_number) {
            Ok(time) => time,
            Err(e) => {
                warn!(row = row_number, field = field, error = %e, "时间字段无法解析，按缺失处理");
                None
            }
        }
    }
}
