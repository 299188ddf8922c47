// ==========================================
// 代课公告系统 - CSV 导出
// ==========================================
// 学生版: 合并前列表 → <prefix>.csv
// 教师版: 代课列表 → <prefix>.csv，缺勤列表 → absences_<date>.csv
// 格式: 分号分隔，首行表头
// ==========================================

use crate::domain::entry::{AbsenceEntry, ResolvedEntry, TeacherEntry};
use crate::domain::types::FlowKind;
use crate::engine::orchestrator::BoardResult;
use crate::export::error::ExportResult;
use crate::export::naming::{absences_prefix, cleanup_stale, export_prefix};
use crate::export::sink::EntrySink;
use chrono::NaiveDate;
use csv::WriterBuilder;
use std::path::{Path, PathBuf};
use tracing::info;

const STUDENT_HEADER: &[&str] = &[
    "Class",
    "Period",
    "Subject",
    "Group",
    "Room",
    "Teacher",
    "Teacher_Abbreviation",
    "Resolution",
    "Note",
];

const TEACHER_HEADER: &[&str] = &[
    "Teacher",
    "Teacher_Abbreviation",
    "Subject",
    "Period",
    "Room",
    "Class",
    "Resolution",
    "Note",
];

const ABSENCE_HEADER: &[&str] = &["Teacher", "Reason", "From", "To", "Periods"];

const EXTENSION: &str = "csv";

pub struct CsvExporter {
    folder: PathBuf,
}

impl CsvExporter {
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
        }
    }

    fn write_rows<I>(&self, path: &Path, header: &[&str], rows: I) -> ExportResult<()>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut writer = WriterBuilder::new().delimiter(b';').from_path(path)?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_students(&self, entries: &[ResolvedEntry], prefix: &str) -> ExportResult<PathBuf> {
        let path = self.folder.join(format!("{}.{}", prefix, EXTENSION));
        let rows = entries.iter().map(|e| {
            vec![
                e.class_name.clone(),
                e.period.to_string(),
                e.subject.clone(),
                e.group_name.clone(),
                e.room.clone(),
                e.teacher_names(),
                e.teacher_abbreviations(),
                e.resolution.clone(),
                e.note.clone(),
            ]
        });
        self.write_rows(&path, STUDENT_HEADER, rows)?;
        Ok(path)
    }

    fn write_teachers(&self, entries: &[TeacherEntry], prefix: &str) -> ExportResult<PathBuf> {
        let path = self.folder.join(format!("{}.{}", prefix, EXTENSION));
        let rows = entries.iter().map(|e| {
            vec![
                e.teacher.name.clone(),
                e.teacher.abbreviation.clone(),
                e.subject.clone(),
                e.period.to_string(),
                e.room.clone(),
                e.class_label.clone(),
                e.resolution.clone(),
                e.note.clone(),
            ]
        });
        self.write_rows(&path, TEACHER_HEADER, rows)?;
        Ok(path)
    }

    fn write_absences(&self, absences: &[AbsenceEntry], prefix: &str) -> ExportResult<PathBuf> {
        let path = self.folder.join(format!("{}.{}", prefix, EXTENSION));
        let rows = absences.iter().map(|a| {
            vec![
                a.teacher.clone(),
                a.reason.clone(),
                a.from.clone(),
                a.to.clone(),
                a.period_label.clone(),
            ]
        });
        self.write_rows(&path, ABSENCE_HEADER, rows)?;
        Ok(path)
    }
}

impl EntrySink for CsvExporter {
    fn write(&self, result: &BoardResult, date: NaiveDate) -> ExportResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.folder)?;
        let prefix = export_prefix(result.flow, date);
        cleanup_stale(&self.folder, &prefix, EXTENSION)?;

        let written = match result.flow {
            FlowKind::Students => vec![self.write_students(&result.unmerged, &prefix)?],
            FlowKind::Teachers => {
                let absences = absences_prefix(date);
                cleanup_stale(&self.folder, &absences, EXTENSION)?;
                vec![
                    self.write_teachers(&result.teacher_entries, &prefix)?,
                    self.write_absences(&result.absences, &absences)?,
                ]
            }
        };

        info!(flow = %result.flow, files = written.len(), "CSV 导出完成");
        Ok(written)
    }
}
