// ==========================================
// 代课公告系统 - 导出文件命名
// ==========================================
// 学生版: supl_<yy-mm-dd>_<po|ut|st|ct|pa|so|ne>
// 教师版: suplovani_<yyyy_mm_dd>（缺勤: absences_<yyyy_mm_dd>）
// ==========================================

use crate::domain::types::FlowKind;
use crate::export::error::ExportResult;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 星期缩写（周一起）
const DAY_ABBREVIATIONS: [&str; 7] = ["po", "ut", "st", "ct", "pa", "so", "ne"];

/// 导出文件名前缀
pub fn export_prefix(flow: FlowKind, date: NaiveDate) -> String {
    match flow {
        FlowKind::Students => {
            let day = DAY_ABBREVIATIONS[date.weekday().num_days_from_monday() as usize];
            format!("supl_{}_{}", date.format("%y-%m-%d"), day)
        }
        FlowKind::Teachers => format!("suplovani_{}", date.format("%Y_%m_%d")),
    }
}

/// 教师版缺勤文件前缀
pub fn absences_prefix(date: NaiveDate) -> String {
    format!("absences_{}", date.format("%Y_%m_%d"))
}

/// 删除同前缀同扩展名的旧文件
///
/// # 返回
/// 被删除的文件列表；单个文件删除失败只记 warn
pub fn cleanup_stale(folder: &Path, prefix: &str, extension: &str) -> ExportResult<Vec<PathBuf>> {
    let mut removed = Vec::new();
    if !folder.exists() {
        return Ok(removed);
    }

    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        let matches_ext = path.extension().and_then(|e| e.to_str()) == Some(extension);
        if !name.starts_with(prefix) || !matches_ext {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "已删除旧导出文件");
                removed.push(path);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "旧导出文件删除失败"),
        }
    }

    Ok(removed)
}
