// ==========================================
// 代课公告系统 - 文档加载器
// ==========================================
// 职责: 从磁盘读取 JSON 文档 → SubstitutionDocument
// 支持: .json
// ==========================================

use crate::importer::document::SubstitutionDocument;
use crate::importer::error::{ImportError, ImportResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

// ==========================================
// DocumentSource Trait
// ==========================================
// 用途: 编排器通过该接口获取已解析文档
pub trait DocumentSource {
    fn load(&self, path: &Path) -> ImportResult<SubstitutionDocument>;
}

// ==========================================
// JSON 文件加载实现
// ==========================================
pub struct JsonFileSource;

impl DocumentSource for JsonFileSource {
    fn load(&self, path: &Path) -> ImportResult<SubstitutionDocument> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if ext != "json" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let document: SubstitutionDocument = serde_json::from_reader(BufReader::new(file))?;

        debug!(
            path = %path.display(),
            student_rows = document.student_substitutions.len(),
            teacher_rows = document.teacher_substitutions.len(),
            absence_rows = document.absence_windows.len(),
            "文档加载完成"
        );
        Ok(document)
    }
}

/// 读取单个 JSON 文档
pub fn load_document<P: AsRef<Path>>(path: P) -> ImportResult<SubstitutionDocument> {
    JsonFileSource.load(path.as_ref())
}
