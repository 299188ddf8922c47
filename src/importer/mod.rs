// ==========================================
// 代课公告系统 - 导入层
// ==========================================
// 职责: 外部文档 → 结构化行 → 原始记录
// 支持: JSON（字段名沿用导出源元素名）
// ==========================================

// 模块声明
pub mod document;
pub mod error;
pub mod field_parser;
pub mod loader;
pub mod record_reader;

// 重导出核心类型
pub use document::SubstitutionDocument;
pub use error::{ImportError, ImportResult};
pub use field_parser::FieldParser;
pub use loader::{load_document, DocumentSource, JsonFileSource};
pub use record_reader::RecordReader;
