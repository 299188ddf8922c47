// ==========================================
// 代课公告系统 - 导出层
// ==========================================
// 职责: 公告结果 → 文件（CSV）
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod naming;
pub mod sink;

pub use csv_exporter::CsvExporter;
pub use error::{ExportError, ExportResult};
pub use naming::{absences_prefix, cleanup_stale, export_prefix};
pub use sink::EntrySink;
