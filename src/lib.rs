// ==========================================
// 代课公告系统 - 核心库
// ==========================================
// 输入: 排课系统导出的单日代课文档（ID 关联的扁平记录集）
// 输出: 已解析、已过滤、已合并、已排序的代课条目与缺勤条目
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值类型
pub mod domain;

// 导入层 - 文档输入
pub mod importer;

// 引擎层 - 解析/过滤/合并
pub mod engine;

// 配置层
pub mod config;

// 导出层 - CSV
pub mod export;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    AbsenceEntry, BoardEntry, FlowKind, PeriodSpan, RawAbsence, RawRecord, ResolvedEntry,
    TeacherEntry, TeacherName,
};

pub use config::{BoardConfig, BoardConfigReader, ConfigError, ConfigManager};

pub use engine::{BoardOrchestrator, BoardResult, ResolutionError};

pub use importer::{load_document, ImportError, ImportResult, SubstitutionDocument};

pub use export::{CsvExporter, EntrySink, ExportError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "suplovani";
