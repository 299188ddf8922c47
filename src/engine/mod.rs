// ==========================================
// 代课公告系统 - 引擎层
// ==========================================
// 职责: 参照解析、课时计算、过滤、合并、缺勤收集
// 红线: 引擎不读写文件，行级错误一律本地吸收
// ==========================================

pub mod absence_collector;
pub mod error;
pub mod event_index;
pub mod filter_stage;
pub mod merge_stage;
pub mod orchestrator;
pub mod ordering;
pub mod period_calculator;
pub mod record_resolver;
pub mod reference_tables;

// 重导出核心引擎
pub use absence_collector::{AbsenceCollector, UNKNOWN_REASON, UNKNOWN_TEACHER};
pub use error::{ResolutionError, ResolutionResult};
pub use event_index::EventIndex;
pub use filter_stage::FilterStage;
pub use merge_stage::MergeStage;
pub use orchestrator::{BoardOrchestrator, BoardResult};
pub use ordering::{group_by_class, group_by_teacher, sort_entries, sort_teacher_entries};
pub use period_calculator::{BellSchedule, PeriodCalculator, WHOLE_DAY_LABEL};
pub use record_resolver::RecordResolver;
pub use reference_tables::{ClassHierarchy, ClassPlacement, ReferenceTables};
