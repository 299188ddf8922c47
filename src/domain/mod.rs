// ==========================================
// 代课公告系统 - 领域模型层
// ==========================================
// 职责: 定义参照数据、原始记录、解析后条目
// 红线: 不含解析逻辑,不含引擎逻辑
// ==========================================

pub mod entry;
pub mod reference;
pub mod types;

// 重导出核心类型
pub use entry::{
    AbsenceEntry, BoardEntry, RawAbsence, RawRecord, ResolvedEntry, TeacherEntry, TeacherName,
};
pub use reference::{
    AbsenceReasonRef, ClassGroupRef, EventAssociation, PeriodRef, RoomRef, SubjectRef, TeacherRef,
};
pub use types::{FlowKind, PeriodSpan};
