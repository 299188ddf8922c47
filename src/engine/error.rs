// ==========================================
// 代课公告系统 - 解析错误类型
// ==========================================
// 规则: 行级错误一律在本地吸收（占位值 + warn 日志）
// ==========================================

use thiserror::Error;

/// 记录解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// 参照表中找不到该 ID（非致命，替换为空占位值）
    #[error("参照缺失 (表 {table}): id={id}")]
    UnresolvedReference { table: &'static str, id: String },

    /// 课时 ID 与显式时间均无法定位课时（调用方丢弃该记录）
    #[error("无法定位课时 (事件 {event_id}): period_id={period_id:?}, from={from:?}, to={to:?}")]
    UnresolvedPeriod {
        event_id: String,
        period_id: Option<String>,
        from: Option<String>,
        to: Option<String>,
    },
}

impl ResolutionError {
    pub fn unresolved(table: &'static str, id: &str) -> Self {
        ResolutionError::UnresolvedReference {
            table,
            id: id.to_string(),
        }
    }
}

/// Result 类型别名
pub type ResolutionResult<T> = Result<T, ResolutionError>;
