// ==========================================
// 代课公告系统 - 配置层
// ==========================================
// 职责: 班级过滤、当日截止、铃声表、缺勤排除名单等配置
// 存储: JSON 配置文件
// ==========================================

pub mod board_config;
pub mod config_manager;
pub mod config_reader;
pub mod error;

// 重导出核心配置类型
pub use board_config::{default_bell_schedule, BellPeriod, BoardConfig, ConfigFile};
pub use config_manager::{ConfigManager, CONFIG_ENV_VAR, DEFAULT_CACHE_TTL_SECS};
pub use config_reader::BoardConfigReader;
pub use error::{ConfigError, ConfigResult};
