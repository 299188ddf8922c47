// ==========================================
// 代课公告系统 - 配置管理器
// ==========================================
// 职责: 配置文件加载、缓存、写回
// 存储: JSON 文件 {"settings": {...}}
// 规则: 缓存 TTL 内不重复读盘；文件缺失时使用默认配置
// ==========================================

use crate::config::board_config::{BoardConfig, ConfigFile};
use crate::config::config_reader::BoardConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 配置路径环境变量
pub const CONFIG_ENV_VAR: &str = "SUPL_CONFIG";

/// 默认缓存 TTL（秒）
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5;

struct CachedConfig {
    loaded_at: Instant,
    config: BoardConfig,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: PathBuf,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedConfig>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_ttl(path, Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }

    pub fn with_ttl<P: AsRef<Path>>(path: P, cache_ttl: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache_ttl,
            cache: Mutex::new(None),
        }
    }

    /// 按优先级解析配置路径
    ///
    /// # 优先级
    /// 1. 显式路径
    /// 2. 环境变量 SUPL_CONFIG
    /// 3. 系统配置目录/suplovani/config.json
    /// 4. 当前目录 config.json
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }
        dirs::config_dir()
            .map(|dir| dir.join("suplovani").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取配置（TTL 内使用缓存）
    ///
    /// # 返回
    /// - Ok(BoardConfig): 配置快照
    /// - Err: 文件存在但无法读取/解析，或配置值非法
    pub fn load(&self) -> ConfigResult<BoardConfig> {
        let mut cache = self.cache.lock().map_err(|e| ConfigError::FileReadError {
            path: self.path.display().to_string(),
            message: format!("锁获取失败: {}", e),
        })?;

        if let Some(cached) = cache.as_ref() {
            if cached.loaded_at.elapsed() < self.cache_ttl {
                return Ok(cached.config.clone());
            }
        }

        let config = self.read_from_disk()?;
        *cache = Some(CachedConfig {
            loaded_at: Instant::now(),
            config: config.clone(),
        });
        Ok(config)
    }

    /// 读取配置，失败时记录 warn 并回退默认配置
    pub fn current(&self) -> BoardConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "配置读取失败，使用默认配置");
                BoardConfig::default()
            }
        }
    }

    /// 写回配置文件并刷新缓存
    pub fn save(&self, config: &BoardConfig) -> ConfigResult<()> {
        let file = ConfigFile {
            settings: config.clone(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(|e| ConfigError::WriteError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                    path: parent.display().to_string(),
                    message: e.to_string(),
                })?;
            }
        }
        std::fs::write(&self.path, content).map_err(|e| ConfigError::WriteError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some(CachedConfig {
                loaded_at: Instant::now(),
                config: config.clone(),
            });
        }
        Ok(())
    }

    fn read_from_disk(&self) -> ConfigResult<BoardConfig> {
        let path_display = self.path.display().to_string();

        if !self.path.exists() {
            warn!(path = %path_display, "配置文件不存在，使用默认配置");
            return Ok(BoardConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileReadError {
            path: path_display.clone(),
            message: e.to_string(),
        })?;

        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path_display.clone(),
            message: e.to_string(),
        })?;

        file.settings.validate()?;
        debug!(path = %path_display, "配置已加载");
        Ok(file.settings)
    }
}

impl BoardConfigReader for ConfigManager {
    fn board_config(&self) -> BoardConfig {
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let manager = ConfigManager::new("/nonexistent/suplovani/config.json");
        let config = manager.load().unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_load_and_cache() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"settings": {{"exclude": ["4B"]}}}}"#).unwrap();

        let manager = ConfigManager::with_ttl(file.path(), Duration::from_secs(60));
        assert_eq!(manager.load().unwrap().exclude, vec!["4B"]);

        // TTL 内修改文件不影响缓存
        std::fs::write(file.path(), r#"{"settings": {"exclude": ["1A"]}}"#).unwrap();
        assert_eq!(manager.load().unwrap().exclude, vec!["4B"]);
    }

    #[test]
    fn test_zero_ttl_reloads() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"settings": {"exclude": ["4B"]}}"#).unwrap();

        let manager = ConfigManager::with_ttl(file.path(), Duration::ZERO);
        assert_eq!(manager.load().unwrap().exclude, vec!["4B"]);

        std::fs::write(file.path(), r#"{"settings": {"exclude": ["1A"]}}"#).unwrap();
        assert_eq!(manager.load().unwrap().exclude, vec!["1A"]);
    }

    #[test]
    fn test_invalid_json_falls_back_in_current() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();

        let manager = ConfigManager::new(file.path());
        assert!(matches!(manager.load(), Err(ConfigError::ParseError { .. })));
        assert_eq!(manager.current(), BoardConfig::default());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let manager = ConfigManager::new(&path);

        let config = BoardConfig {
            include: vec!["3A".to_string()],
            day_end_hour: Some(5),
            ..Default::default()
        };
        manager.save(&config).unwrap();

        let reloaded = ConfigManager::new(&path).load().unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_resolve_path_explicit_wins() {
        let explicit = Path::new("/tmp/explicit.json");
        assert_eq!(ConfigManager::resolve_path(Some(explicit)), explicit.to_path_buf());
    }
}
