// ==========================================
// 代课公告系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 规则: 仅文档结构错误向调用方传播
// ==========================================

use crate::config::error::ConfigError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    // ===== 文档结构错误 =====
    #[error("文档结构缺失: {0}")]
    MalformedDocument(String),

    // ===== 字段转换错误（行级，调用方吸收）=====
    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== 批处理 =====
    #[error("批处理文档失败 ({path}): {message}")]
    BatchItemFailed { path: String, message: String },

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
