//! 错误类型
//!
//! 只有配置与 I/O 层面的问题会成为错误；仿真中可恢复的情况（无车、无调度员、
//! 无路径）在事件处理中就地处理并记录日志。

use thiserror::Error;

/// 运行仿真或导出结果时可能出现的错误。
#[derive(Debug, Error)]
pub enum SimError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
