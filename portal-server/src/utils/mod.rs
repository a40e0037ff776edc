//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - 日志、输入验证、时间等工具

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, ErrorBody};

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
