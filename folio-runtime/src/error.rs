//! # Error 模块
//!
//! 定义 folio-runtime 中使用的错误类型。
//!
//! 各个效果在元素缺失时静默退化，不产生错误；
//! 错误只来自配置解析与会话存储写入。

use thiserror::Error;

/// folio-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    /// 配置解析失败
    #[error("配置解析失败: {message}")]
    Config { message: String },

    /// 会话存储读写失败
    #[error("会话存储 '{key}' 写入失败: {message}")]
    Storage { key: String, message: String },
}

impl FxError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 创建存储错误
    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FxError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}

/// Result 类型别名
pub type FxResult<T> = Result<T, FxError>;
