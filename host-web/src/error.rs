//! # Error 模块
//!
//! 浏览器宿主的错误类型。

use thiserror::Error;
use wasm_bindgen::JsValue;

/// 宿主错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// 没有 window（非浏览器环境）
    #[error("window 不可用")]
    NoWindow,

    /// 没有 document
    #[error("document 不可用")]
    NoDocument,

    /// JS 调用抛出异常
    #[error("JS 异常: {0}")]
    Js(String),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe(&value))
    }
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// 把任意 JS 值转成可读文本
pub fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::JSON::stringify(value)
                .ok()
                .and_then(|s| s.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;
