//! # Logging 模块
//!
//! 把 `tracing` 输出转发到浏览器控制台。
//!
//! wasm32 上没有系统时钟，因此关闭时间戳。

use std::io;
use std::str::FromStr;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// 按级别选择控制台方法的写入器工厂
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

/// 缓冲一条日志，drop 时输出
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(text.trim_end());
        if self.level == Level::ERROR {
            web_sys::console::error_1(&message);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&message);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&message);
        } else {
            web_sys::console::debug_1(&message);
        }
    }
}

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// 解析日志级别，无法识别时回退到 INFO
pub fn parse_level(text: &str) -> Level {
    Level::from_str(text.trim()).unwrap_or(Level::INFO)
}

/// 安装全局 subscriber（重复调用时忽略）
pub fn init(level: &str) {
    let result = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_max_level(parse_level(level))
        .without_time()
        .with_target(false)
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
