//! # Banner 模块
//!
//! 加载时输出到控制台的彩蛋横幅。

use crate::config::BannerConfig;
use crate::host::Console;

/// 标题样式（第一个 `%c`）
pub const TITLE_STYLE: &str = "color: #f97316; font-size: 16px; font-weight: bold;";

/// 正文样式（第二个 `%c`）
pub const BODY_STYLE: &str = "color: #a1a1aa; font-size: 12px;";

/// 拼出带 `%c` 指令的消息
pub fn render(config: &BannerConfig) -> String {
    let mut message = format!("\n%c{}\n%c", config.title);
    for line in &config.lines {
        message.push('\n');
        message.push_str(line);
    }
    message.push('\n');
    message
}

/// 输出横幅（未启用时不输出）
pub fn print<C: Console>(console: &mut C, config: &BannerConfig) {
    if !config.enabled {
        return;
    }
    console.log_styled(&render(config), &[TITLE_STYLE, BODY_STYLE]);
}
