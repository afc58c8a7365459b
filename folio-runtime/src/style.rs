//! # Style 模块
//!
//! 内联样式值的格式化。
//!
//! 浮点运算会带来 `0.30000000000000004` 这样的尾数，
//! 这里统一保留三位小数并去掉多余的零。

/// 格式化 CSS 数值（去掉尾随零，`-0` 归一为 `0`）
pub fn number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // -0.0 == 0.0
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// 秒，如 `0.3s`
pub fn seconds(value: f64) -> String {
    format!("{}s", number(value))
}

/// 像素，如 `-4.5px`
pub fn px(value: f64) -> String {
    format!("{}px", number(value))
}

/// `translate(xpx, ypx)`
pub fn translate(x: f64, y: f64) -> String {
    format!("translate({}, {})", px(x), px(y))
}

/// 导航栏收起
pub const TRANSLATE_Y_HIDDEN: &str = "translateY(-100%)";

/// 导航栏展开
pub const TRANSLATE_Y_SHOWN: &str = "translateY(0)";
