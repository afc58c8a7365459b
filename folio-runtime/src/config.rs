//! # Config 模块
//!
//! 页面效果配置，集中管理所有选择器、阈值与时长。
//!
//! ## 配置优先级
//!
//! 1. 页面内联的 JSON 配置（`<script type="application/json" id="folio-config">`）
//! 2. 默认值（最低）
//!
//! 所有字段都有默认值，缺失字段按默认值补齐，未知字段忽略。
//! 默认值即页面标记与样式表约定的取值。

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::FxResult;

/// 页面配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// 页面标记约定的选择器
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// 滚动显现
    #[serde(default)]
    pub reveal: RevealConfig,

    /// 导航栏
    #[serde(default)]
    pub nav: NavConfig,

    /// 锚点平滑滚动
    #[serde(default)]
    pub anchors: AnchorConfig,

    /// 代码打字效果
    #[serde(default)]
    pub typing: TypingConfig,

    /// 鼠标视差
    #[serde(default)]
    pub parallax: ParallaxConfig,

    /// 导航链接高亮
    #[serde(default)]
    pub active_nav: ActiveNavConfig,

    /// 控制台横幅
    #[serde(default)]
    pub banner: BannerConfig,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

impl PageConfig {
    /// 从 JSON 文本解析配置
    pub fn from_json(text: &str) -> FxResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// 所有依赖的选择器（用于标记检查）
    pub fn all_selectors(&self) -> Vec<&str> {
        let s = &self.selectors;
        vec![
            s.nav.as_str(),
            s.sections.as_str(),
            s.cards.as_str(),
            s.anchors.as_str(),
            s.code.as_str(),
            s.orbs.as_str(),
            s.nav_links.as_str(),
            s.id_sections.as_str(),
        ]
    }
}

/// 选择器配置
///
/// 任一选择器与标记不一致时，对应效果静默失效。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_nav_selector")]
    pub nav: String,

    /// 普通内容区块（只显现，不错开）
    #[serde(default = "default_sections_selector")]
    pub sections: String,

    /// 卡片（按序号错开显现）
    #[serde(default = "default_cards_selector")]
    pub cards: String,

    /// 页内锚点链接
    #[serde(default = "default_anchors_selector")]
    pub anchors: String,

    /// 打字效果目标
    #[serde(default = "default_code_selector")]
    pub code: String,

    /// 视差装饰元素
    #[serde(default = "default_orbs_selector")]
    pub orbs: String,

    #[serde(default = "default_nav_links_selector")]
    pub nav_links: String,

    /// 带 id 的区块（用于导航高亮）
    #[serde(default = "default_id_sections_selector")]
    pub id_sections: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            nav: default_nav_selector(),
            sections: default_sections_selector(),
            cards: default_cards_selector(),
            anchors: default_anchors_selector(),
            code: default_code_selector(),
            orbs: default_orbs_selector(),
            nav_links: default_nav_links_selector(),
            id_sections: default_id_sections_selector(),
        }
    }
}

/// 滚动显现配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// 可见面积比例阈值 (0.0 - 1.0)
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,

    /// 显现后添加的 class
    #[serde(default = "default_visible_class")]
    pub visible_class: String,

    /// 卡片之间的过渡延迟步长（秒）
    #[serde(default = "default_stagger_seconds")]
    pub stagger_seconds: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
            visible_class: default_visible_class(),
            stagger_seconds: default_stagger_seconds(),
        }
    }
}

/// 导航栏配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// 滚动超过该值后切换为不透明背景
    #[serde(default = "default_opaque_after")]
    pub opaque_after: f64,

    /// 向下滚动且超过该值后隐藏导航栏
    #[serde(default = "default_hide_after")]
    pub hide_after: f64,

    #[serde(default = "default_opaque_background")]
    pub opaque_background: String,

    #[serde(default = "default_translucent_background")]
    pub translucent_background: String,

    /// 初始化时安装的 transition
    #[serde(default = "default_nav_transition")]
    pub transition: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            opaque_after: default_opaque_after(),
            hide_after: default_hide_after(),
            opaque_background: default_opaque_background(),
            translucent_background: default_translucent_background(),
            transition: default_nav_transition(),
        }
    }
}

/// 锚点平滑滚动配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// 目标顶部与视口顶部的距离（固定导航栏高度）
    #[serde(default = "default_anchor_offset")]
    pub offset: f64,

    /// 锚点目标不存在时是否仍然阻止默认跳转
    ///
    /// `true` 时点击无效锚点不会有任何反应；
    /// `false` 时交还浏览器默认导航。
    #[serde(default = "default_swallow_unresolved")]
    pub swallow_unresolved: bool,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            offset: default_anchor_offset(),
            swallow_unresolved: default_swallow_unresolved(),
        }
    }
}

/// 打字效果配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingConfig {
    /// 开始打字前的延迟（毫秒）
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,

    /// 每个字符的间隔（毫秒）
    #[serde(default = "default_char_interval_ms")]
    pub char_interval_ms: u64,

    /// 会话存储中的完成标记键
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl TypingConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn char_interval(&self) -> Duration {
        Duration::from_millis(self.char_interval_ms)
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: default_start_delay_ms(),
            char_interval_ms: default_char_interval_ms(),
            session_key: default_session_key(),
        }
    }
}

/// 视差配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    /// 视口宽度大于该值才启用（仅在加载时判断一次）
    #[serde(default = "default_min_viewport_width")]
    pub min_viewport_width: f64,

    /// 第 i 个元素的速度为 `(i + 1) * speed_step`
    #[serde(default = "default_speed_step")]
    pub speed_step: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: default_min_viewport_width(),
            speed_step: default_speed_step(),
        }
    }
}

/// 导航链接高亮配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveNavConfig {
    /// 区块顶部提前量
    #[serde(default = "default_active_offset")]
    pub offset: f64,

    #[serde(default = "default_active_class")]
    pub active_class: String,
}

impl Default for ActiveNavConfig {
    fn default() -> Self {
        Self {
            offset: default_active_offset(),
            active_class: default_active_class(),
        }
    }
}

/// 控制台横幅配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_banner_enabled")]
    pub enabled: bool,

    /// 标题行（第一个 `%c` 段）
    #[serde(default = "default_banner_title")]
    pub title: String,

    /// 正文行（第二个 `%c` 段）
    #[serde(default = "default_banner_lines")]
    pub lines: Vec<String>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: default_banner_enabled(),
            title: default_banner_title(),
            lines: default_banner_lines(),
        }
    }
}

/// 调试配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// 默认值函数

fn default_nav_selector() -> String {
    ".nav".to_string()
}

fn default_sections_selector() -> String {
    ".section-content".to_string()
}

fn default_cards_selector() -> String {
    ".skill-card, .work-card, .contact-link".to_string()
}

fn default_anchors_selector() -> String {
    "a[href^=\"#\"]".to_string()
}

fn default_code_selector() -> String {
    ".code-content code".to_string()
}

fn default_orbs_selector() -> String {
    ".gradient-orb".to_string()
}

fn default_nav_links_selector() -> String {
    ".nav-links a".to_string()
}

fn default_id_sections_selector() -> String {
    "section[id]".to_string()
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_visible_class() -> String {
    "visible".to_string()
}

fn default_stagger_seconds() -> f64 {
    0.1
}

fn default_opaque_after() -> f64 {
    50.0
}

fn default_hide_after() -> f64 {
    100.0
}

fn default_opaque_background() -> String {
    "rgba(10, 10, 11, 0.95)".to_string()
}

fn default_translucent_background() -> String {
    "rgba(10, 10, 11, 0.8)".to_string()
}

fn default_nav_transition() -> String {
    "transform 0.3s ease, background 0.3s ease".to_string()
}

fn default_anchor_offset() -> f64 {
    80.0
}

fn default_swallow_unresolved() -> bool {
    true
}

fn default_start_delay_ms() -> u64 {
    1000
}

fn default_char_interval_ms() -> u64 {
    15
}

fn default_session_key() -> String {
    "typingDone".to_string()
}

fn default_min_viewport_width() -> f64 {
    768.0
}

fn default_speed_step() -> f64 {
    20.0
}

fn default_active_offset() -> f64 {
    100.0
}

fn default_active_class() -> String {
    "active".to_string()
}

fn default_banner_enabled() -> bool {
    true
}

fn default_banner_title() -> String {
    "✨ Hey there, fellow developer! ✨".to_string()
}

fn default_banner_lines() -> Vec<String> {
    [
        "Welcome to my portfolio source code.",
        "If you're here, you might be into vibe coding too.",
        "",
        "Let's connect:",
        "🐦 Twitter: @jaysaadana",
        "🔗 GitHub: github.com/jaysaadana",
        "",
        "Happy coding! 🚀",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.nav.opaque_after, 50.0);
        assert_eq!(config.anchors.offset, 80.0);
        assert_eq!(config.typing.start_delay(), Duration::from_millis(1000));
        assert_eq!(config.typing.char_interval(), Duration::from_millis(15));
        assert_eq!(config.parallax.min_viewport_width, 768.0);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = PageConfig::from_json(
            r#"{ "anchors": { "swallow_unresolved": false }, "typing": { "char_interval_ms": 5 } }"#,
        )
        .unwrap();

        assert!(!config.anchors.swallow_unresolved);
        assert_eq!(config.anchors.offset, 80.0);
        assert_eq!(config.typing.char_interval_ms, 5);
        assert_eq!(config.typing.session_key, "typingDone");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config = PageConfig::from_json(r#"{ "theme": "dark", "nav": { "color": 1 } }"#);
        assert!(config.is_ok());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = PageConfig::from_json("{ nav: ").unwrap_err();
        assert!(matches!(err, crate::FxError::Config { .. }));
    }

    #[test]
    fn test_all_selectors() {
        let config = PageConfig::default();
        let selectors = config.all_selectors();
        assert_eq!(selectors.len(), 8);
        assert!(selectors.contains(&".gradient-orb"));
        assert!(selectors.contains(&"section[id]"));
    }
}
