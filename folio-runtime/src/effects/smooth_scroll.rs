//! # SmoothScroll 模块
//!
//! 拦截页内锚点点击，平滑滚动到目标元素，并为固定导航栏留出偏移。
//!
//! 目标不存在时的行为由 `AnchorConfig::swallow_unresolved` 决定：
//! 为真时仍然阻止默认跳转（点击无反应），为假时交还浏览器默认导航。

use tracing::debug;

use crate::config::AnchorConfig;
use crate::host::{Document, NodeId, Viewport};

/// 点击处理结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorOutcome {
    /// 已滚动到指定位置
    Scrolled { top: f64 },
    /// 目标不存在，默认跳转被吞掉
    Swallowed,
    /// 不处理，交还浏览器
    Native,
}

impl AnchorOutcome {
    /// Host 是否需要取消默认行为
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::Native)
    }
}

/// 锚点平滑滚动效果
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    anchors: Vec<NodeId>,
    config: AnchorConfig,
}

impl SmoothScroll {
    pub fn init<D: Document>(dom: &mut D, selector: &str, config: &AnchorConfig) -> Self {
        let anchors = dom.query_all(selector);
        debug!(anchors = anchors.len(), "smooth scroll initialized");
        Self {
            anchors,
            config: config.clone(),
        }
    }

    /// Host 需要监听点击的锚点
    pub fn anchors(&self) -> &[NodeId] {
        &self.anchors
    }

    /// 处理锚点点击
    pub fn on_click<H: Document + Viewport>(&self, host: &mut H, anchor: NodeId) -> AnchorOutcome {
        if !self.anchors.contains(&anchor) {
            return AnchorOutcome::Native;
        }

        let href = host.attribute(anchor, "href").unwrap_or_default();
        let fragment = href.strip_prefix('#').unwrap_or(&href);

        match host.element_by_id(fragment) {
            Some(target) => {
                let top = host.offset_top(target) - self.config.offset;
                host.smooth_scroll_to(top);
                debug!(%href, top, "anchor scroll");
                AnchorOutcome::Scrolled { top }
            }
            None if self.config.swallow_unresolved => {
                debug!(%href, "anchor target not found, click swallowed");
                AnchorOutcome::Swallowed
            }
            None => AnchorOutcome::Native,
        }
    }
}
