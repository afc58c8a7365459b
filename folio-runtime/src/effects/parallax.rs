//! # Parallax 模块
//!
//! 鼠标视差：装饰元素按序号成比例地跟随指针偏移。
//!
//! 仅在加载时视口宽度大于阈值时启用，之后不随窗口尺寸变化重新判断。

use tracing::debug;

use crate::config::ParallaxConfig;
use crate::host::{Document, NodeId, Viewport};
use crate::style;

/// 视差效果
#[derive(Debug, Clone)]
pub struct Parallax {
    orbs: Vec<NodeId>,
    speed_step: f64,
}

impl Parallax {
    /// 视口足够宽时启用，否则返回 `None`（不监听鼠标）
    pub fn init<H: Document + Viewport>(
        host: &mut H,
        selector: &str,
        config: &ParallaxConfig,
    ) -> Option<Self> {
        let width = host.inner_width();
        if width <= config.min_viewport_width {
            debug!(width, "parallax disabled on narrow viewport");
            return None;
        }

        let orbs = host.query_all(selector);
        debug!(orbs = orbs.len(), "parallax enabled");
        Some(Self {
            orbs,
            speed_step: config.speed_step,
        })
    }

    pub fn orbs(&self) -> &[NodeId] {
        &self.orbs
    }

    /// 第 `index` 个元素的速度
    pub fn speed(&self, index: usize) -> f64 {
        (index + 1) as f64 * self.speed_step
    }

    /// 鼠标移动：更新每个元素的位移
    pub fn on_pointer_move<H: Document + Viewport>(&self, host: &mut H, client_x: f64, client_y: f64) {
        let x = normalize(client_x, host.inner_width());
        let y = normalize(client_y, host.inner_height());

        for (index, &orb) in self.orbs.iter().enumerate() {
            let speed = self.speed(index);
            let transform = style::translate((x - 0.5) * speed, (y - 0.5) * speed);
            host.set_style(orb, "transform", &transform);
        }
    }
}

/// 归一化到 [0, 1]
fn normalize(position: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.5;
    }
    (position / extent).clamp(0.0, 1.0)
}
