//! # NavBar 模块
//!
//! 导航栏随滚动切换背景透明度，向下滚动时收起、向上滚动时展开。
//!
//! ## 节流
//!
//! ```text
//! Scroll         -> 若没有待处理的帧：标记 pending，请求 NextFrame
//!                   否则忽略
//! AnimationFrame -> 读取滚动位置并更新样式，清除 pending
//! ```
//!
//! 无论滚动事件多频繁，每个动画帧最多执行一次检查。

use tracing::debug;

use crate::config::NavConfig;
use crate::host::{Document, NodeId, Viewport};
use crate::schedule::Schedule;
use crate::style;

/// 导航栏效果
#[derive(Debug, Clone)]
pub struct NavBar {
    /// 导航栏节点；不存在时效果整体失效
    nav: Option<NodeId>,
    /// 上一次检查时的滚动位置
    last_scroll_y: f64,
    /// 已请求动画帧但尚未执行
    frame_pending: bool,
    config: NavConfig,
}

impl NavBar {
    /// 安装过渡并记录初始滚动位置
    pub fn init<H: Document + Viewport>(host: &mut H, selector: &str, config: &NavConfig) -> Self {
        let nav = host.query(selector);
        match nav {
            Some(node) => host.set_style(node, "transition", &config.transition),
            None => debug!(selector, "nav bar not found"),
        }

        Self {
            nav,
            last_scroll_y: host.scroll_y(),
            frame_pending: false,
            config: config.clone(),
        }
    }

    /// 是否找到了导航栏
    pub fn is_active(&self) -> bool {
        self.nav.is_some()
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }

    /// 滚动事件：按帧节流
    pub fn on_scroll(&mut self) -> Option<Schedule> {
        if self.nav.is_none() || self.frame_pending {
            return None;
        }
        self.frame_pending = true;
        Some(Schedule::NextFrame)
    }

    /// 动画帧回调：更新背景与位移
    pub fn on_frame<H: Document + Viewport>(&mut self, host: &mut H) {
        let Some(nav) = self.nav else {
            return;
        };
        if !self.frame_pending {
            return;
        }

        let scroll_y = host.scroll_y();

        let background = if scroll_y > self.config.opaque_after {
            &self.config.opaque_background
        } else {
            &self.config.translucent_background
        };
        host.set_style(nav, "background", background);

        let scrolling_down = scroll_y > self.last_scroll_y;
        let transform = if scrolling_down && scroll_y > self.config.hide_after {
            style::TRANSLATE_Y_HIDDEN
        } else {
            style::TRANSLATE_Y_SHOWN
        };
        host.set_style(nav, "transform", transform);

        debug!(scroll_y, last = self.last_scroll_y, transform, "nav frame");

        self.last_scroll_y = scroll_y;
        self.frame_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Element, HeadlessHost};

    const OPAQUE: &str = "rgba(10, 10, 11, 0.95)";
    const TRANSLUCENT: &str = "rgba(10, 10, 11, 0.8)";

    fn setup() -> (HeadlessHost, NodeId, NavBar) {
        let mut host = HeadlessHost::new(1280.0, 800.0);
        let nav = host.insert(Element::new("nav").class("nav"));
        let bar = NavBar::init(&mut host, ".nav", &NavConfig::default());
        (host, nav, bar)
    }

    /// 模拟一次滚动到 `y` 并执行随后的动画帧
    fn scroll_to(host: &mut HeadlessHost, bar: &mut NavBar, y: f64) {
        host.set_scroll_y(y);
        if bar.on_scroll().is_some() {
            bar.on_frame(host);
        }
    }

    #[test]
    fn test_transition_installed() {
        let (host, nav, bar) = setup();
        assert!(bar.is_active());
        assert_eq!(
            host.style(nav, "transition").as_deref(),
            Some("transform 0.3s ease, background 0.3s ease")
        );
    }

    #[test]
    fn test_background_threshold() {
        let (mut host, nav, mut bar) = setup();

        scroll_to(&mut host, &mut bar, 30.0);
        assert_eq!(host.style(nav, "background").as_deref(), Some(TRANSLUCENT));

        // 恰好 50 仍为半透明
        scroll_to(&mut host, &mut bar, 50.0);
        assert_eq!(host.style(nav, "background").as_deref(), Some(TRANSLUCENT));

        scroll_to(&mut host, &mut bar, 51.0);
        assert_eq!(host.style(nav, "background").as_deref(), Some(OPAQUE));

        scroll_to(&mut host, &mut bar, 10.0);
        assert_eq!(host.style(nav, "background").as_deref(), Some(TRANSLUCENT));
    }

    #[test]
    fn test_hide_on_scroll_down_show_on_scroll_up() {
        let (mut host, nav, mut bar) = setup();

        // 向下但未超过 100
        scroll_to(&mut host, &mut bar, 90.0);
        assert_eq!(host.style(nav, "transform").as_deref(), Some("translateY(0)"));

        // 向下越过 100
        scroll_to(&mut host, &mut bar, 150.0);
        assert_eq!(
            host.style(nav, "transform").as_deref(),
            Some("translateY(-100%)")
        );

        // 任意位置向上
        scroll_to(&mut host, &mut bar, 140.0);
        assert_eq!(host.style(nav, "transform").as_deref(), Some("translateY(0)"));

        // 位置不变视为非向下
        scroll_to(&mut host, &mut bar, 140.0);
        assert_eq!(host.style(nav, "transform").as_deref(), Some("translateY(0)"));
    }

    #[test]
    fn test_at_most_once_per_frame() {
        let (mut host, _, mut bar) = setup();

        let requests: Vec<_> = (0..10)
            .filter_map(|i| {
                host.set_scroll_y(i as f64 * 20.0);
                bar.on_scroll()
            })
            .collect();
        assert_eq!(requests, vec![Schedule::NextFrame]);
        assert!(bar.frame_pending());

        bar.on_frame(&mut host);
        assert!(!bar.frame_pending());
        assert_eq!(bar.last_scroll_y(), 180.0);

        // 多余的帧回调不产生第二次检查
        host.set_scroll_y(0.0);
        bar.on_frame(&mut host);
        assert_eq!(bar.last_scroll_y(), 180.0);

        // 新的一帧可以再次请求
        assert_eq!(bar.on_scroll(), Some(Schedule::NextFrame));
    }

    #[test]
    fn test_initial_scroll_position_is_remembered() {
        let mut host = HeadlessHost::new(1280.0, 800.0);
        let nav = host.insert(Element::new("nav").class("nav"));
        host.set_scroll_y(400.0);
        let mut bar = NavBar::init(&mut host, ".nav", &NavConfig::default());
        assert_eq!(bar.last_scroll_y(), 400.0);

        // 从 400 向上到 300，保持展开
        scroll_to(&mut host, &mut bar, 300.0);
        assert_eq!(host.style(nav, "transform").as_deref(), Some("translateY(0)"));
    }

    #[test]
    fn test_missing_nav_is_inert() {
        let mut host = HeadlessHost::new(1280.0, 800.0);
        let mut bar = NavBar::init(&mut host, ".nav", &NavConfig::default());
        assert!(!bar.is_active());
        assert_eq!(bar.on_scroll(), None);
        bar.on_frame(&mut host);
    }
}
