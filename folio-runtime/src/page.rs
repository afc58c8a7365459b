//! # Page 模块
//!
//! 页面效果的总入口。
//!
//! ## 执行模型
//!
//! ```text
//! Page::ready(config, host)  -> (Page, Response)   页面就绪时调用一次
//! page.listeners()           -> Listeners          Host 据此挂载监听
//! page.dispatch(host, input) -> Response           每个浏览器事件调用一次
//! ```
//!
//! 每个效果各自持有状态，`Page` 只负责把输入路由给对应的效果，
//! 并把它们的调度请求合并后交还 Host。

use tracing::{debug, info};

use crate::banner;
use crate::config::PageConfig;
use crate::effects::{ActiveNav, NavBar, Parallax, Reveal, SmoothScroll, Typing};
use crate::host::{Host, NodeId};
use crate::input::PageInput;
use crate::schedule::{Response, TimerKind};

/// Host 需要挂载的监听
#[derive(Debug, Clone, PartialEq)]
pub struct Listeners {
    /// 需要可见性观察的节点
    pub observe: Vec<NodeId>,
    /// 可见性阈值
    pub observe_threshold: f64,
    /// 需要监听点击的锚点
    pub anchors: Vec<NodeId>,
    /// 是否监听窗口滚动
    pub scroll: bool,
    /// 是否监听鼠标移动
    pub pointer: bool,
}

/// 页面效果集合
#[derive(Debug, Clone)]
pub struct Page {
    reveal: Reveal,
    nav_bar: NavBar,
    smooth_scroll: SmoothScroll,
    typing: Typing,
    /// 窄视口下为 `None`
    parallax: Option<Parallax>,
    active_nav: ActiveNav,
}

impl Page {
    /// 页面就绪：初始化所有效果
    ///
    /// 返回的 `Response` 中包含打字效果的启动延时。
    pub fn ready<H: Host>(config: PageConfig, host: &mut H) -> (Self, Response) {
        banner::print(host, &config.banner);

        let selectors = &config.selectors;
        let reveal = Reveal::init(host, selectors, &config.reveal);
        let nav_bar = NavBar::init(host, &selectors.nav, &config.nav);
        let smooth_scroll = SmoothScroll::init(host, &selectors.anchors, &config.anchors);

        let mut typing = Typing::new(&config.typing);
        let response = Response::from(typing.start(host, &selectors.code));

        let parallax = Parallax::init(host, &selectors.orbs, &config.parallax);
        let active_nav = ActiveNav::init(
            host,
            &selectors.id_sections,
            &selectors.nav_links,
            &config.active_nav,
        );

        info!(
            observed = reveal.targets().len(),
            anchors = smooth_scroll.anchors().len(),
            nav = nav_bar.is_active(),
            parallax = parallax.is_some(),
            "page effects ready"
        );

        let page = Self {
            reveal,
            nav_bar,
            smooth_scroll,
            typing,
            parallax,
            active_nav,
        };
        (page, response)
    }

    pub fn typing(&self) -> &Typing {
        &self.typing
    }

    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    /// Host 需要挂载的监听
    pub fn listeners(&self) -> Listeners {
        Listeners {
            observe: self.reveal.targets().to_vec(),
            observe_threshold: self.reveal.threshold(),
            anchors: self.smooth_scroll.anchors().to_vec(),
            scroll: true,
            pointer: self.parallax.is_some(),
        }
    }

    /// 分发一个输入
    pub fn dispatch<H: Host>(&mut self, host: &mut H, input: PageInput) -> Response {
        let mut response = Response::new();

        match input {
            PageInput::Scroll => {
                response.merge(self.nav_bar.on_scroll().into());
                self.active_nav.on_scroll(host);
            }
            PageInput::AnimationFrame => {
                self.nav_bar.on_frame(host);
            }
            PageInput::AnchorClick { anchor } => {
                if self.smooth_scroll.on_click(host, anchor).prevents_default() {
                    response.prevent_default();
                }
            }
            PageInput::PointerMove { client_x, client_y } => {
                if let Some(parallax) = &self.parallax {
                    parallax.on_pointer_move(host, client_x, client_y);
                }
            }
            PageInput::Intersection {
                node,
                is_intersecting,
                ratio,
            } => {
                self.reveal
                    .on_intersection(host, node, is_intersecting, ratio);
            }
            PageInput::Timer(TimerKind::TypingTick) => {
                response.merge(self.typing.tick(host).into());
            }
        }

        if !response.is_empty() {
            debug!(?response, "dispatch response");
        }
        response
    }
}
