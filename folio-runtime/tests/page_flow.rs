//! # 页面流程集成测试
//!
//! 测试 Host → Page::dispatch → HeadlessHost 的完整链路。
//! 测试内用一个极简的事件循环模拟浏览器的帧回调与定时器。

use std::collections::VecDeque;
use std::time::Duration;

use folio_runtime::headless::{Element, HeadlessHost};
use folio_runtime::{
    Document, NodeId, Page, PageConfig, PageInput, Response, Schedule, SessionStore, TypingState,
};

const CODE_HTML: &str = "<span class=\"kw\">const</span> me = <span class=\"str\">'dev'</span>;";
const CODE_TEXT: &str = "const me = 'dev';";

/// 测试页面上的关键节点
struct Nodes {
    nav: NodeId,
    links: Vec<NodeId>,
    cards: Vec<NodeId>,
    section_content: NodeId,
    code: NodeId,
    orbs: Vec<NodeId>,
    to_work: NodeId,
    to_missing: NodeId,
}

fn build_page(width: f64) -> (HeadlessHost, Nodes) {
    let mut host = HeadlessHost::new(width, 900.0);

    let nav = host.insert(Element::new("nav").class("nav"));
    let list = host.insert(Element::new("ul").class("nav-links").parent(nav));
    let links: Vec<NodeId> = ["#about", "#work", "#contact"]
        .iter()
        .map(|href| host.insert(Element::new("a").attr("href", href).parent(list)))
        .collect();

    let orbs: Vec<NodeId> = (0..2)
        .map(|_| host.insert(Element::new("div").class("gradient-orb")))
        .collect();

    let wrapper = host.insert(Element::new("div").class("code-content"));
    let code = host.insert(Element::new("code").parent(wrapper).html(CODE_HTML));

    let about = host.insert(Element::new("section").id("about").top(0.0));
    let section_content =
        host.insert(Element::new("div").class("section-content").parent(about));

    let work = host.insert(Element::new("section").id("work").top(500.0));
    let cards: Vec<NodeId> = (0..3)
        .map(|_| host.insert(Element::new("div").class("work-card").parent(work)))
        .collect();

    host.insert(Element::new("section").id("contact").top(1000.0));
    let to_work = host.insert(Element::new("a").attr("href", "#work"));
    let to_missing = host.insert(Element::new("a").attr("href", "#missing"));

    let nodes = Nodes {
        nav,
        links,
        cards,
        section_content,
        code,
        orbs,
        to_work,
        to_missing,
    };
    (host, nodes)
}

/// 模拟浏览器事件循环
#[derive(Default)]
struct EventLoop {
    frames: usize,
    timers: VecDeque<(Duration, PageInput)>,
    frame_callbacks_run: usize,
}

impl EventLoop {
    fn accept(&mut self, response: Response) {
        for request in response.schedule {
            match request {
                Schedule::NextFrame => self.frames += 1,
                Schedule::Timer { kind, delay } => {
                    self.timers.push_back((delay, PageInput::Timer(kind)))
                }
            }
        }
    }

    /// 执行一帧：所有挂起的帧回调各执行一次
    fn run_frame(&mut self, page: &mut Page, host: &mut HeadlessHost) {
        let pending = std::mem::take(&mut self.frames);
        for _ in 0..pending {
            self.frame_callbacks_run += 1;
            let response = page.dispatch(host, PageInput::AnimationFrame);
            self.accept(response);
        }
    }

    /// 依次执行到期定时器，返回累计经过的时间
    fn run_timers(&mut self, page: &mut Page, host: &mut HeadlessHost) -> Duration {
        let mut elapsed = Duration::ZERO;
        while let Some((delay, input)) = self.timers.pop_front() {
            elapsed += delay;
            let response = page.dispatch(host, input);
            self.accept(response);
        }
        elapsed
    }
}

fn ready(host: &mut HeadlessHost) -> (Page, EventLoop) {
    let (page, response) = Page::ready(PageConfig::default(), host);
    let mut event_loop = EventLoop::default();
    event_loop.accept(response);
    (page, event_loop)
}

fn scroll(page: &mut Page, host: &mut HeadlessHost, event_loop: &mut EventLoop, y: f64) {
    host.set_scroll_y(y);
    let response = page.dispatch(host, PageInput::Scroll);
    event_loop.accept(response);
}

#[test]
fn test_ready_reports_listeners_and_prints_banner() {
    let (mut host, nodes) = build_page(1440.0);
    let (page, _) = ready(&mut host);

    let listeners = page.listeners();
    assert_eq!(listeners.observe_threshold, 0.1);
    assert_eq!(listeners.observe[0], nodes.section_content);
    assert_eq!(&listeners.observe[1..], nodes.cards.as_slice());
    // 导航链接 3 个 + 正文锚点 2 个
    assert_eq!(listeners.anchors.len(), 5);
    assert!(listeners.scroll);
    assert!(listeners.pointer);

    assert_eq!(host.console().len(), 1);
    assert_eq!(
        host.style(nodes.nav, "transition").as_deref(),
        Some("transform 0.3s ease, background 0.3s ease")
    );
}

#[test]
fn test_reveal_cascade() {
    let (mut host, nodes) = build_page(1440.0);
    let (mut page, _) = ready(&mut host);

    let delays: Vec<String> = nodes
        .cards
        .iter()
        .map(|&c| host.style(c, "transition-delay").unwrap_or_default())
        .collect();
    assert_eq!(delays, vec!["0s", "0.1s", "0.2s"]);

    page.dispatch(&mut host, PageInput::intersection(nodes.cards[0], 0.09));
    assert!(!host.has_class(nodes.cards[0], "visible"));

    page.dispatch(&mut host, PageInput::intersection(nodes.cards[0], 0.1));
    assert!(host.has_class(nodes.cards[0], "visible"));

    page.dispatch(&mut host, PageInput::intersection(nodes.cards[0], 0.0));
    assert!(host.has_class(nodes.cards[0], "visible"));
    assert!(page.reveal().is_revealed(nodes.cards[0]));
}

#[test]
fn test_scroll_burst_runs_nav_once_per_frame() {
    let (mut host, nodes) = build_page(1440.0);
    let (mut page, mut event_loop) = ready(&mut host);

    for y in [20.0, 60.0, 90.0, 130.0, 160.0] {
        scroll(&mut page, &mut host, &mut event_loop, y);
    }
    assert_eq!(event_loop.frames, 1);

    event_loop.run_frame(&mut page, &mut host);
    assert_eq!(event_loop.frame_callbacks_run, 1);
    assert_eq!(
        host.style(nodes.nav, "background").as_deref(),
        Some("rgba(10, 10, 11, 0.95)")
    );
    assert_eq!(
        host.style(nodes.nav, "transform").as_deref(),
        Some("translateY(-100%)")
    );

    // 向上滚动立即展开
    scroll(&mut page, &mut host, &mut event_loop, 120.0);
    event_loop.run_frame(&mut page, &mut host);
    assert_eq!(event_loop.frame_callbacks_run, 2);
    assert_eq!(
        host.style(nodes.nav, "transform").as_deref(),
        Some("translateY(0)")
    );

    // 回到顶部恢复半透明
    scroll(&mut page, &mut host, &mut event_loop, 0.0);
    event_loop.run_frame(&mut page, &mut host);
    assert_eq!(
        host.style(nodes.nav, "background").as_deref(),
        Some("rgba(10, 10, 11, 0.8)")
    );
}

#[test]
fn test_scroll_updates_active_link_without_throttle() {
    let (mut host, nodes) = build_page(1440.0);
    let (mut page, mut event_loop) = ready(&mut host);

    scroll(&mut page, &mut host, &mut event_loop, 550.0);
    // 帧尚未执行，高亮已更新
    assert!(host.has_class(nodes.links[1], "active"));
    assert!(!host.has_class(nodes.links[0], "active"));
    assert!(!host.has_class(nodes.links[2], "active"));

    scroll(&mut page, &mut host, &mut event_loop, 950.0);
    assert!(host.has_class(nodes.links[2], "active"));
    assert!(!host.has_class(nodes.links[1], "active"));
}

#[test]
fn test_anchor_clicks() {
    let (mut host, nodes) = build_page(1440.0);
    let (mut page, _) = ready(&mut host);

    let response = page.dispatch(&mut host, PageInput::click(nodes.to_work));
    assert!(response.default_prevented);
    assert_eq!(host.scroll_calls().len(), 1);
    assert_eq!(host.scroll_calls()[0], 420.0);

    let response = page.dispatch(&mut host, PageInput::click(nodes.to_missing));
    assert!(response.default_prevented);
    assert_eq!(host.scroll_calls().len(), 1);
}

#[test]
fn test_unresolved_anchor_can_fall_back_to_native() {
    let (mut host, nodes) = build_page(1440.0);
    let config =
        PageConfig::from_json(r#"{ "anchors": { "swallow_unresolved": false } }"#).unwrap();
    let (mut page, _) = Page::ready(config, &mut host);

    let response = page.dispatch(&mut host, PageInput::click(nodes.to_missing));
    assert!(!response.default_prevented);
    assert!(host.scroll_calls().is_empty());
}

#[test]
fn test_typing_once_per_session() {
    let (mut host, nodes) = build_page(1440.0);
    let (mut page, mut event_loop) = ready(&mut host);

    assert_eq!(page.typing().state(), &TypingState::Waiting);
    assert_eq!(host.inner_html(nodes.code), "");

    let elapsed = event_loop.run_timers(&mut page, &mut host);
    let chars = CODE_TEXT.chars().count() as u32;
    // 启动延时 + 每个字符一次 + 收尾一次
    assert_eq!(
        elapsed,
        Duration::from_millis(1000) + Duration::from_millis(15) * chars
    );
    assert_eq!(page.typing().state(), &TypingState::Done);
    assert_eq!(host.inner_html(nodes.code), CODE_HTML);
    assert_eq!(host.get("typingDone").as_deref(), Some("true"));

    // 同一会话内重新加载
    let mut reloaded = host.reload();
    let wrapper = reloaded.insert(Element::new("div").class("code-content"));
    let code = reloaded.insert(Element::new("code").parent(wrapper).html(CODE_HTML));
    let (page, response) = Page::ready(PageConfig::default(), &mut reloaded);

    assert!(response.schedule.is_empty());
    assert_eq!(page.typing().state(), &TypingState::Done);
    assert_eq!(reloaded.inner_html(code), CODE_HTML);
}

#[test]
fn test_parallax_gate_and_center() {
    let (mut host, nodes) = build_page(768.0);
    let (mut page, _) = ready(&mut host);
    assert!(!page.listeners().pointer);
    page.dispatch(&mut host, PageInput::pointer(10.0, 10.0));
    assert_eq!(host.style(nodes.orbs[0], "transform"), None);

    let (mut host, nodes) = build_page(1200.0);
    let (mut page, _) = ready(&mut host);
    assert!(page.listeners().pointer);
    page.dispatch(&mut host, PageInput::pointer(600.0, 450.0));
    for &orb in &nodes.orbs {
        assert_eq!(
            host.style(orb, "transform").as_deref(),
            Some("translate(0px, 0px)")
        );
    }
}

#[test]
fn test_empty_page_is_inert() {
    let mut host = HeadlessHost::new(1440.0, 900.0);
    let (mut page, response) = Page::ready(PageConfig::default(), &mut host);

    assert!(response.is_empty());
    let listeners = page.listeners();
    assert!(listeners.observe.is_empty());
    assert!(listeners.anchors.is_empty());

    host.set_scroll_y(300.0);
    assert!(page.dispatch(&mut host, PageInput::Scroll).is_empty());
    assert!(page.dispatch(&mut host, PageInput::AnimationFrame).is_empty());
    assert!(
        page.dispatch(&mut host, PageInput::pointer(1.0, 1.0))
            .is_empty()
    );
}
