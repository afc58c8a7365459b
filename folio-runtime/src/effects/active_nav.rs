//! # ActiveNav 模块
//!
//! 根据滚动位置高亮对应的导航链接。
//!
//! 每次滚动（不节流）按文档顺序扫描带 id 的区块，
//! 取最后一个 `scroll_y >= offset_top - offset` 的区块为当前区块，
//! 然后清除所有链接的高亮，只给 `href == "#当前id"` 的链接加上。

use crate::config::ActiveNavConfig;
use crate::host::{Document, NodeId, Viewport};

/// 导航链接高亮效果
#[derive(Debug, Clone)]
pub struct ActiveNav {
    sections: Vec<NodeId>,
    links: Vec<NodeId>,
    config: ActiveNavConfig,
}

impl ActiveNav {
    pub fn init<D: Document>(
        dom: &mut D,
        sections_selector: &str,
        links_selector: &str,
        config: &ActiveNavConfig,
    ) -> Self {
        Self {
            sections: dom.query_all(sections_selector),
            links: dom.query_all(links_selector),
            config: config.clone(),
        }
    }

    /// 当前区块的 id；没有区块满足条件时为空串
    pub fn current_section<H: Document + Viewport>(&self, host: &H) -> String {
        let scroll_y = host.scroll_y();
        self.sections
            .iter()
            .rev()
            .find(|&&section| scroll_y >= host.offset_top(section) - self.config.offset)
            .and_then(|&section| host.attribute(section, "id"))
            .unwrap_or_default()
    }

    /// 滚动事件：更新链接高亮，返回当前区块 id
    pub fn on_scroll<H: Document + Viewport>(&self, host: &mut H) -> String {
        let current = self.current_section(host);
        let wanted = format!("#{current}");

        for &link in &self.links {
            host.remove_class(link, &self.config.active_class);
            if host.attribute(link, "href").as_deref() == Some(wanted.as_str()) {
                host.add_class(link, &self.config.active_class);
            }
        }

        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Element, HeadlessHost};

    struct Page {
        host: HeadlessHost,
        links: Vec<NodeId>,
        nav: ActiveNav,
    }

    fn page() -> Page {
        let mut host = HeadlessHost::new(1280.0, 800.0);
        let list = host.insert(Element::new("ul").class("nav-links"));
        let links: Vec<NodeId> = ["#a", "#b", "#c"]
            .iter()
            .map(|href| host.insert(Element::new("a").attr("href", href).parent(list)))
            .collect();
        host.insert(Element::new("section").id("a").top(0.0));
        host.insert(Element::new("section").id("b").top(500.0));
        host.insert(Element::new("section").id("c").top(1000.0));
        // 没有 id 的区块不参与
        host.insert(Element::new("section").top(1500.0));

        let nav = ActiveNav::init(
            &mut host,
            "section[id]",
            ".nav-links a",
            &ActiveNavConfig::default(),
        );
        Page { host, links, nav }
    }

    fn active(page: &Page) -> Vec<bool> {
        page.links
            .iter()
            .map(|&l| page.host.has_class(l, "active"))
            .collect()
    }

    #[test]
    fn test_middle_section_active() {
        let mut page = page();
        page.host.set_scroll_y(550.0);
        assert_eq!(page.nav.on_scroll(&mut page.host), "b");
        assert_eq!(active(&page), vec![false, true, false]);
    }

    #[test]
    fn test_offset_applies_before_section_top() {
        let mut page = page();
        // 1000 - 100 = 900
        page.host.set_scroll_y(899.0);
        assert_eq!(page.nav.on_scroll(&mut page.host), "b");
        page.host.set_scroll_y(900.0);
        assert_eq!(page.nav.on_scroll(&mut page.host), "c");
        assert_eq!(active(&page), vec![false, false, true]);
    }

    #[test]
    fn test_active_moves_back_up() {
        let mut page = page();
        page.host.set_scroll_y(2000.0);
        page.nav.on_scroll(&mut page.host);
        page.host.set_scroll_y(0.0);
        assert_eq!(page.nav.on_scroll(&mut page.host), "a");
        assert_eq!(active(&page), vec![true, false, false]);
    }

    #[test]
    fn test_no_sections_clears_all() {
        let mut host = HeadlessHost::new(1280.0, 800.0);
        let list = host.insert(Element::new("ul").class("nav-links"));
        let link = host.insert(
            Element::new("a")
                .attr("href", "#a")
                .class("active")
                .parent(list),
        );
        let nav = ActiveNav::init(
            &mut host,
            "section[id]",
            ".nav-links a",
            &ActiveNavConfig::default(),
        );

        assert_eq!(nav.on_scroll(&mut host), "");
        assert!(!host.has_class(link, "active"));
    }

    #[test]
    fn test_bare_hash_link_active_when_no_section_matches() {
        let mut host = HeadlessHost::new(1280.0, 800.0);
        let list = host.insert(Element::new("ul").class("nav-links"));
        let top = host.insert(Element::new("a").attr("href", "#").parent(list));
        let about = host.insert(Element::new("a").attr("href", "#about").parent(list));
        host.insert(Element::new("section").id("about").top(800.0));
        let nav = ActiveNav::init(
            &mut host,
            "section[id]",
            ".nav-links a",
            &ActiveNavConfig::default(),
        );

        host.set_scroll_y(0.0);
        assert_eq!(nav.on_scroll(&mut host), "");
        assert!(host.has_class(top, "active"));
        assert!(!host.has_class(about, "active"));
    }
}
