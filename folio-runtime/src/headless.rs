//! # Headless 模块
//!
//! 不依赖浏览器的内存宿主实现。
//!
//! 提供一个极简的元素树（标签、class、属性、内联样式、几何、内容），
//! 以及视口、会话存储和控制台的记录，用于测试与离线演练。
//!
//! ## 选择器子集
//!
//! - `tag`、`.class`、`#id`
//! - `[attr]`、`[attr="v"]`、`[attr^="v"]`
//! - 复合（`section[id]`）、后代（`.code-content code`）、逗号列表
//!
//! ```rust,ignore
//! let mut host = HeadlessHost::new(1280.0, 800.0);
//! let nav = host.insert(Element::new("nav").class("nav"));
//! host.set_scroll_y(120.0);
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::error::{FxError, FxResult};
use crate::host::{Console, Document, NodeId, SessionStore, Viewport};

/// 元素描述
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub parent: Option<NodeId>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub offset_top: f64,
    pub html: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn top(mut self, offset_top: f64) -> Self {
        self.offset_top = offset_top;
        self
    }

    pub fn html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }
}

/// 一次控制台输出
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleLine {
    pub message: String,
    pub styles: Vec<String>,
}

/// 内存宿主
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    /// 按文档顺序排列（插入顺序即文档顺序）
    elements: Vec<Element>,
    scroll_y: f64,
    width: f64,
    height: f64,
    session: HashMap<String, String>,
    /// 为真时会话写入失败（模拟存储被禁用）
    session_read_only: bool,
    /// 每次平滑滚动的目标纵坐标
    scroll_calls: Vec<f64>,
    console: Vec<ConsoleLine>,
}

impl HeadlessHost {
    /// 创建指定视口尺寸的宿主
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// 追加元素，返回其句柄
    pub fn insert(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    /// 获取元素
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0 as usize)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0 as usize)
    }

    /// 设置滚动位置（不记录为平滑滚动）
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// 让后续的会话写入失败
    pub fn set_session_read_only(&mut self, read_only: bool) {
        self.session_read_only = read_only;
    }

    /// 清空会话之外的一切，模拟同一标签页内重新加载页面
    pub fn reload(&self) -> Self {
        Self {
            session: self.session.clone(),
            width: self.width,
            height: self.height,
            ..Default::default()
        }
    }

    pub fn scroll_calls(&self) -> &[f64] {
        &self.scroll_calls
    }

    pub fn console(&self) -> &[ConsoleLine] {
        &self.console
    }

    /// 祖先节点，由近及远
    fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.element(node).and_then(|el| el.parent);
        std::iter::from_fn(move || {
            let id = current?;
            current = self.element(id).and_then(|el| el.parent);
            Some(id)
        })
    }

    fn matches_chain(&self, node: NodeId, chain: &[Compound]) -> bool {
        let Some((last, rest)) = chain.split_last() else {
            return false;
        };
        let Some(el) = self.element(node) else {
            return false;
        };
        if !last.matches(el) {
            return false;
        }

        // 从右往左，为每一段找到最近的匹配祖先
        let mut remaining = rest;
        for ancestor in self.ancestors(node) {
            let Some((wanted, before)) = remaining.split_last() else {
                break;
            };
            if self.element(ancestor).is_some_and(|el| wanted.matches(el)) {
                remaining = before;
            }
        }
        remaining.is_empty()
    }
}

impl Document for HeadlessHost {
    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let chains: Vec<Vec<Compound>> = selector
            .split(',')
            .map(|part| part.split_whitespace().map(Compound::parse).collect())
            .filter(|chain: &Vec<Compound>| !chain.is_empty())
            .collect();

        (0..self.elements.len() as u32)
            .map(NodeId)
            .filter(|&node| chains.iter().any(|chain| self.matches_chain(node, chain)))
            .collect()
    }

    fn element_by_id(&mut self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.elements
            .iter()
            .position(|el| el.attributes.get("id").is_some_and(|v| v == id))
            .map(|i| NodeId(i as u32))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.element(node)?.styles.get(property).cloned()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let el = self.element(node)?;
        if name == "class" {
            return Some(el.classes.join(" "));
        }
        el.attributes.get(name).cloned()
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.element(node).map_or(0.0, |el| el.offset_top)
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|el| el.html.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        if let Some(el) = self.element_mut(node) {
            el.html = html.to_string();
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        self.element(node)
            .map(|el| strip_tags(&el.html))
            .unwrap_or_default()
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element_mut(node) {
            el.html = escape_text(text);
        }
    }
}

impl Viewport for HeadlessHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn inner_width(&self) -> f64 {
        self.width
    }

    fn inner_height(&self) -> f64 {
        self.height
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.scroll_calls.push(top);
        self.scroll_y = top.max(0.0);
    }
}

impl SessionStore for HeadlessHost {
    fn get(&self, key: &str) -> Option<String> {
        self.session.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> FxResult<()> {
        if self.session_read_only {
            return Err(FxError::storage(key, "session storage is read-only"));
        }
        self.session.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl Console for HeadlessHost {
    fn log_styled(&mut self, message: &str, styles: &[&str]) {
        self.console.push(ConsoleLine {
            message: message.to_string(),
            styles: styles.iter().map(|s| s.to_string()).collect(),
        });
    }
}

//=============================================================================
// 选择器
//=============================================================================

/// 属性条件
#[derive(Debug, Clone, PartialEq)]
enum AttrMatch {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

/// 复合选择器（不含组合符）
#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn parse(text: &str) -> Self {
        let mut compound = Compound::default();
        let mut rest = text;

        let tag_end = rest.find(['.', '#', '[']).unwrap_or(rest.len());
        if tag_end > 0 && &rest[..tag_end] != "*" {
            compound.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(first) = rest.chars().next() {
            match first {
                '.' | '#' => {
                    let body = &rest[1..];
                    let end = body.find(['.', '#', '[']).unwrap_or(body.len());
                    let name = body[..end].to_string();
                    if first == '.' {
                        compound.classes.push(name);
                    } else {
                        compound.id = Some(name);
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let end = rest.find(']').unwrap_or(rest.len());
                    compound.attrs.push(parse_attr(&rest[1..end]));
                    rest = rest.get(end + 1..).unwrap_or("");
                }
                _ => break,
            }
        }

        compound
    }

    fn matches(&self, el: &Element) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != el.tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if el.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if !self
            .classes
            .iter()
            .all(|class| el.classes.iter().any(|c| c == class))
        {
            return false;
        }
        self.attrs.iter().all(|attr| match attr {
            AttrMatch::Exists(name) => el.attributes.contains_key(name),
            AttrMatch::Equals(name, value) => el.attributes.get(name) == Some(value),
            AttrMatch::Prefix(name, value) => el
                .attributes
                .get(name)
                .is_some_and(|v| v.starts_with(value.as_str())),
        })
    }
}

fn parse_attr(body: &str) -> AttrMatch {
    let unquote = |v: &str| v.trim().trim_matches(['"', '\'']).to_string();
    if let Some((name, value)) = body.split_once("^=") {
        AttrMatch::Prefix(name.trim().to_string(), unquote(value))
    } else if let Some((name, value)) = body.split_once('=') {
        AttrMatch::Equals(name.trim().to_string(), unquote(value))
    } else {
        AttrMatch::Exists(body.trim().to_string())
    }
}

//=============================================================================
// 内容
//=============================================================================

/// 去掉标签并解码基本实体
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
