//! # WebHost 模块
//!
//! 基于 `web-sys` 的宿主能力实现。
//!
//! ## 节点句柄
//!
//! Runtime 只认识 [`NodeId`]。每个交给 Runtime 的元素都登记在 `nodes` 中，
//! 下标即句柄；同一元素重复查询时返回同一个句柄。
//!
//! DOM 调用失败时记录警告并按"元素不存在"处理，不向 Runtime 抛错。

use folio_runtime::{
    Console, Document, FxError, FxResult, NodeId, SessionStore, Viewport,
};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions, Storage, Window};

use crate::error::{HostError, HostResult, describe};

/// 浏览器宿主
pub struct WebHost {
    window: Window,
    document: web_sys::Document,
    /// 会话存储被禁用时为 `None`
    session: Option<Storage>,
    /// 已登记的元素（下标即 `NodeId`）
    nodes: Vec<Element>,
}

impl WebHost {
    /// 绑定当前页面
    pub fn new() -> HostResult<Self> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;

        let session = match window.session_storage() {
            Ok(storage) => storage,
            Err(e) => {
                warn!(error = %describe(&e), "session storage unavailable");
                None
            }
        };

        Ok(Self {
            window,
            document,
            session,
            nodes: Vec::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    /// 登记元素，返回其句柄
    pub fn register(&mut self, element: Element) -> NodeId {
        if let Some(index) = self.nodes.iter().position(|known| *known == element) {
            return NodeId(index as u32);
        }
        self.nodes.push(element);
        NodeId((self.nodes.len() - 1) as u32)
    }

    /// 查找已登记元素的句柄
    pub fn node_of(&self, element: &Element) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|known| known == element)
            .map(|index| NodeId(index as u32))
    }

    /// 句柄对应的元素
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0 as usize)
    }

    fn html_element(&self, node: NodeId) -> Option<&HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>()
    }

    /// 页面内联配置的文本
    pub fn inline_config(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }

    fn number(&self, value: Result<JsValue, JsValue>, what: &str) -> f64 {
        match value {
            Ok(v) => v.as_f64().unwrap_or(0.0),
            Err(e) => {
                warn!(what, error = %describe(&e), "viewport read failed");
                0.0
            }
        }
    }
}

impl Document for WebHost {
    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                warn!(selector, error = %describe(&e), "invalid selector");
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.register(element))
            .collect()
    }

    fn element_by_id(&mut self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        let element = self.document.get_element_by_id(id)?;
        Some(self.register(element))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            if let Err(e) = el.class_list().add_1(class) {
                warn!(%node, class, error = %describe(&e), "add class failed");
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            if let Err(e) = el.class_list().remove_1(class) {
                warn!(%node, class, error = %describe(&e), "remove class failed");
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.html_element(node) {
            if let Err(e) = el.style().set_property(property, value) {
                warn!(%node, property, error = %describe(&e), "set style failed");
            }
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let value = self
            .html_element(node)?
            .style()
            .get_property_value(property)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.html_element(node)
            .map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|el| el.inner_html())
            .unwrap_or_default()
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        if let Some(el) = self.element(node) {
            el.set_inner_html(html);
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            el.set_text_content(Some(text));
        }
    }
}

impl Viewport for WebHost {
    fn scroll_y(&self) -> f64 {
        match self.window.scroll_y() {
            Ok(y) => y,
            Err(e) => {
                warn!(error = %describe(&e), "scrollY read failed");
                0.0
            }
        }
    }

    fn inner_width(&self) -> f64 {
        self.number(self.window.inner_width(), "innerWidth")
    }

    fn inner_height(&self) -> f64 {
        self.number(self.window.inner_height(), "innerHeight")
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl SessionStore for WebHost {
    fn get(&self, key: &str) -> Option<String> {
        self.session.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> FxResult<()> {
        let storage = self
            .session
            .as_ref()
            .ok_or_else(|| FxError::storage(key, "session storage unavailable"))?;
        storage
            .set_item(key, value)
            .map_err(|e| FxError::storage(key, describe(&e)))
    }
}

impl Console for WebHost {
    fn log_styled(&mut self, message: &str, styles: &[&str]) {
        let args = js_sys::Array::new();
        args.push(&JsValue::from_str(message));
        for style in styles {
            args.push(&JsValue::from_str(style));
        }
        web_sys::console::log(&args);
    }
}
