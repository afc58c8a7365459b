//! # Host 模块
//!
//! Runtime 对宿主环境的全部依赖都通过这里的 trait 表达。
//!
//! ## 设计说明
//!
//! - Runtime 不持有真实的 DOM 节点，只持有宿主分配的 [`NodeId`]
//! - 读（几何、属性、文本）与写（class、内联样式、内容）都经由 [`Document`]
//! - 视口、会话存储、控制台各自独立成 trait，测试时可以分别替换
//!
//! 浏览器实现在 `host-web` crate；内存实现见 [`crate::headless`]。

use std::fmt;

use crate::error::FxResult;

/// 宿主分配的节点句柄
///
/// 同一个元素在宿主内始终对应同一个 `NodeId`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// DOM 适配接口
pub trait Document {
    /// 按文档顺序返回所有匹配的节点
    fn query_all(&mut self, selector: &str) -> Vec<NodeId>;

    /// 返回第一个匹配的节点
    fn query(&mut self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// 按 id 查找节点
    fn element_by_id(&mut self, id: &str) -> Option<NodeId>;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// 设置内联样式属性（CSS 属性名，如 `transition-delay`）
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// 读取内联样式属性
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// 元素顶部相对文档的偏移
    fn offset_top(&self, node: NodeId) -> f64;

    fn inner_html(&self, node: NodeId) -> String;

    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// 元素的纯文本内容（不含标记）
    fn text_content(&self, node: NodeId) -> String;

    fn set_text_content(&mut self, node: NodeId, text: &str);
}

/// 视口接口
pub trait Viewport {
    /// 当前垂直滚动偏移
    fn scroll_y(&self) -> f64;

    fn inner_width(&self) -> f64;

    fn inner_height(&self) -> f64;

    /// 以平台缓动滚动到指定的文档纵坐标
    fn smooth_scroll_to(&mut self, top: f64);
}

/// 会话存储接口（随标签页关闭而清空）
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> FxResult<()>;
}

/// 控制台接口
pub trait Console {
    /// 输出带 `%c` 样式指令的消息，`styles` 依次对应每个 `%c`
    fn log_styled(&mut self, message: &str, styles: &[&str]);
}

/// 完整的宿主能力
pub trait Host: Document + Viewport + SessionStore + Console {}

impl<T: Document + Viewport + SessionStore + Console> Host for T {}
