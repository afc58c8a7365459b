//! # Input 模块
//!
//! 定义 Host 向 Runtime 传递的输入事件。
//!
//! ## 设计说明
//!
//! - `PageInput` 是 Host 采集浏览器事件后，传递给 Runtime 的抽象输入
//! - Runtime 不直接处理 `Event` 对象，只处理语义化的输入
//! - `AnimationFrame` 与 `Timer` 只在 Runtime 通过 [`crate::Schedule`] 请求后才会到来

use crate::host::NodeId;
use crate::schedule::TimerKind;

/// Host 向 Runtime 传递的输入
#[derive(Debug, Clone, PartialEq)]
pub enum PageInput {
    /// 窗口滚动
    Scroll,

    /// 动画帧回调（响应 `Schedule::NextFrame`）
    AnimationFrame,

    /// 页内锚点被点击
    AnchorClick { anchor: NodeId },

    /// 鼠标移动（视口坐标）
    PointerMove { client_x: f64, client_y: f64 },

    /// 可见性观察回调
    Intersection {
        node: NodeId,
        is_intersecting: bool,
        ratio: f64,
    },

    /// 定时器到期（响应 `Schedule::Timer`）
    Timer(TimerKind),
}

impl PageInput {
    /// 创建锚点点击输入
    pub fn click(anchor: NodeId) -> Self {
        Self::AnchorClick { anchor }
    }

    /// 创建鼠标移动输入
    pub fn pointer(client_x: f64, client_y: f64) -> Self {
        Self::PointerMove { client_x, client_y }
    }

    /// 创建可见性输入
    pub fn intersection(node: NodeId, ratio: f64) -> Self {
        Self::Intersection {
            node,
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }
}
