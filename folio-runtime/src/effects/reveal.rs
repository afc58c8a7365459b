//! # Reveal 模块
//!
//! 滚动显现：内容区块与卡片的可见面积达到阈值后添加显现 class。
//!
//! - 单向：离开视口不会移除 class
//! - 卡片按在卡片列表中的序号设置错开的 `transition-delay`

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::{RevealConfig, SelectorConfig};
use crate::host::{Document, NodeId};
use crate::style;

/// 滚动显现效果
#[derive(Debug, Clone)]
pub struct Reveal {
    /// 观察目标（区块在前，卡片在后）
    targets: Vec<NodeId>,
    /// 已显现的节点
    revealed: BTreeSet<NodeId>,
    threshold: f64,
    visible_class: String,
}

impl Reveal {
    /// 查找目标并为卡片设置错开延迟
    pub fn init<D: Document>(dom: &mut D, selectors: &SelectorConfig, config: &RevealConfig) -> Self {
        let mut targets = dom.query_all(&selectors.sections);

        let cards = dom.query_all(&selectors.cards);
        for (index, &card) in cards.iter().enumerate() {
            let delay = style::seconds(index as f64 * config.stagger_seconds);
            dom.set_style(card, "transition-delay", &delay);
        }
        targets.extend(cards);

        debug!(targets = targets.len(), "reveal initialized");

        Self {
            targets,
            revealed: BTreeSet::new(),
            threshold: config.threshold,
            visible_class: config.visible_class.clone(),
        }
    }

    /// Host 需要观察的节点
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// 观察阈值
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 节点是否已显现
    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    /// 处理可见性回调，返回本次是否新显现
    pub fn on_intersection<D: Document>(
        &mut self,
        dom: &mut D,
        node: NodeId,
        is_intersecting: bool,
        ratio: f64,
    ) -> bool {
        if !is_intersecting || ratio < self.threshold {
            return false;
        }
        if !self.targets.contains(&node) || !self.revealed.insert(node) {
            return false;
        }

        dom.add_class(node, &self.visible_class);
        debug!(%node, ratio, "revealed");
        true
    }
}
