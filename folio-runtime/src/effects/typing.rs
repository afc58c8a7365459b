//! # Typing 模块
//!
//! 代码窗口的打字效果，每个会话最多播放一次。
//!
//! ## 状态转换
//!
//! ```text
//! NotStarted --init--> Done                      (目标不存在 / 会话已标记完成)
//! NotStarted --init--> Waiting                   (清空内容，请求启动延时)
//! Waiting    --tick--> Typing { revealed: 1 }
//! Typing     --tick--> Typing { revealed + 1 }   (仍有未显示字符)
//! Typing     --tick--> Done                      (恢复原始标记，写入会话标记)
//! ```
//!
//! 打字期间以纯文本逐字显示，完成后恢复原始 HTML 以找回语法高亮。
//! 页面在中途卸载时定时器随页面一起丢弃，无需取消。

use tracing::{debug, warn};

use crate::config::TypingConfig;
use crate::host::{Document, NodeId, SessionStore};
use crate::schedule::{Schedule, TimerKind};

/// 会话标记写入的值
const DONE_MARKER: &str = "true";

/// 打字状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingState {
    NotStarted,
    /// 已清空，等待启动延时
    Waiting,
    /// 已显示 `revealed` 个字符
    Typing { revealed: usize },
    Done,
}

/// 打字效果
#[derive(Debug, Clone)]
pub struct Typing {
    state: TypingState,
    target: Option<NodeId>,
    /// 原始标记（完成后恢复）
    original_html: String,
    /// 原始纯文本
    text: String,
    /// 每个字符结束处的字节偏移
    boundaries: Vec<usize>,
    config: TypingConfig,
}

impl Typing {
    /// 创建未开始的效果
    pub fn new(config: &TypingConfig) -> Self {
        Self {
            state: TypingState::NotStarted,
            target: None,
            original_html: String::new(),
            text: String::new(),
            boundaries: Vec::new(),
            config: config.clone(),
        }
    }

    pub fn state(&self) -> &TypingState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == TypingState::Done
    }

    /// 启动：检查会话标记，准备目标元素
    ///
    /// 返回需要安排的启动延时；无需播放时返回 `None`。
    pub fn start<H: Document + SessionStore>(&mut self, host: &mut H, selector: &str) -> Option<Schedule> {
        if self.state != TypingState::NotStarted {
            return None;
        }

        let Some(target) = host.query(selector) else {
            debug!(selector, "typing target not found");
            self.state = TypingState::Done;
            return None;
        };

        if host
            .get(&self.config.session_key)
            .is_some_and(|v| !v.is_empty())
        {
            debug!(key = %self.config.session_key, "typing already done this session");
            self.state = TypingState::Done;
            return None;
        }

        self.target = Some(target);
        self.original_html = host.inner_html(target);
        self.text = host.text_content(target);
        self.boundaries = self
            .text
            .char_indices()
            .map(|(i, ch)| i + ch.len_utf8())
            .collect();

        host.set_inner_html(target, "");
        host.set_style(target, "opacity", "1");
        self.state = TypingState::Waiting;

        debug!(chars = self.boundaries.len(), "typing scheduled");
        Some(Schedule::timer(TimerKind::TypingTick, self.config.start_delay()))
    }

    /// 推进一步，返回下一次需要的延时
    pub fn tick<H: Document + SessionStore>(&mut self, host: &mut H) -> Option<Schedule> {
        let target = self.target?;

        let revealed = match self.state {
            TypingState::Waiting => 0,
            TypingState::Typing { revealed } => revealed,
            TypingState::NotStarted | TypingState::Done => return None,
        };

        if revealed < self.boundaries.len() {
            let end = self.boundaries[revealed];
            host.set_text_content(target, &self.text[..end]);
            self.state = TypingState::Typing {
                revealed: revealed + 1,
            };
            return Some(Schedule::timer(
                TimerKind::TypingTick,
                self.config.char_interval(),
            ));
        }

        self.finish(host, target);
        None
    }

    fn finish<H: Document + SessionStore>(&mut self, host: &mut H, target: NodeId) {
        host.set_inner_html(target, &self.original_html);
        if let Err(e) = host.set(&self.config.session_key, DONE_MARKER) {
            warn!(error = %e, "failed to persist typing flag");
        }
        self.state = TypingState::Done;
        debug!("typing done");
    }
}
