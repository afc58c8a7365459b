//! # Folio Runtime
//!
//! 作品集页面交互效果的核心库。
//!
//! ## 架构概述
//!
//! `folio-runtime` 是纯逻辑核心，不依赖浏览器或真实时间。
//! 它通过宿主能力 trait 读写页面，并通过 **调度请求** 与宿主层（Host）协作：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── PageInput ──────────────────►│
//!   │                                   │ dispatch()
//!   │◄─── Response { default_prevented, schedule } ──│
//!   │                                   │
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! use folio_runtime::{Page, PageConfig, PageInput, Schedule};
//!
//! let (mut page, response) = Page::ready(PageConfig::default(), &mut host);
//! host.schedule(response.schedule);
//!
//! // 浏览器事件到来时
//! let response = page.dispatch(&mut host, PageInput::Scroll);
//! for request in response.schedule {
//!     match request {
//!         Schedule::NextFrame => request_animation_frame(),
//!         Schedule::Timer { kind, delay } => set_timeout(kind, delay),
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`host`]：宿主能力（DOM、视口、会话存储、控制台）
//! - [`input`]：PageInput 定义
//! - [`schedule`]：调度请求与 dispatch 结果
//! - [`effects`]：各个独立效果
//! - [`page`]：效果集合与输入路由
//! - [`config`]：配置
//! - [`error`]：错误类型定义
//! - [`headless`]：内存宿主

pub mod banner;
pub mod config;
pub mod effects;
pub mod error;
pub mod headless;
pub mod host;
pub mod input;
pub mod page;
pub mod schedule;
pub mod style;

// 重导出核心类型
pub use config::PageConfig;
pub use effects::{AnchorOutcome, TypingState};
pub use error::{FxError, FxResult};
pub use host::{Console, Document, Host, NodeId, SessionStore, Viewport};
pub use input::PageInput;
pub use page::{Listeners, Page};
pub use schedule::{Response, Schedule, TimerKind};
