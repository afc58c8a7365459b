//! # Effects 模块
//!
//! 页面上的各个独立效果。每个效果自己持有状态，彼此之间没有依赖。
//!
//! ## 模块结构
//!
//! - [`reveal`]：滚动显现
//! - [`nav_bar`]：导航栏透明度与收起
//! - [`smooth_scroll`]：锚点平滑滚动
//! - [`typing`]：代码打字效果
//! - [`parallax`]：鼠标视差
//! - [`active_nav`]：导航链接高亮

pub mod active_nav;
pub mod nav_bar;
pub mod parallax;
pub mod reveal;
pub mod smooth_scroll;
pub mod typing;

pub use active_nav::ActiveNav;
pub use nav_bar::NavBar;
pub use parallax::Parallax;
pub use reveal::Reveal;
pub use smooth_scroll::{AnchorOutcome, SmoothScroll};
pub use typing::{Typing, TypingState};
