//! # Host Web
//!
//! 浏览器宿主：在 wasm32 上实现 `folio-runtime` 的宿主能力并挂载事件监听。
//!
//! ## 启动流程
//!
//! 1. 绑定 window/document，读取页面内联配置
//! 2. 按配置安装日志
//! 3. 若文档仍在加载，等待 `DOMContentLoaded`；否则立即初始化
//!
//! ## 模块结构
//!
//! - [`web_host`]：`web-sys` 上的宿主能力实现
//! - [`app`]：事件监听与调度
//! - [`logging`]：`tracing` 到控制台的桥接
//! - [`error`]：错误类型定义

pub mod app;
pub mod error;
pub mod logging;
pub mod web_host;

use tracing::{error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

pub use error::{HostError, HostResult};
pub use web_host::WebHost;

/// wasm 模块入口
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let host = WebHost::new()?;
    let loaded = app::load_config(&host);
    let config = loaded.clone().unwrap_or_default();
    logging::init(&config.debug.log_level);
    if let Err(e) = loaded {
        warn!(error = %e, "invalid inline config, using defaults");
    }

    if host.document().ready_state() != "loading" {
        return app::boot(config, host).map_err(JsValue::from);
    }

    let document = host.document().clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(e) = app::boot(config, host) {
            error!(error = %e, "failed to boot page effects");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}
