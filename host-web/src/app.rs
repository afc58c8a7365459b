//! # App 模块
//!
//! 把浏览器事件接到 [`Page`] 上。
//!
//! ## 事件链路
//!
//! ```text
//! 浏览器事件 -> PageInput -> Page::dispatch -> Response
//!                                             ├─ default_prevented -> event.preventDefault()
//!                                             ├─ NextFrame         -> requestAnimationFrame
//!                                             └─ Timer             -> setTimeout
//! ```
//!
//! 监听器与页面同生命周期，闭包通过 `forget` 交给 JS 持有。

use std::cell::RefCell;
use std::rc::Rc;

use folio_runtime::{FxResult, Listeners, Page, PageConfig, PageInput, Schedule};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent,
};

use crate::error::{HostResult, describe};
use crate::web_host::WebHost;

/// 页面内联配置所在元素的 id
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Runtime 与宿主
pub struct App {
    page: Page,
    host: WebHost,
}

type Shared = Rc<RefCell<App>>;

/// 读取页面内联配置；不存在时使用默认值
pub fn load_config(host: &WebHost) -> FxResult<PageConfig> {
    match host.inline_config(CONFIG_ELEMENT_ID) {
        Some(text) => PageConfig::from_json(&text),
        None => Ok(PageConfig::default()),
    }
}

/// 初始化所有效果并挂载监听
pub fn boot(config: PageConfig, mut host: WebHost) -> HostResult<()> {
    let (page, response) = Page::ready(config, &mut host);
    let listeners = page.listeners();

    let app: Shared = Rc::new(RefCell::new(App { page, host }));

    attach(&app, &listeners)?;
    schedule(&app, response.schedule);

    info!("folio host attached");
    Ok(())
}

/// 分发一个输入，并处理返回的结果
fn dispatch(app: &Shared, input: PageInput, event: Option<&Event>) {
    let response = {
        let Ok(mut guard) = app.try_borrow_mut() else {
            warn!(?input, "re-entrant dispatch dropped");
            return;
        };
        let App { page, host } = &mut *guard;
        page.dispatch(host, input)
    };

    if response.default_prevented
        && let Some(event) = event
    {
        event.prevent_default();
    }
    schedule(app, response.schedule);
}

/// 安排 Runtime 请求的回调
fn schedule(app: &Shared, requests: Vec<Schedule>) {
    if requests.is_empty() {
        return;
    }
    let window = app.borrow().host.window().clone();

    for request in requests {
        let result = match request {
            Schedule::NextFrame => {
                let app = app.clone();
                let callback = Closure::once_into_js(move || {
                    dispatch(&app, PageInput::AnimationFrame, None);
                });
                window
                    .request_animation_frame(callback.unchecked_ref())
                    .map(|_| ())
            }
            Schedule::Timer { kind, delay } => {
                let app = app.clone();
                let callback = Closure::once_into_js(move || {
                    dispatch(&app, PageInput::Timer(kind), None);
                });
                let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback.unchecked_ref(),
                        millis,
                    )
                    .map(|_| ())
            }
        };

        if let Err(e) = result {
            warn!(error = %describe(&e), "failed to schedule callback");
        }
    }
}

/// 按 Runtime 的要求挂载监听
fn attach(app: &Shared, listeners: &Listeners) -> HostResult<()> {
    let window = app.borrow().host.window().clone();

    if listeners.scroll {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);

        let shared = app.clone();
        let on_scroll = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&shared, PageInput::Scroll, Some(&event));
        });
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &options,
        )?;
        on_scroll.forget();
    }

    if listeners.pointer {
        let shared = app.clone();
        let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let input = PageInput::pointer(f64::from(event.client_x()), f64::from(event.client_y()));
            dispatch(&shared, input, None);
        });
        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    for &anchor in &listeners.anchors {
        let Some(element) = app.borrow().host.element(anchor).cloned() else {
            continue;
        };
        let shared = app.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&shared, PageInput::click(anchor), Some(&event));
        });
        element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    if !listeners.observe.is_empty() {
        observe(app, listeners)?;
    }

    debug!(
        anchors = listeners.anchors.len(),
        observed = listeners.observe.len(),
        pointer = listeners.pointer,
        "listeners attached"
    );
    Ok(())
}

/// 观察器在越过阈值时回报的比例带有浮点误差（如 0.09999），保留三位小数
fn observed_ratio(ratio: f64) -> f64 {
    (ratio * 1000.0).round() / 1000.0
}

/// 创建可见性观察器
fn observe(app: &Shared, listeners: &Listeners) -> HostResult<()> {
    let shared = app.clone();
    let on_entries = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let node = shared.borrow().host.node_of(&entry.target());
            if let Some(node) = node {
                let input = PageInput::Intersection {
                    node,
                    is_intersecting: entry.is_intersecting(),
                    ratio: observed_ratio(entry.intersection_ratio()),
                };
                dispatch(&shared, input, None);
            }
        }
    });

    let init = IntersectionObserverInit::new();
    init.set_root_margin("0px");
    init.set_threshold(&listeners.observe_threshold.into());

    let observer = IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init)?;
    on_entries.forget();

    let app = app.borrow();
    for &node in &listeners.observe {
        if let Some(element) = app.host.element(node) {
            observer.observe(element);
        }
    }
    Ok(())
}
