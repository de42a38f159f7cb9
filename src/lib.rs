#![cfg(target_arch = "wasm32")]
use drive_core::{DriveConfig, DriveSession, FrameClock, PlaybackMonitor, Reconciler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod hud;
mod keys;
mod overlay;
mod render;
mod socket;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_menu_buttons(document: &web::Document, paused: &Rc<RefCell<bool>>) {
    let paused_play = paused.clone();
    dom::add_click_listener(document, "menu-play", move || {
        let mut p = paused_play.borrow_mut();
        *p = !*p;
        log::info!("[menu] {}", if *p { "paused" } else { "playing" });
    });

    let doc_close = document.clone();
    dom::add_click_listener(document, "menu-close", move || {
        overlay::hide(&doc_close);
    });
}

fn wire_teardown(frame_ctx: &Rc<RefCell<frame::FrameContext>>) {
    let ctx = frame_ctx.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        ctx.borrow_mut().teardown();
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("drive-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the backing store at CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let seed = js_sys::Date::now() as u64;
    let session = DriveSession::new(DriveConfig::default(), seed)?;
    log::info!(
        "[drive] seed={} capacity={}",
        seed,
        session.traffic().capacity()
    );

    let clock = FrameClock::default();
    let renderer = match render::CanvasRenderer::new(&canvas, &document, 0.0) {
        Ok(r) => Some(r),
        Err(e) => {
            log::error!("[render] canvas unavailable, running without visuals: {:?}", e);
            None
        }
    };

    let monitor = Rc::new(RefCell::new(PlaybackMonitor::default()));
    let paused = Rc::new(RefCell::new(true));
    let socket_state = Rc::new(RefCell::new(socket::SocketState::default()));

    // The menu is the start screen; play from it, a key, or the first relayed note.
    overlay::show(&document);
    wire_menu_buttons(&document, &paused);
    events::wire_global_keydown(&document, paused.clone());

    let url = hud::resolve_socket_url(dom::query_param(constants::SOCKET_QUERY_PARAM));
    log::info!("[socket] relay {}", url);
    socket::connect(socket::SocketWiring {
        url,
        monitor: monitor.clone(),
        paused: paused.clone(),
        state: socket_state.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        reconciler: Reconciler::new(),
        renderer,
        monitor,
        paused,
        socket_state,
        document,
        clock,
        hud_accum: constants::HUD_REFRESH_SEC,
        was_playing: false,
        stopped: false,
    }));
    wire_teardown(&frame_ctx);
    frame::start_loop(frame_ctx);
    Ok(())
}
