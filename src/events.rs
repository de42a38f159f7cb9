use crate::keys::{action_for_key, KeyAction};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    document: &web::Document,
    paused: &Rc<RefCell<bool>>,
) {
    let key = ev.key();
    let Some(action) = action_for_key(&key) else {
        return;
    };
    match action {
        KeyAction::TogglePlay => {
            let mut p = paused.borrow_mut();
            *p = !*p;
            log::info!("[keys] {}", if *p { "paused" } else { "playing" });
            ev.prevent_default();
        }
        KeyAction::ToggleMenu => overlay::toggle(document),
        KeyAction::ToggleHud => overlay::toggle_hud(document),
    }
}

pub fn wire_global_keydown(document: &web::Document, paused: Rc<RefCell<bool>>) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &doc, &paused);
    }) as Box<dyn FnMut(_)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
