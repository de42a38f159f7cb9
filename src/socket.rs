use crate::constants::SOCKET_RECONNECT_DELAY_MS;
use drive_core::{parse_midi_message, NoteKind, PlaybackMonitor};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Connection bookkeeping shown in the menu.
#[derive(Clone, Debug, Default)]
pub struct SocketState {
    pub connected: bool,
    pub messages: u64,
    pub rejected: u64,
}

/// Everything a relay connection feeds.
#[derive(Clone)]
pub struct SocketWiring {
    pub url: String,
    pub monitor: Rc<RefCell<PlaybackMonitor>>,
    pub paused: Rc<RefCell<bool>>,
    pub state: Rc<RefCell<SocketState>>,
}

/// Open a relay connection; on close it retries after a fixed delay.
pub fn connect(w: SocketWiring) {
    let ws = match web::WebSocket::new(&w.url) {
        Ok(ws) => ws,
        Err(e) => {
            log::error!("[socket] cannot open {}: {:?}", w.url, e);
            schedule_reconnect(w);
            return;
        }
    };

    {
        let state = w.state.clone();
        let url = w.url.clone();
        let onopen = Closure::wrap(Box::new(move || {
            state.borrow_mut().connected = true;
            log::info!("[socket] connected to {}", url);
        }) as Box<dyn FnMut()>);
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        onopen.forget();
    }

    {
        let monitor = w.monitor.clone();
        let paused = w.paused.clone();
        let state = w.state.clone();
        let onmessage = Closure::wrap(Box::new(move |ev: web::MessageEvent| {
            let Some(text) = ev.data().as_string() else {
                state.borrow_mut().rejected += 1;
                return;
            };
            handle_message(&text, &monitor, &paused, &state);
        }) as Box<dyn FnMut(_)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();
    }

    {
        let onerror = Closure::wrap(Box::new(move |_ev: web::Event| {
            log::warn!("[socket] connection error");
        }) as Box<dyn FnMut(_)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }

    {
        let wiring = w.clone();
        let onclose = Closure::wrap(Box::new(move |ev: web::CloseEvent| {
            wiring.state.borrow_mut().connected = false;
            // Notes held at disconnect would otherwise keep the drive running.
            wiring.monitor.borrow_mut().release_all();
            log::info!("[socket] closed (code {}); retrying", ev.code());
            schedule_reconnect(wiring.clone());
        }) as Box<dyn FnMut(_)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();
    }
}

fn handle_message(
    text: &str,
    monitor: &Rc<RefCell<PlaybackMonitor>>,
    paused: &Rc<RefCell<bool>>,
    state: &Rc<RefCell<SocketState>>,
) {
    let events = match parse_midi_message(text) {
        Ok(evs) => evs,
        Err(e) => {
            log::warn!("[socket] {}", e);
            state.borrow_mut().rejected += 1;
            return;
        }
    };
    state.borrow_mut().messages += 1;
    let received_ms = js_sys::Date::now();
    let mut m = monitor.borrow_mut();
    for ev in &events {
        let first_note = ev.kind == NoteKind::NoteOn && m.notes_seen() == 0;
        m.ingest(ev, received_ms);
        if first_note {
            // Playback on the relay starts the drive.
            *paused.borrow_mut() = false;
            log::info!("[socket] first note on track {}; starting drive", ev.track);
        }
    }
}

fn schedule_reconnect(w: SocketWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let retry = Closure::once_into_js(move || connect(w));
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        retry.unchecked_ref(),
        SOCKET_RECONNECT_DELAY_MS,
    ) {
        log::error!("[socket] cannot schedule reconnect: {:?}", e);
    }
}
