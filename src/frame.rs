use crate::constants::HUD_REFRESH_SEC;
use crate::hud::StatusLine;
use crate::overlay;
use crate::render::CanvasRenderer;
use crate::socket::SocketState;
use drive_core::{DriveSession, FrameClock, PlaybackMonitor, Reconciler, CRUISE_VELOCITY};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: DriveSession,
    pub reconciler: Reconciler,
    pub renderer: Option<CanvasRenderer>,
    pub monitor: Rc<RefCell<PlaybackMonitor>>,
    pub paused: Rc<RefCell<bool>>,
    pub socket_state: Rc<RefCell<SocketState>>,
    pub document: web::Document,
    pub clock: FrameClock,
    pub hud_accum: f32,
    pub was_playing: bool,
    pub stopped: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        if self.stopped {
            return;
        }
        let t = self.clock.tick();
        let playing = !*self.paused.borrow();
        if playing != self.was_playing {
            log::info!("[frame] {}", if playing { "resumed" } else { "paused" });
            self.was_playing = playing;
            self.hud_accum = HUD_REFRESH_SEC;
        }

        let target = {
            let mut m = self.monitor.borrow_mut();
            m.decay(t.dt);
            m.drive_velocity(js_sys::Date::now(), CRUISE_VELOCITY)
        };
        self.session.set_target_velocity(target);
        let snap = self.session.frame(t.dt, t.now, playing);

        if let Some(renderer) = self.renderer.as_mut() {
            self.reconciler.reconcile(&snap.vehicles, &mut *renderer);
            let monitor = self.monitor.borrow();
            renderer.render(snap, monitor.pulses(), t.now);
        }

        self.hud_accum += t.dt;
        if self.hud_accum >= HUD_REFRESH_SEC {
            self.hud_accum = 0.0;
            let status = StatusLine {
                playing,
                connected: self.socket_state.borrow().connected,
                velocity: snap.velocity,
                live_vehicles: snap.vehicles.len(),
            };
            overlay::update(&self.document, &status, self.monitor.borrow().pulses());
        }
    }

    /// Drop every vehicle visual and cached sprite; the loop stops after this.
    pub fn teardown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some(mut renderer) = self.renderer.take() {
            self.reconciler.clear(&mut renderer);
            renderer.teardown();
        }
        log::info!(
            "[frame] teardown after {} frames, {} vehicles live",
            self.session.frames(),
            self.session.traffic().len()
        );
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if frame_ctx_tick.borrow().stopped {
            return;
        }
        let next = tick_clone.borrow();
        if let (Some(w), Some(cb)) = (web::window(), next.as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    let first = tick.borrow();
    if let (Some(w), Some(cb)) = (web::window(), first.as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
