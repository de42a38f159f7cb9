// Text and markup for the music-player menu, kept free of DOM calls.

use crate::constants::{DEFAULT_SOCKET_URL, METER_TRACKS_SHOWN};
use drive_core::TRACK_PULSE_MAX;

/// What the status line reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusLine {
    pub playing: bool,
    pub connected: bool,
    pub velocity: f32,
    pub live_vehicles: usize,
}

pub fn format_status(s: &StatusLine) -> String {
    let state = if s.playing { "Playing" } else { "Paused" };
    let link = if s.connected { "relay connected" } else { "relay offline" };
    format!(
        "{} • {} • speed {:.0} • {} oncoming",
        state, link, s.velocity, s.live_vehicles
    )
}

#[inline]
pub fn play_button_label(playing: bool) -> &'static str {
    if playing {
        "❚❚ Pause"
    } else {
        "▶ Play"
    }
}

/// One vertical bar per track, height following the track pulse.
pub fn meter_html(pulses: &[f32]) -> String {
    let mut html = String::new();
    for p in pulses.iter().take(METER_TRACKS_SHOWN) {
        let pct = ((p / TRACK_PULSE_MAX).clamp(0.0, 1.0) * 100.0).round() as u32;
        html.push_str(&format!("<span class='meter' style='height:{}%'></span>", pct));
    }
    html
}

/// Socket URL from the `?socket=` query value, falling back to the default relay.
pub fn resolve_socket_url(param: Option<String>) -> String {
    match param {
        Some(url) if url.starts_with("ws://") || url.starts_with("wss://") => url,
        Some(url) => {
            log::warn!("[socket] ignoring non-websocket url {:?}", url);
            DEFAULT_SOCKET_URL.to_string()
        }
        None => DEFAULT_SOCKET_URL.to_string(),
    }
}
