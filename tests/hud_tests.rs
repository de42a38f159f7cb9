// Host-side tests for menu text and socket URL resolution.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod hud {
    include!("../src/hud.rs");
}

use constants::*;
use hud::*;

#[test]
fn status_line_reads_naturally() {
    let s = StatusLine {
        playing: true,
        connected: false,
        velocity: 79.6,
        live_vehicles: 3,
    };
    assert_eq!(
        format_status(&s),
        "Playing • relay offline • speed 80 • 3 oncoming"
    );
    let paused = StatusLine {
        playing: false,
        connected: true,
        velocity: 0.0,
        live_vehicles: 0,
    };
    assert!(format_status(&paused).starts_with("Paused • relay connected"));
}

#[test]
fn play_button_reflects_state() {
    assert!(play_button_label(true).contains("Pause"));
    assert!(play_button_label(false).contains("Play"));
}

#[test]
fn meters_cover_first_tracks_and_clamp() {
    let mut pulses = vec![0.0_f32; 16];
    pulses[0] = 0.75;
    pulses[1] = 9.0;
    let html = meter_html(&pulses);
    assert_eq!(html.matches("<span").count(), METER_TRACKS_SHOWN);
    assert!(html.contains("height:50%"));
    assert!(html.contains("height:100%"));
    assert!(!html.contains("height:600%"));
}

#[test]
fn socket_url_accepts_only_websocket_schemes() {
    assert_eq!(resolve_socket_url(None), DEFAULT_SOCKET_URL);
    assert_eq!(
        resolve_socket_url(Some("wss://relay.example/midi".into())),
        "wss://relay.example/midi"
    );
    assert_eq!(
        resolve_socket_url(Some("ws://127.0.0.1:9000".into())),
        "ws://127.0.0.1:9000"
    );
    assert_eq!(
        resolve_socket_url(Some("http://relay.example".into())),
        DEFAULT_SOCKET_URL
    );
}
