// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use drive_core::{LOOP_END, LOOP_START, MIDI_TRACKS, SPAWN_X, EXIT_X};

fn divides(len: f32, period: f32) -> bool {
    let n = len / period;
    (n - n.round()).abs() < 1e-4
}

#[test]
fn scenery_periods_divide_the_loop() {
    let len = LOOP_END - LOOP_START;
    assert_eq!(len, 465.0);
    assert!(divides(len, LANE_DASH_SPACING), "lane dashes: {}", len / LANE_DASH_SPACING);
    assert!(divides(len, CITY_BLOCK_SPACING));
    assert_eq!(CITY_BLOCK_SPACING * CITY_BLOCKS_PER_LOOP as f32, len);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layout_is_consistent() {
    assert!(LANE_DASH_LENGTH < LANE_DASH_SPACING);
    assert!(CITY_BLOCK_SPACING > 18.0, "buildings need positive width");
    assert!(PLAYER_LANE_Z + CAR_WIDTH * 0.5 < ROAD_HALF_WIDTH);
    assert!(PLAYER_SCREEN_X_FRACTION > 0.0 && PLAYER_SCREEN_X_FRACTION < 1.0);
    assert_eq!(BUILDING_COLORS.len(), CITY_BLOCKS_PER_LOOP);
    assert!(METER_TRACKS_SHOWN <= MIDI_TRACKS);
    assert!(WINDOW_GLOW_BASE + WINDOW_GLOW_SPAN <= 1.0);
    assert!(SPAWN_X < EXIT_X);
    assert!(SOCKET_RECONNECT_DELAY_MS > 0);
}
