// Tests for the looping world scroller.

use drive_core::*;
use rand::prelude::*;

const DT: f32 = 0.016;

fn scenario_config() -> WorldConfig {
    WorldConfig {
        loop_start: -80.0,
        loop_end: 385.0,
        cruise_velocity: 80.0,
        ..WorldConfig::default()
    }
}

#[test]
fn starts_at_loop_start_at_rest() {
    let w = WorldScroller::new(&scenario_config()).unwrap();
    let s = w.state();
    assert_eq!(s.offset, -80.0);
    assert_eq!(s.velocity, 0.0);
    assert!(!s.running);
    assert_eq!(s.last_offset_before_pause, None);
}

#[test]
fn offset_stays_within_loop_for_random_frame_deltas() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for i in 0..20_000 {
        let dt = rng.gen_range(0.001..0.1);
        let off = w.advance(dt, true);
        assert!(
            (-80.0..385.0).contains(&off),
            "offset {off} escaped the loop at frame {i}"
        );
    }
}

#[test]
fn offset_stays_within_loop_across_pause_and_target_changes() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..10_000 {
        if rng.gen_bool(0.01) {
            w.set_target_velocity(rng.gen_range(0.0..200.0));
        }
        let playing = rng.gen_bool(0.9);
        let off = w.advance(DT, playing);
        assert!(off >= -80.0 && off < 385.0, "offset {off} out of range");
    }
}

#[test]
fn wraps_to_loop_start_after_one_loop_of_distance() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    let mut prev = w.offset();
    let mut wrapped_at = None;
    for frame in 1..2_000 {
        let off = w.advance(DT, true);
        if off < prev {
            wrapped_at = Some((frame, prev, off));
            break;
        }
        prev = off;
    }
    let (frame, before, after) = wrapped_at.expect("world never wrapped");
    assert_eq!(after, -80.0, "wrap must land exactly on loop start");
    // The frame that wrapped would have carried the offset past the end.
    let one_frame = 80.0 * DT;
    assert!(
        385.0 - before <= one_frame + 1e-3,
        "wrapped early: offset {before} was more than a frame away from the end"
    );
    let distance = before - (-80.0);
    assert!((distance - 465.0).abs() <= one_frame + 1e-3, "distance {distance}");
    // At cruise this takes roughly 465 / 80 seconds plus the easing lag.
    assert!(frame > 363 && frame < 450, "wrapped at frame {frame}");
}

#[test]
fn wraps_repeatedly_without_leaving_bounds() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    let mut prev = w.offset();
    let mut wraps = 0;
    for _ in 0..5_000 {
        let off = w.advance(DT, true);
        if off < prev {
            wraps += 1;
            assert_eq!(off, -80.0);
        }
        prev = off;
    }
    // 5000 frames * 0.016s * 80 u/s = 6400 units ~ 13 loops
    assert!((12..=14).contains(&wraps), "wraps={wraps}");
}

#[test]
fn pause_freezes_offset_and_records_snapshot() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    for _ in 0..100 {
        w.advance(DT, true);
    }
    let at_pause = w.offset();
    let frozen = w.advance(DT, false);
    assert_eq!(frozen, at_pause);
    assert_eq!(w.state().last_offset_before_pause, Some(at_pause));
    assert_eq!(w.state().velocity, 0.0);
    assert!(!w.state().running);

    for _ in 0..50 {
        assert_eq!(w.advance(DT, false), at_pause);
    }
}

#[test]
fn resume_continues_from_paused_offset_without_jump() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    for _ in 0..200 {
        w.advance(DT, true);
    }
    let at_pause = w.advance(DT, false);
    for _ in 0..30 {
        w.advance(DT, false);
    }
    let resumed = w.advance(DT, true);
    assert!(w.state().running);
    assert_eq!(w.state().last_offset_before_pause, None, "snapshot consumed");
    assert!(resumed >= at_pause);
    assert!(
        resumed - at_pause < 80.0 * DT,
        "resume jumped from {at_pause} to {resumed}"
    );
}

#[test]
fn velocity_eases_toward_target_with_fixed_step() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    w.advance(DT, true);
    let expected = 80.0 * ACCELERATION_RATE * NOMINAL_STEP;
    assert!((w.state().velocity - expected).abs() < 1e-4);

    // Frame delta does not change the easing step in fixed-step mode.
    let mut slow = WorldScroller::new(&scenario_config()).unwrap();
    slow.advance(0.05, true);
    assert!((slow.state().velocity - expected).abs() < 1e-4);

    for _ in 0..1_000 {
        w.advance(DT, true);
    }
    assert_eq!(w.state().velocity, 80.0, "velocity settles exactly on target");
}

#[test]
fn delta_time_easing_scales_with_frame_delta() {
    let cfg = WorldConfig {
        easing: Easing::DeltaTime,
        ..scenario_config()
    };
    let mut w = WorldScroller::new(&cfg).unwrap();
    w.advance(0.05, true);
    let expected = 80.0 * ACCELERATION_RATE * 0.05;
    assert!((w.state().velocity - expected).abs() < 1e-4);
}

#[test]
fn dropping_target_decelerates_without_moving_backwards() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    for _ in 0..300 {
        w.advance(DT, true);
    }
    w.set_target_velocity(0.0);
    let mut prev = w.offset();
    for _ in 0..600 {
        let off = w.advance(DT, true);
        if off >= prev {
            prev = off;
        } else {
            // only a wrap may move the offset down
            assert_eq!(off, -80.0);
            prev = off;
        }
    }
    assert_eq!(w.state().velocity, 0.0);
    let parked = w.offset();
    assert_eq!(w.advance(DT, true), parked);
}

#[test]
fn negative_target_is_clamped() {
    let mut w = WorldScroller::new(&scenario_config()).unwrap();
    w.set_target_velocity(-10.0);
    assert_eq!(w.state().target_velocity, 0.0);
    w.set_target_velocity(f32::NAN);
    assert_eq!(w.state().target_velocity, 0.0);
}

#[test]
fn invalid_loop_bounds_are_rejected() {
    let cfg = WorldConfig {
        loop_start: 10.0,
        loop_end: 10.0,
        ..WorldConfig::default()
    };
    assert_eq!(
        WorldScroller::new(&cfg).err(),
        Some(ConfigError::InvalidLoopBounds {
            start: 10.0,
            end: 10.0
        })
    );
}
