// Tests for MIDI message decoding and the playback monitor.

use drive_core::*;

#[test]
fn parses_single_event_object() {
    let evs = parse_midi_message(r#"{"eventKind":"noteOn","track":2,"time":1530}"#).unwrap();
    assert_eq!(evs.len(), 1);
    assert_eq!(
        evs[0],
        MidiEvent {
            kind: NoteKind::NoteOn,
            track: 2,
            time: 1530.0
        }
    );
}

#[test]
fn parses_event_batches() {
    let text = r#"[
        {"eventKind":"noteOn","track":0,"time":10},
        {"eventKind":"noteOff","track":0,"time":250.5},
        {"eventKind":"noteOn","track":9,"time":260}
    ]"#;
    let evs = parse_midi_message(text).unwrap();
    let kinds: Vec<NoteKind> = evs.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![NoteKind::NoteOn, NoteKind::NoteOff, NoteKind::NoteOn]
    );
    assert_eq!(evs[1].time, 250.5);
}

#[test]
fn rejects_malformed_messages() {
    assert!(matches!(
        parse_midi_message("not json"),
        Err(TransportError::Malformed(_))
    ));
    assert!(matches!(
        parse_midi_message(r#"{"eventKind":"pitchBend","track":1,"time":0}"#),
        Err(TransportError::Malformed(_))
    ));
    assert!(matches!(
        parse_midi_message(r#"{"eventKind":"noteOn","track":40,"time":0}"#),
        Err(TransportError::TrackOutOfRange(40))
    ));
}

#[test]
fn monitor_is_idle_until_first_event() {
    let m = PlaybackMonitor::default();
    assert!(!m.is_active(0.0));
    assert_eq!(m.target_velocity(0.0, 80.0), 0.0);
}

#[test]
fn held_notes_keep_playback_active() {
    let mut m = PlaybackMonitor::new(1000.0);
    let on = MidiEvent {
        kind: NoteKind::NoteOn,
        track: 3,
        time: 0.0,
    };
    assert!(m.ingest(&on, 100.0));
    assert_eq!(m.held_notes(3), 1);
    // Long after the timeout, the held note still counts.
    assert!(m.is_active(60_000.0));

    let off = MidiEvent {
        kind: NoteKind::NoteOff,
        ..on
    };
    assert!(!m.ingest(&off, 200.0));
    assert_eq!(m.held_notes(3), 0);
    assert!(m.is_active(1_200.0));
    assert!(!m.is_active(1_201.0));
    assert_eq!(m.target_velocity(1_100.0, 80.0), 80.0);
    assert_eq!(m.target_velocity(5_000.0, 80.0), 0.0);
}

#[test]
fn stray_note_off_does_not_underflow() {
    let mut m = PlaybackMonitor::default();
    let off = MidiEvent {
        kind: NoteKind::NoteOff,
        track: 0,
        time: 0.0,
    };
    m.ingest(&off, 0.0);
    m.ingest(&off, 1.0);
    assert_eq!(m.held_notes(0), 0);
}

#[test]
fn pulses_rise_on_notes_and_decay() {
    let mut m = PlaybackMonitor::default();
    let on = MidiEvent {
        kind: NoteKind::NoteOn,
        track: 1,
        time: 0.0,
    };
    for _ in 0..10 {
        m.ingest(&on, 0.0);
    }
    assert!((m.pulses()[1] - TRACK_PULSE_MAX).abs() < 1e-6, "pulse clamps");
    assert_eq!(m.pulses()[0], 0.0);
    assert_eq!(m.notes_seen(), 10);

    m.decay(1.0);
    let expected = TRACK_PULSE_MAX * (-TRACK_PULSE_DECAY_PER_SEC).exp();
    assert!((m.pulses()[1] - expected).abs() < 1e-5);
}

#[test]
fn release_all_clears_stuck_notes() {
    let mut m = PlaybackMonitor::new(500.0);
    let on = MidiEvent {
        kind: NoteKind::NoteOn,
        track: 5,
        time: 0.0,
    };
    m.ingest(&on, 0.0);
    m.release_all();
    assert_eq!(m.held_notes(5), 0);
    assert!(!m.is_active(10_000.0));
}

#[test]
fn drive_cruises_until_relay_plays_then_follows_it() {
    let mut m = PlaybackMonitor::new(1000.0);
    assert_eq!(m.drive_velocity(0.0, 80.0), 80.0);
    let on = MidiEvent {
        kind: NoteKind::NoteOn,
        track: 0,
        time: 0.0,
    };
    let off = MidiEvent {
        kind: NoteKind::NoteOff,
        ..on
    };
    m.ingest(&on, 0.0);
    m.ingest(&off, 10.0);
    assert_eq!(m.drive_velocity(500.0, 80.0), 80.0);
    assert_eq!(m.drive_velocity(5_000.0, 80.0), 0.0);
}
