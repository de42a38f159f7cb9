//! MIDI events pushed by the playback relay and the play state derived from them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    MIDI_IDLE_TIMEOUT_MS, MIDI_TRACKS, TRACK_PULSE_DECAY_PER_SEC, TRACK_PULSE_MAX,
    TRACK_PULSE_PER_NOTE,
};
use crate::error::TransportError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteKind {
    NoteOn,
    NoteOff,
}

/// One record from the relay, e.g. `{"eventKind":"noteOn","track":2,"time":1530}`.
///
/// `time` is the sender's playback clock in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MidiEvent {
    #[serde(rename = "eventKind")]
    pub kind: NoteKind,
    pub track: u8,
    pub time: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    One(MidiEvent),
    Many(Vec<MidiEvent>),
}

/// Decode a text frame holding either one event or an array of events.
pub fn parse_midi_message(text: &str) -> Result<SmallVec<[MidiEvent; 4]>, TransportError> {
    let events: SmallVec<[MidiEvent; 4]> = match serde_json::from_str::<Payload>(text)? {
        Payload::One(ev) => smallvec::smallvec![ev],
        Payload::Many(evs) => evs.into_iter().collect(),
    };
    if let Some(bad) = events.iter().find(|ev| ev.track as usize >= MIDI_TRACKS) {
        return Err(TransportError::TrackOutOfRange(bad.track));
    }
    Ok(events)
}

/// Tracks whether the relay is currently playing and how busy each track is.
///
/// Times passed in are the local receive clock (milliseconds), not the
/// sender's `time` field, so a drifting sender clock cannot stall playback.
pub struct PlaybackMonitor {
    held: [u16; MIDI_TRACKS],
    pulses: [f32; MIDI_TRACKS],
    last_event_ms: Option<f64>,
    idle_timeout_ms: f64,
    notes_seen: u64,
}

impl Default for PlaybackMonitor {
    fn default() -> Self {
        Self::new(MIDI_IDLE_TIMEOUT_MS)
    }
}

impl PlaybackMonitor {
    pub fn new(idle_timeout_ms: f64) -> Self {
        Self {
            held: [0; MIDI_TRACKS],
            pulses: [0.0; MIDI_TRACKS],
            last_event_ms: None,
            idle_timeout_ms,
            notes_seen: 0,
        }
    }

    /// Record an event. Returns true for a note-on.
    pub fn ingest(&mut self, ev: &MidiEvent, received_ms: f64) -> bool {
        let track = ev.track as usize;
        if track >= MIDI_TRACKS {
            log::warn!("[transport] dropping event for track {}", ev.track);
            return false;
        }
        self.last_event_ms = Some(received_ms);
        match ev.kind {
            NoteKind::NoteOn => {
                self.held[track] = self.held[track].saturating_add(1);
                self.pulses[track] =
                    (self.pulses[track] + TRACK_PULSE_PER_NOTE).min(TRACK_PULSE_MAX);
                self.notes_seen += 1;
                true
            }
            NoteKind::NoteOff => {
                self.held[track] = self.held[track].saturating_sub(1);
                false
            }
        }
    }

    /// Exponentially decay track pulses.
    pub fn decay(&mut self, dt: f32) {
        let k = (-dt.max(0.0) * TRACK_PULSE_DECAY_PER_SEC).exp();
        for p in &mut self.pulses {
            *p *= k;
        }
    }

    /// True while notes are held or the last event is recent enough.
    pub fn is_active(&self, now_ms: f64) -> bool {
        if self.held.iter().any(|&n| n > 0) {
            return true;
        }
        match self.last_event_ms {
            Some(t) => now_ms - t <= self.idle_timeout_ms,
            None => false,
        }
    }

    /// Scroll speed the world should ease toward right now.
    pub fn target_velocity(&self, now_ms: f64, cruise: f32) -> f32 {
        if self.is_active(now_ms) {
            cruise
        } else {
            0.0
        }
    }

    /// Target for the drive: cruise freely until the relay has sent a note,
    /// then follow `target_velocity`.
    pub fn drive_velocity(&self, now_ms: f64, cruise: f32) -> f32 {
        if self.notes_seen == 0 {
            cruise
        } else {
            self.target_velocity(now_ms, cruise)
        }
    }

    pub fn pulses(&self) -> &[f32] {
        &self.pulses
    }

    pub fn held_notes(&self, track: usize) -> u16 {
        self.held.get(track).copied().unwrap_or(0)
    }

    pub fn notes_seen(&self) -> u64 {
        self.notes_seen
    }

    /// Forget held notes, e.g. after the socket drops mid-phrase.
    pub fn release_all(&mut self) {
        self.held = [0; MIDI_TRACKS];
    }
}
