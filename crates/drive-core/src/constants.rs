// Simulation tuning constants shared by the web and native front-ends.

// World scroll
pub const LOOP_START: f32 = -80.0; // offset the world group restarts from
pub const LOOP_END: f32 = 385.0; // offset at which the world group wraps
pub const CRUISE_VELOCITY: f32 = 80.0; // target scroll speed while music plays
pub const ACCELERATION_RATE: f32 = 2.0; // easing gain toward the target velocity
pub const NOMINAL_STEP: f32 = 1.0 / 60.0; // fixed easing step, independent of frame delta

// Traffic
pub const SPAWN_X: f32 = -400.0; // where oncoming vehicles appear
pub const EXIT_X: f32 = 150.0; // where oncoming vehicles are retired
pub const MAX_LIVE_VEHICLES: usize = 8;
pub const SPAWN_INTERVAL_MIN_SEC: f32 = 1.2;
pub const SPAWN_INTERVAL_MAX_SEC: f32 = 3.5;

// Oncoming lanes (perpendicular offsets from the road centre line)
pub const INNER_LANE_Z: f32 = -4.0;
pub const OUTER_LANE_Z: f32 = -7.5;
pub const ONCOMING_HEADING: f32 = std::f32::consts::PI; // facing the player's car

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches or long stalls

// Transport
pub const MIDI_IDLE_TIMEOUT_MS: f64 = 2500.0; // stream counts as stopped after this silence
pub const MIDI_TRACKS: usize = 16;
pub const TRACK_PULSE_PER_NOTE: f32 = 0.6;
pub const TRACK_PULSE_MAX: f32 = 1.5;
pub const TRACK_PULSE_DECAY_PER_SEC: f32 = 3.0;

// Asset cache
pub const ASSET_SWEEP_INTERVAL_SEC: f64 = 5.0;
pub const ASSET_MAX_IDLE_SEC: f64 = 30.0;
