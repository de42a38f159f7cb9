// Visual and wiring constants for the web front-end.

// Canvas projection (world units -> CSS pixels before devicePixelRatio)
pub const PIXELS_PER_UNIT: f32 = 1.6;
pub const PLAYER_SCREEN_X_FRACTION: f32 = 0.72; // player car sits right of centre, traffic comes from the left
pub const ROAD_HALF_WIDTH: f32 = 10.0; // world units either side of the centre line
pub const PLAYER_LANE_Z: f32 = 4.0;

// Scrolling scenery; both periods divide the loop length so the wrap is seamless
pub const LANE_DASH_SPACING: f32 = 15.5;
pub const LANE_DASH_LENGTH: f32 = 7.0;
pub const CITY_BLOCK_SPACING: f32 = 93.0;
pub const CITY_BLOCKS_PER_LOOP: usize = 5;
pub const CITY_SETBACK: f32 = 6.0; // gap between kerb and building fronts

// Vehicle sprites
pub const CAR_LENGTH: f32 = 9.0;
pub const CAR_WIDTH: f32 = 4.2;
pub const SEDAN_COLOR: &str = "#d9dde6";
pub const COUPE_COLOR: &str = "#e2443b";
pub const TAXI_COLOR: &str = "#f2c230";
pub const PICKUP_COLOR: &str = "#3f7fd1";
pub const VAN_COLOR: &str = "#6bbf7a";
pub const PLAYER_COLOR: &str = "#ff7a1a";

// Palette
pub const SKY_COLOR: &str = "#0b0f1a";
pub const ROAD_COLOR: &str = "#22262f";
pub const LANE_MARK_COLOR: &str = "#e8e2c8";
pub const BUILDING_COLORS: [&str; 5] = ["#2b3345", "#323b52", "#283042", "#39435c", "#2e3649"];
pub const WINDOW_GLOW_BASE: f32 = 0.25; // window light alpha at rest
pub const WINDOW_GLOW_SPAN: f32 = 0.6; // extra alpha at full track pulse

// Transport
pub const DEFAULT_SOCKET_URL: &str = "ws://localhost:8765/midi";
pub const SOCKET_QUERY_PARAM: &str = "socket";
pub const SOCKET_RECONNECT_DELAY_MS: i32 = 3000;

// HUD
pub const HUD_REFRESH_SEC: f32 = 0.25;
pub const METER_TRACKS_SHOWN: usize = 8;
