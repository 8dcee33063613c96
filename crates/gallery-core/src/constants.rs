// Shared audio/visual tuning constants used by the core and the web frontend.

// Audio levels
pub const AMBIENT_VOLUME: f32 = 0.5; // room loop at full presence
pub const FOREGROUND_VOLUME: f32 = 0.8; // artifact music
pub const FOREGROUND_DUCKED_VOLUME: f32 = 0.4; // artifact music under narration
pub const NARRATION_VOLUME: f32 = 1.0;

// Fade timings (milliseconds)
pub const AMBIENT_CROSSFADE_MS: u64 = 2000; // room to room
pub const AMBIENT_RESUME_FADE_MS: u64 = 500; // after closing an artifact

// Tooltip
pub const NAVIGATION_FALLBACK_LABEL: &str = "Enter";

// Marker sizing
pub const ARTIFACT_MARKER_SCALE_FACTOR: f32 = 10.0;
pub const MARKER_DISTANCE_SCALE: f32 = 0.01; // scale = factor * distance * this
pub const NAVIGATION_MARKER_SCALE: f32 = 8.0; // world height of the arrow

// Navigation marker bobbing
pub const NAVIGATION_BOB_AMPLITUDE: f32 = 0.1;
pub const NAVIGATION_BOB_RATE: f32 = 2.0; // radians per second
