use crate::constants::*;
use std::time::Duration;

/// Audio levels used by the audio engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioLevels {
    pub ambient: f32,
    pub foreground: f32,
    pub foreground_ducked: f32,
    pub narration: f32,
}

impl Default for AudioLevels {
    fn default() -> Self {
        Self {
            ambient: AMBIENT_VOLUME,
            foreground: FOREGROUND_VOLUME,
            foreground_ducked: FOREGROUND_DUCKED_VOLUME,
            narration: NARRATION_VOLUME,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub levels: AudioLevels,
    pub room_crossfade: Duration,
    pub ambient_resume_fade: Duration,
    pub artifact_marker_scale: f32,
    pub navigation_marker_scale: f32,
    pub bob_amplitude: f32,
    pub bob_rate: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            levels: AudioLevels::default(),
            room_crossfade: Duration::from_millis(AMBIENT_CROSSFADE_MS),
            ambient_resume_fade: Duration::from_millis(AMBIENT_RESUME_FADE_MS),
            artifact_marker_scale: ARTIFACT_MARKER_SCALE_FACTOR,
            navigation_marker_scale: NAVIGATION_MARKER_SCALE,
            bob_amplitude: NAVIGATION_BOB_AMPLITUDE,
            bob_rate: NAVIGATION_BOB_RATE,
        }
    }
}
