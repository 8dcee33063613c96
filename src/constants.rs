/// Front-end tuning values and the ids of the DOM chrome.
///
/// Values that change behaviour shared with the core (audio levels, fades,
/// marker sizing) live in `gallery_core::constants`; these only concern how
/// the browser page looks and reacts.
// Camera
pub const CAMERA_VFOV_DEG: f32 = 75.0;
pub const PITCH_LIMIT_RAD: f32 = 1.4; // just short of straight up/down

// Pointer
pub const CLICK_SLOP_PX: f32 = 5.0; // pointer travel still counted as a click
pub const TOOLTIP_OFFSET_PX: f32 = 20.0;

// Picking: marker hit sphere radius as a fraction of its world scale
pub const MARKER_PICK_RADIUS_FACTOR: f32 = 0.5;

// Loading overlay fade-out before it is removed from layout
pub const LOADING_FADE_MS: i32 = 500;

// DOM ids
pub const STAGE_ID: &str = "gallery-stage";
pub const PANORAMA_ID: &str = "gallery-panorama";
pub const TOOLTIP_ID: &str = "gallery-tooltip";
pub const LOADING_ID: &str = "gallery-loading";
pub const ROOM_TITLE_ID: &str = "room-title";
pub const MODAL_ID: &str = "artifact-modal";
pub const MODAL_IMAGE_ID: &str = "artifact-image";
pub const MODAL_TITLE_ID: &str = "artifact-title";
pub const MODAL_DESCRIPTION_ID: &str = "artifact-description";
pub const MODAL_CLOSE_ID: &str = "artifact-close";
pub const NARRATION_BUTTON_ID: &str = "narration-toggle";
pub const START_OVERLAY_ID: &str = "start-overlay";
pub const START_BUTTON_ID: &str = "overlay-ok";
