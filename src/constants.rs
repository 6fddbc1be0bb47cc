/// Page wiring and frame tuning for the web front end.
///
/// Element ids must match `index.html`.
pub const ROSE_CANVAS_ID: &str = "rose-canvas";
pub const CONFETTI_CANVAS_ID: &str = "confetti-canvas";
pub const OVERLAY_ID: &str = "overlay";
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const GIFT_IMAGE_ID: &str = "gift-image";
pub const PLACEHOLDER_ID: &str = "placeholder";

// Class toggled on the canvas once the first frame has been submitted
pub const READY_CLASS: &str = "ready";

// Query-string keys
pub const QUERY_RECIPIENT: &str = "to";
pub const QUERY_GREETING: &str = "greeting";

pub const GIFT_IMAGE_URL: &str =
    "https://media.tenor.com/On7kvXyBoTwAAAAi/mochi-peach-cat-mochi-cat.gif";

// Longest frame step fed to the simulation (seconds); tab switches stall rAF
pub const MAX_FRAME_DT: f32 = 0.1;
