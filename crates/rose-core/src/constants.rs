use glam::Vec3;

// Shared tuning constants for the rose, the scene rig and the overlay.

// Petal surface
pub const PETAL_SEGMENTS: u32 = 20; // slices and stacks used to tessellate one petal
pub const PETAL_SPAN: f32 = 1.2; // azimuthal span as a multiple of PI
pub const PETAL_MAX_WIDTH: f32 = 0.6;
pub const PETAL_DEPTH_SCALE: f32 = 0.8; // z compression of the cross-section
pub const PETAL_HEIGHT: f32 = 1.5;
pub const PETAL_CURL_START: f32 = 0.6; // v at which the tip starts rolling back
pub const PETAL_CURL_MAX: f32 = 0.8; // full curl as a multiple of PI
pub const PETAL_RUFFLE_FREQ: f32 = 10.0; // multiple of PI across u
pub const PETAL_RUFFLE_AMP: f32 = 0.02;

// Petal animation
pub const MAX_LAYER: f32 = 7.0;
pub const GOLDEN_OFFSET: f32 = 0.618; // per-layer azimuth offset as a multiple of PI
pub const CLOSED_ROT: f32 = 0.5; // radians, tucked inward
pub const OPEN_ROT_BASE: f32 = -0.4;
pub const OPEN_ROT_LAYER_SPAN: f32 = 0.4; // outer layers drop this much further
pub const INNER_OPEN_ROT: f32 = 0.2; // cupped target for the innermost layers
pub const INNER_LAYER_COUNT: usize = 2;
pub const BLOOM_START_SPAN: f32 = 0.2;
pub const BLOOM_END_BASE: f32 = 0.5;
pub const BLOOM_END_SPAN: f32 = 0.5;
pub const LAYER_PUSH: f32 = 0.04; // static radial offset per layer
pub const BLOOM_PUSH: f32 = 0.1; // extra radial offset when fully open
pub const RADIAL_BASE: f32 = 0.05;
pub const RADIAL_LAYER_STEP: f32 = 0.02;
pub const BREATH_FREQ: f32 = 2.0;
pub const BREATH_AMP: f32 = 0.005;
pub const SWAY_FREQ: f32 = 1.5;
pub const SWAY_AMP: f32 = 0.02;

// Rose assembly
pub const BLOOM_DAMP_LAMBDA: f32 = 0.1; // per second, slow asymptotic opening
pub const ROSE_YAW_SPEED: f32 = 0.05; // radians per second
pub const ROSE_BASE_Y: f32 = -1.0;
pub const ROSE_FLOAT_FREQ: f32 = 0.5;
pub const ROSE_FLOAT_AMP: f32 = 0.05;

pub const STEM_RADIUS_TOP: f32 = 0.04;
pub const STEM_RADIUS_BOTTOM: f32 = 0.06;
pub const STEM_HEIGHT: f32 = 6.0;
pub const STEM_SEGMENTS: u32 = 16;
pub const STEM_OFFSET: Vec3 = Vec3::new(0.0, -3.0, 0.0);

pub const GLOW_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 0.0);
pub const GLOW_COLOR: u32 = 0xff3333;
pub const GLOW_INTENSITY: f32 = 1.0;
pub const GLOW_RANGE: f32 = 1.5;

// Materials (sRGB hex)
pub const PETAL_COLOR: u32 = 0x880000;
pub const PETAL_EMISSIVE: u32 = 0x330000;
pub const PETAL_EMISSIVE_INTENSITY: f32 = 0.1;
pub const PETAL_ROUGHNESS: f32 = 0.6;
pub const PETAL_METALNESS: f32 = 0.1;
pub const PETAL_SHEEN: f32 = 0.5;
pub const PETAL_SHEEN_COLOR: u32 = 0xff0000;
pub const STEM_COLOR: u32 = 0x3a5f0b;
pub const STEM_ROUGHNESS: f32 = 0.8;

// Camera
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;
pub const DESKTOP_CAMERA: Vec3 = Vec3::new(0.0, 2.0, 7.0);
pub const MOBILE_CAMERA: Vec3 = Vec3::new(0.0, 2.5, 10.0);
pub const CAMERA_FOV_DEG: f32 = 40.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const MIN_DPR: f64 = 1.0;
pub const MAX_DPR: f64 = 1.5;

// Orbit controls
pub const AUTO_ROTATE_SPEED: f32 = 0.3; // 30 seconds per orbit at 1.0
pub const ORBIT_MIN_POLAR: f32 = std::f32::consts::FRAC_PI_3;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;

// Scene colors and exposure
pub const BACKGROUND_COLOR: u32 = 0x1a0505;
pub const PLACEHOLDER_COLOR: &str = "#FDFBF7";
pub const TONE_EXPOSURE: f32 = 1.2;

// Sparkles
pub const SPARKLE_COUNT: usize = 80;
pub const SPARKLE_SCALE: f32 = 10.0;
pub const SPARKLE_SIZE: f32 = 3.0;
pub const SPARKLE_SPEED: f32 = 0.2;
pub const SPARKLE_OPACITY: f32 = 0.6;
pub const SPARKLE_COLOR: u32 = 0xe6c200;
pub const SPARKLE_SEED: u64 = 0x5EED_0F_2053;

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.8;
pub const BLOOM_INTENSITY: f32 = 0.8;
pub const NOISE_OPACITY: f32 = 0.03;
pub const VIGNETTE_OFFSET: f32 = 0.3;
pub const VIGNETTE_DARKNESS: f32 = 0.8;
