use glam::{Vec2, Vec3};

// Shared scene/audio tuning constants used by the web frontend.

// Surface mesh: 31x31 segments -> 32x32 vertices, one waveform sample each
pub const PLANE_WIDTH: f32 = 1.0;
pub const PLANE_HEIGHT: f32 = 1.0;
pub const PLANE_SEGMENTS_X: u32 = 31;
pub const PLANE_SEGMENTS_Y: u32 = 31;
pub const PLANE_SCALE_Y: f32 = 2.0 / 3.0;

// Analyser window (time-domain samples per frame)
pub const FFT_SIZE: usize = 1024;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.25, -0.25, 1.0);

// Pixel density cap relative to the device pixel ratio
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // dolly factor per wheel notch
pub const ORBIT_EPS: f32 = 1e-6;

// Uniform defaults
pub const DEFAULT_FREQUENCY: Vec2 = Vec2::new(10.0, 5.0);
pub const DEFAULT_TIME_MUL: f32 = 1.0;
pub const DEFAULT_ELEVATION_MUL: f32 = 0.1;
pub const DEFAULT_COLOR_INTENSITY: f32 = 3.0;
pub const DEFAULT_BASE_COLOR: [f32; 3] = [1.0, 1.0, 1.0]; // white
pub const DEFAULT_PEAK_COLOR: [f32; 3] = [1.0, 1.0, 1.0]; // white
