// Web front-end constants: DOM hooks, asset paths and renderer settings.

// DOM
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const PANEL_ID: &str = "param-panel";
pub const PANEL_TOGGLE_KEY: &str = "h";

// Image shown before anything is dropped
pub const DEFAULT_TEXTURE_URL: &str = "textures/flag.png";

// Renderer
pub const MSAA_SAMPLES: u32 = 4;
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Pointer buttons (MouseEvent.button)
pub const BUTTON_PRIMARY: i16 = 0;
pub const BUTTON_MIDDLE: i16 = 1;
pub const BUTTON_SECONDARY: i16 = 2;

// Wheel events in line/page mode are scaled to roughly pixel units
pub const WHEEL_LINE_PX: f64 = 16.0;
pub const WHEEL_PAGE_PX: f64 = 800.0;
