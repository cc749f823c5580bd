pub mod camera;
pub mod clock;
pub mod color;
pub mod constants;
pub mod geometry;
pub mod media;
pub mod orbit;
pub mod panel;
pub mod playback;
pub mod stage;
pub mod uniforms;
pub mod viewport;

pub use camera::*;
pub use clock::*;
pub use color::*;
pub use constants::*;
pub use geometry::*;
pub use media::*;
pub use orbit::*;
pub use panel::*;
pub use playback::*;
pub use stage::*;
pub use uniforms::*;
pub use viewport::*;
