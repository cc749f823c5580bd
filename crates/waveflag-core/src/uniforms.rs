//! Shader uniform store.
//!
//! One mutable struct shared (through the owning `Stage`) by the panel, the
//! drop handler and the animation driver. Values are not validated here;
//! range clamping is the panel's job.

use crate::color::Color;
use crate::constants::{
    DEFAULT_BASE_COLOR, DEFAULT_COLOR_INTENSITY, DEFAULT_ELEVATION_MUL, DEFAULT_FREQUENCY,
    DEFAULT_PEAK_COLOR, DEFAULT_TIME_MUL,
};
use glam::{Mat4, Vec2};

/// Where the active surface texture came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureSource {
    /// 1x1 white texel used until a real image is available.
    Placeholder,
    /// Image fetched from the page at startup.
    Url(String),
    /// Image dropped onto the canvas.
    Dropped { name: String },
}

/// Identity of the texture bound to the material. The pixels themselves live
/// on the GPU; `id` is what the renderer matches against its staged upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureBinding {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub source: TextureSource,
}

impl TextureBinding {
    pub fn placeholder() -> Self {
        Self {
            id: 0,
            width: 1,
            height: 1,
            source: TextureSource::Placeholder,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ShaderUniforms {
    pub frequency: Vec2,
    pub time: f32,
    pub time_mul: f32,
    pub base_color: Color,
    pub peak_color: Color,
    pub texture: TextureBinding,
    pub elevation_mul: f32,
    pub color_intensity: f32,
    material_needs_update: bool,
    texture_needs_update: bool,
}

impl Default for ShaderUniforms {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            time: 0.0,
            time_mul: DEFAULT_TIME_MUL,
            base_color: Color::from_array(DEFAULT_BASE_COLOR),
            peak_color: Color::from_array(DEFAULT_PEAK_COLOR),
            texture: TextureBinding::placeholder(),
            elevation_mul: DEFAULT_ELEVATION_MUL,
            color_intensity: DEFAULT_COLOR_INTENSITY,
            material_needs_update: false,
            texture_needs_update: false,
        }
    }
}

impl ShaderUniforms {
    /// Swap the active texture and flag both material and texture for upload.
    pub fn set_texture(&mut self, binding: TextureBinding) {
        log::info!(
            "[material] texture #{} {}x{} ({:?})",
            binding.id,
            binding.width,
            binding.height,
            binding.source
        );
        self.texture = binding;
        self.material_needs_update = true;
        self.texture_needs_update = true;
    }

    pub fn needs_update(&self) -> (bool, bool) {
        (self.material_needs_update, self.texture_needs_update)
    }

    /// Consume the pending material/texture update, returning the texture id
    /// the renderer should bind if one was pending.
    pub fn take_texture_update(&mut self) -> Option<u64> {
        let pending = self.material_needs_update || self.texture_needs_update;
        self.material_needs_update = false;
        self.texture_needs_update = false;
        pending.then_some(self.texture.id)
    }

    /// Pack into the GPU layout together with the frame's matrices.
    pub fn to_gpu(&self, view_proj: Mat4, model: Mat4) -> PlaneUniforms {
        PlaneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            base_color: self.base_color.to_rgba(),
            peak_color: self.peak_color.to_rgba(),
            frequency: self.frequency.to_array(),
            time: self.time,
            time_mul: self.time_mul,
            elevation_mul: self.elevation_mul,
            color_intensity: self.color_intensity,
            _pad: [0.0; 2],
        }
    }
}

/// Uniform block as laid out in `plane.wgsl` (192 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub peak_color: [f32; 4],
    pub frequency: [f32; 2],
    pub time: f32,
    pub time_mul: f32,
    pub elevation_mul: f32,
    pub color_intensity: f32,
    pub _pad: [f32; 2],
}
