//! The owned application context.
//!
//! Event handlers and the animation step all receive a `&mut Stage` instead
//! of reaching for globals. Everything here runs on one thread; async work
//! (file reads, decodes) happens outside and re-enters through the
//! `*_decoded` methods once it completes.

use crate::camera::Camera;
use crate::geometry::{plane_model_matrix, PlaneGeometry};
use crate::media::{DroppedFile, MediaKind};
use crate::orbit::OrbitControls;
use crate::panel::{ControlValue, PanelError, ParamPanel};
use crate::playback::{AudioBackend, AudioError, Playback};
use crate::uniforms::{PlaneUniforms, ShaderUniforms, TextureBinding};
use crate::viewport::Viewport;
use glam::Mat4;

/// Everything the renderer draws from.
pub struct Scene {
    pub uniforms: ShaderUniforms,
    pub geometry: PlaneGeometry,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub panel: ParamPanel,
    pub model: Mat4,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            uniforms: ShaderUniforms::default(),
            geometry: PlaneGeometry::default(),
            camera: Camera::new(viewport.aspect()),
            controls: OrbitControls::new(),
            viewport,
            panel: ParamPanel::default(),
            model: plane_model_matrix(),
        }
    }

    pub fn gpu_uniforms(&self) -> PlaneUniforms {
        self.uniforms
            .to_gpu(self.camera.view_projection(), self.model)
    }
}

/// What one animation tick changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub displacement_updated: bool,
    pub camera_moved: bool,
}

pub struct Stage<B: AudioBackend> {
    pub scene: Scene,
    pub playback: Playback<B>,
    next_texture_id: u64,
}

impl<B: AudioBackend> Stage<B> {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scene: Scene::new(viewport),
            playback: Playback::new(),
            next_texture_id: 1,
        }
    }

    /// Viewport change: camera aspect follows synchronously.
    pub fn resize(&mut self, viewport: Viewport) {
        self.scene.viewport = viewport;
        self.scene.camera.set_aspect(viewport.aspect());
    }

    /// First half of drop handling, run before any file read starts. Audio
    /// drops (re)initialize the playback graph here; image drops leave the
    /// audio state alone.
    pub fn accept_drop<F>(&mut self, file: &DroppedFile, open: F) -> Result<MediaKind, AudioError>
    where
        F: FnOnce() -> Result<B, AudioError>,
    {
        let kind = file.kind();
        log::info!(
            "[drop] {:?} {:?} ({} bytes) -> {:?}",
            file.name,
            file.mime,
            file.size,
            kind
        );
        if kind == MediaKind::Audio {
            self.playback.prepare(open)?;
        }
        Ok(kind)
    }

    /// Reserve an id for a texture the renderer is about to upload.
    pub fn allocate_texture_id(&mut self) -> u64 {
        let id = self.next_texture_id;
        self.next_texture_id += 1;
        id
    }

    pub fn image_decoded(&mut self, binding: TextureBinding) {
        self.scene.uniforms.set_texture(binding);
    }

    pub fn audio_decoded(&mut self, buffer: &B::Buffer) -> Result<(), AudioError> {
        self.playback.play(buffer)
    }

    pub fn stop_playback(&mut self) {
        self.playback.stop();
    }

    pub fn apply_control(&mut self, name: &str, raw: &str) -> Result<ControlValue, PanelError> {
        let scene = &mut self.scene;
        scene.panel.apply_input(name, raw, &mut scene.uniforms)
    }

    /// One animation step: time uniform, waveform -> displacement (only while
    /// an analyser exists), then the damped controls.
    pub fn tick(&mut self, elapsed_secs: f32) -> FrameReport {
        let mut report = FrameReport::default();
        self.scene.uniforms.time = elapsed_secs;

        if let Some(samples) = self.playback.sample_waveform() {
            match self.scene.geometry.set_displacement(samples) {
                Ok(()) => report.displacement_updated = true,
                Err(e) => log::warn!("[frame] {}", e),
            }
        }

        let scene = &mut self.scene;
        report.camera_moved = scene.controls.update(&mut scene.camera);
        report
    }
}
