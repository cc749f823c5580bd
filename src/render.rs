use crate::constants::{CLEAR_COLOR, MSAA_SAMPLES};
use waveflag_core::{PlaneGeometry, PlaneUniforms};
use web_sys as web;
use wgpu;

mod helpers;
mod plane;
mod targets;

use plane::PlaneResources;
use targets::RenderTargets;

/// An uploaded image waiting for the material to pick it up by id.
struct MaterialTexture {
    id: u64,
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    plane: PlaneResources,
    bound: MaterialTexture,
    staged: Vec<MaterialTexture>,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        geometry: &PlaneGeometry,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height, MSAA_SAMPLES, format);
        let bound = create_placeholder(&device, &queue);
        let plane =
            plane::create_plane_resources(&device, geometry, format, MSAA_SAMPLES, &bound.view);
        log::info!(
            "[gpu] ready: {:?} {}x{} msaa={} indices={}",
            format,
            width,
            height,
            MSAA_SAMPLES,
            plane.index_count
        );

        let [r, g, b, a] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            plane,
            bound,
            staged: Vec::new(),
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Upload a decoded image into a fresh texture under `id`. It is bound once
    /// the material asks for that id. Returns the image size.
    pub fn stage_image(&mut self, id: u64, image: &web::HtmlImageElement) -> anyhow::Result<(u32, u32)> {
        let width = image.natural_width();
        let height = image.natural_height();
        if width == 0 || height == 0 {
            anyhow::bail!("image has no pixels");
        }
        let (texture, view) =
            helpers::create_surface_texture(&self.device, "surface_texture", width, height);
        self.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.staged.push(MaterialTexture {
            id,
            _texture: texture,
            view,
        });
        Ok((width, height))
    }

    /// Rebind the material to the staged texture with `id`. Older staged
    /// uploads are dropped; an unknown id rebinds the placeholder.
    pub fn bind_texture(&mut self, id: u64) {
        let Some(pos) = self.staged.iter().position(|t| t.id == id) else {
            if id != self.bound.id {
                log::warn!("[gpu] texture #{} was never staged, using placeholder", id);
                self.bound = create_placeholder(&self.device, &self.queue);
                self.rebuild_bind_group();
            }
            return;
        };
        self.bound = self.staged.swap_remove(pos);
        self.staged.retain(|t| t.id > id);
        self.rebuild_bind_group();
    }

    pub fn write_displacement(&self, samples: &[f32]) {
        self.queue.write_buffer(
            &self.plane.displacement_buffer,
            0,
            bytemuck::cast_slice(samples),
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
        if self.targets.size() != (width, height) {
            self.targets.recreate(&self.device, width, height);
        }
    }

    pub fn render(&mut self, uniforms: &PlaneUniforms) -> Result<(), wgpu::SurfaceError> {
        self.queue
            .write_buffer(&self.plane.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("plane_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.plane.pipeline);
            rpass.set_bind_group(0, &self.plane.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.plane.vertex_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.plane.displacement_buffer.slice(..));
            rpass.set_index_buffer(self.plane.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.plane.index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn rebuild_bind_group(&mut self) {
        self.plane.bind_group = plane::create_bind_group(
            &self.device,
            &self.plane.bind_group_layout,
            &self.plane.uniform_buffer,
            &self.bound.view,
            &self.plane.sampler,
        );
    }
}

/// 1x1 white texel bound until the first image arrives.
fn create_placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> MaterialTexture {
    let (texture, view) = helpers::create_surface_texture(device, "placeholder_texture", 1, 1);
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &[255, 255, 255, 255],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
    );
    MaterialTexture {
        id: 0,
        _texture: texture,
        view,
    }
}
