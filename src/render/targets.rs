use super::helpers;
use wgpu;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Multisampled color target (resolved into the swapchain) and the matching
/// depth buffer. Both follow the surface size.
pub(crate) struct RenderTargets {
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    #[allow(dead_code)]
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    samples: u32,
    format: wgpu::TextureFormat,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        samples: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let (msaa_tex, msaa_view) = Self::color(device, width, height, samples, format);
        let (depth_tex, depth_view) = Self::depth(device, width, height, samples);
        Self {
            msaa_tex,
            msaa_view,
            depth_tex,
            depth_view,
            samples,
            format,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.msaa_tex, self.msaa_view) =
            Self::color(device, width, height, self.samples, self.format);
        (self.depth_tex, self.depth_view) = Self::depth(device, width, height, self.samples);
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.msaa_tex.width(), self.msaa_tex.height())
    }

    fn color(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        samples: u32,
        format: wgpu::TextureFormat,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        helpers::create_texture(
            device,
            "msaa_color",
            width,
            height,
            samples,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        )
    }

    fn depth(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        samples: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        helpers::create_texture(
            device,
            "depth",
            width,
            height,
            samples,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        )
    }
}
