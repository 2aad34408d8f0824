use crate::render::SurfaceSize;

/// Offscreen attachments matching the drawable size: a multisampled colour
/// buffer (only when `sample_count > 1`) and a depth buffer with the same
/// sample count. Rebuilt whenever the surface is resized; never touched while a
/// frame is being encoded.
pub(crate) struct RenderTargets {
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    sample_count: u32,
    size: SurfaceSize,

    /// Resolved into the surface texture at the end of the pass.
    msaa: Option<Attachment>,
    depth: Attachment,
}

struct Attachment {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl Attachment {
    fn new(
        device: &wgpu::Device,
        label: &str,
        format: wgpu::TextureFormat,
        sample_count: u32,
        size: SurfaceSize,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

impl RenderTargets {
    /// `size` must be renderable; wgpu rejects zero-sized textures.
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        sample_count: u32,
        size: SurfaceSize,
    ) -> Self {
        let msaa = (sample_count > 1).then(|| {
            Attachment::new(device, "tumble msaa colour target", color_format, sample_count, size)
        });
        let depth = Attachment::new(device, "tumble depth target", depth_format, sample_count, size);

        Self {
            color_format,
            depth_format,
            sample_count,
            size,
            msaa,
            depth,
        }
    }

    /// Same formats and sample count at a new size.
    pub(crate) fn resized(&self, device: &wgpu::Device, size: SurfaceSize) -> Self {
        Self::new(device, self.color_format, self.depth_format, self.sample_count, size)
    }

    /// Colour attachment for a pass whose final image is `frame_view`.
    pub(crate) fn color_attachment<'a>(
        &'a self,
        frame_view: &'a wgpu::TextureView,
        clear: wgpu::Color,
    ) -> wgpu::RenderPassColorAttachment<'a> {
        let (view, resolve_target) = attachment_views(self.msaa.as_ref().map(|a| &a.view), frame_view);
        wgpu::RenderPassColorAttachment {
            view,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: color_store_op(self.sample_count),
            },
            depth_slice: None,
        }
    }

    #[inline]
    pub(crate) fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth.view
    }

    #[inline]
    pub(crate) fn depth_format(&self) -> wgpu::TextureFormat {
        self.depth_format
    }

    #[inline]
    pub(crate) fn sample_count(&self) -> u32 {
        self.sample_count
    }

    #[inline]
    pub(crate) fn size(&self) -> SurfaceSize {
        self.size
    }
}

/// The requested count when every attachment format supports it, otherwise 1.
pub(crate) fn resolve_sample_count(requested: u32, supported: impl Fn(u32) -> bool) -> u32 {
    if requested <= 1 {
        return 1;
    }
    if requested.is_power_of_two() && supported(requested) {
        requested
    } else {
        log::warn!("{requested}x MSAA unsupported; rendering single-sampled");
        1
    }
}

/// With MSAA the pass draws into the multisampled view and resolves into the
/// frame; otherwise it draws into the frame directly.
fn attachment_views<'a, V>(msaa: Option<&'a V>, frame: &'a V) -> (&'a V, Option<&'a V>) {
    match msaa {
        Some(samples) => (samples, Some(frame)),
        None => (frame, None),
    }
}

/// Multisampled contents are dead once resolved.
fn color_store_op(sample_count: u32) -> wgpu::StoreOp {
    if sample_count > 1 {
        wgpu::StoreOp::Discard
    } else {
        wgpu::StoreOp::Store
    }
}
