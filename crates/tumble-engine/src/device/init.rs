/// Startup parameters for the wgpu backend.
///
/// Everything here is fixed for the lifetime of the window; nothing is
/// renegotiated on resize.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when the surface offers one. The mesh texture
    /// is sRGB encoded, so a linear surface renders it too dark.
    pub prefer_srgb: bool,

    /// FIFO (the default) is always supported and paces presentation to the
    /// display.
    pub present_mode: wgpu::PresentMode,

    /// Used only if the surface supports it; otherwise the first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,

    /// MSAA samples per pixel. Falls back to 1 when the adapter cannot
    /// multisample the surface or depth format.
    pub sample_count: u32,

    /// Depth buffer format. Cleared to 1.0 each frame; nearer fragments win.
    pub depth_format: wgpu::TextureFormat,

    /// Background behind both modes.
    pub clear_color: wgpu::Color,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            sample_count: 4,
            depth_format: wgpu::TextureFormat::Depth32Float,
            clear_color: wgpu::Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let init = GpuInit::default();
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(init.sample_count, 4);
        assert_eq!(init.depth_format, wgpu::TextureFormat::Depth32Float);
        assert!(init.depth_format.has_depth_aspect());
        assert_eq!(init.clear_color, wgpu::Color::BLACK);
    }
}
