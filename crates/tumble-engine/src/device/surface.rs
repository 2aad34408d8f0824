use crate::render::{AcquireError, SurfaceSize};

/// Picks the surface format: the first sRGB one when `prefer_srgb`, otherwise the
/// first linear one, falling back to whatever the surface lists first.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| caps.formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Records the new size and reconfigures the surface.
///
/// wgpu does not support configuring a surface with a 0x0 size; in that case only
/// the recorded size changes and configuration is deferred. Returns whether the
/// surface was reconfigured.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut SurfaceSize,
    new_size: SurfaceSize,
) -> bool {
    *size = new_size;
    if !new_size.is_renderable() {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
    true
}

/// Maps a failed acquisition to the orchestrator's skip-or-stop decision,
/// reconfiguring the surface when it went stale.
pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: SurfaceSize,
    err: wgpu::SurfaceError,
) -> AcquireError {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.is_renderable() {
                surface.configure(device, config);
            }
            log::debug!("surface {err:?}; reconfigured");
            AcquireError::Unavailable
        }
        wgpu::SurfaceError::OutOfMemory => AcquireError::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => AcquireError::Unavailable,
    }
}
