use winit::window::Window;

use crate::render::{InitError, PipelineSet, SurfaceSize};

use super::assets::SceneAssets;
use super::init::GpuInit;
use super::pipelines::{self, PipelineTargets, WgpuHandles};
use super::surface::{apply_resize, choose_alpha_mode, choose_surface_format};
use super::targets::{resolve_sample_count, RenderTargets};

/// Owns wgpu core objects, the surface configuration and the size-dependent
/// render targets.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - keeps multisampled colour and depth buffers matching the drawable
///
/// Frame acquisition and submission go through its `RenderBackend` impl.
pub struct Gpu<'w> {
    /// Window the surface presents to; also notified right before presentation.
    pub(crate) window: &'w Window,

    /// wgpu instance used to create the adapter and surface.
    _instance: wgpu::Instance,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the runtime keeps the window alive
    /// for as long as the `Gpu` exists.
    pub(crate) surface: wgpu::Surface<'w>,

    adapter: wgpu::Adapter,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,

    /// Active surface configuration.
    pub(crate) config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels. May be zero while minimized.
    pub(crate) size: SurfaceSize,

    pub(crate) targets: RenderTargets,
    pub(crate) clear_color: wgpu::Color,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self, InitError> {
        let size = SurfaceSize::from(window.inner_size());
        if !size.is_renderable() {
            return Err(InitError::ZeroSize);
        }

        // Use all backends to allow wgpu to select the optimal platform backend.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Surface lifetime is tied to `window` via `'w`.
        let surface = instance.create_surface(window).map_err(InitError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(InitError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tumble-engine device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(InitError::Device)?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format =
            choose_surface_format(&surface_caps, init.prefer_srgb).ok_or(InitError::NoSurfaceFormat)?;
        let alpha_mode = choose_alpha_mode(&surface_caps, init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        let sample_count = resolve_sample_count(init.sample_count, |count| {
            [format, init.depth_format].into_iter().all(|f| {
                adapter
                    .get_texture_format_features(f)
                    .flags
                    .sample_count_supported(count)
            })
        });
        let targets = RenderTargets::new(&device, format, init.depth_format, sample_count, size);

        let info = adapter.get_info();
        log::info!(
            "gpu: {} ({:?}), surface {:?}, depth {:?}, {}x msaa",
            info.name,
            info.backend,
            format,
            init.depth_format,
            sample_count
        );

        Ok(Gpu {
            window,
            _instance: instance,
            surface,
            adapter,
            device,
            queue,
            config,
            size,
            targets,
            clear_color: init.clear_color,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Builds the mesh and triangle pipelines plus their buffers and texture.
    ///
    /// Runs once at startup; bindings are never rebuilt on the frame path.
    pub fn build_pipelines(&self, assets: &SceneAssets) -> Result<PipelineSet<WgpuHandles>, InitError> {
        let targets = PipelineTargets {
            color_format: self.config.format,
            depth_format: self.targets.depth_format(),
            sample_count: self.targets.sample_count(),
        };
        pipelines::build_pipelines(&self.device, &self.queue, &targets, assets)
    }

    /// Reconfigures the surface and rebuilds the colour and depth targets after
    /// a resize.
    ///
    /// wgpu does not support a 0x0 surface; in that case only the recorded size
    /// changes and both rebuilds are deferred until a renderable size arrives.
    pub fn resize(&mut self, new_size: SurfaceSize) {
        let reconfigured = apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
        if reconfigured && self.targets.size() != new_size {
            self.targets = self.targets.resized(&self.device, new_size);
        }
    }
}
