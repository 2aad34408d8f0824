use crate::render::{AcquireError, CommandList, PipelineBinding, RenderBackend, RenderCommand, SurfaceSize};

use super::gpu::Gpu;
use super::pipelines::WgpuHandles;
use super::surface::map_surface_error;

/// The wgpu drawable: an acquired surface texture plus the encoder recording
/// into it. Presented by `submit`.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl<'w> RenderBackend for Gpu<'w> {
    type Drawable = GpuFrame;
    type Handles = WgpuHandles;

    fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    fn acquire_drawable(&mut self) -> Result<GpuFrame, AcquireError> {
        let surface_texture = self.surface.get_current_texture().map_err(|err| {
            map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
        })?;

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tumble frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    fn rebuild_targets(&mut self, size: SurfaceSize) {
        self.resize(size);
    }

    fn encode(
        &mut self,
        frame: &mut GpuFrame,
        binding: &PipelineBinding<WgpuHandles>,
        commands: &CommandList,
    ) {
        let handles = &binding.handles;

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(binding.label),
            color_attachments: &[Some(self.targets.color_attachment(&frame.view, self.clear_color))],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.targets.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for cmd in commands.commands() {
            match cmd {
                RenderCommand::SetPipeline => rpass.set_pipeline(&handles.pipeline),
                // Depth state is baked into the pipeline; only the reference is dynamic.
                RenderCommand::SetDepthStencil => rpass.set_stencil_reference(0),
                RenderCommand::SetVertexBuffer => {
                    rpass.set_vertex_buffer(0, handles.vertex_buffer.slice(..));
                }
                RenderCommand::SetIndexBuffer => {
                    let ibo = handles
                        .index_buffer
                        .as_ref()
                        .unwrap_or_else(|| panic!("binding `{}` has no index buffer", binding.label));
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
                }
                RenderCommand::SetConstants(uniform) => {
                    self.queue
                        .write_buffer(&handles.uniform_buffer, 0, bytemuck::bytes_of(uniform));
                    rpass.set_bind_group(0, &handles.uniform_bind_group, &[]);
                }
                RenderCommand::BindTexture => {
                    let group = handles
                        .texture_bind_group
                        .as_ref()
                        .unwrap_or_else(|| panic!("binding `{}` has no texture", binding.label));
                    rpass.set_bind_group(1, group, &[]);
                }
                RenderCommand::DrawIndexed { indices } => rpass.draw_indexed(indices.clone(), 0, 0..1),
                RenderCommand::Draw { vertices } => rpass.draw(vertices.clone(), 0..1),
            }
        }
    }

    fn submit(&mut self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);

        self.window.pre_present_notify();
        surface_texture.present();
    }

    /// Waits for in-flight frames, then destroys the device. Surface and
    /// resource handles are dropped with the `Gpu` itself.
    fn release(&mut self) {
        if let Err(err) = self.device.poll(wgpu::PollType::wait_indefinitely()) {
            log::warn!("device did not go idle before release: {err}");
        }
        self.device.destroy();
        log::debug!("gpu device destroyed");
    }
}
