use std::ops::Range;

use crate::frame::FrameUniform;

/// Backend-agnostic command stream for one render pass.
///
/// The orchestrator records; the backend replays in order against the binding
/// selected for the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    SetPipeline,
    SetDepthStencil,
    SetVertexBuffer,
    SetIndexBuffer,
    /// Fresh per-frame constants, written before any draw reads them.
    SetConstants(FrameUniform),
    /// Texture + sampler pair.
    BindTexture,
    DrawIndexed { indices: Range<u32> },
    Draw { vertices: Range<u32> },
}

/// Recorded commands for a frame, with the bind-before-draw ordering enforced.
///
/// Recording a draw before the state it reads is bound is a programming error
/// and panics. Capacity is kept across `clear` calls.
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<RenderCommand>,
    pipeline_bound: bool,
    vertices_bound: bool,
    indices_bound: bool,
    constants_bound: bool,
}

impl CommandList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.pipeline_bound = false;
        self.vertices_bound = false;
        self.indices_bound = false;
        self.constants_bound = false;
    }

    #[inline]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn set_pipeline(&mut self) {
        self.pipeline_bound = true;
        self.commands.push(RenderCommand::SetPipeline);
    }

    pub fn set_depth_stencil(&mut self) {
        self.commands.push(RenderCommand::SetDepthStencil);
    }

    pub fn set_vertex_buffer(&mut self) {
        self.vertices_bound = true;
        self.commands.push(RenderCommand::SetVertexBuffer);
    }

    pub fn set_index_buffer(&mut self) {
        self.indices_bound = true;
        self.commands.push(RenderCommand::SetIndexBuffer);
    }

    pub fn set_constants(&mut self, uniform: FrameUniform) {
        self.constants_bound = true;
        self.commands.push(RenderCommand::SetConstants(uniform));
    }

    pub fn bind_texture(&mut self) {
        assert!(self.pipeline_bound, "texture bound before pipeline");
        self.commands.push(RenderCommand::BindTexture);
    }

    pub fn draw_indexed(&mut self, indices: Range<u32>) {
        self.assert_drawable();
        assert!(self.indices_bound, "indexed draw without an index buffer");
        self.commands.push(RenderCommand::DrawIndexed { indices });
    }

    pub fn draw(&mut self, vertices: Range<u32>) {
        self.assert_drawable();
        self.commands.push(RenderCommand::Draw { vertices });
    }

    fn assert_drawable(&self) {
        assert!(self.pipeline_bound, "draw recorded before pipeline was set");
        assert!(self.vertices_bound, "draw recorded before vertex buffer was set");
        assert!(self.constants_bound, "draw recorded before frame constants were set");
    }
}
