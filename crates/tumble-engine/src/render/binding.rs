use crate::mode::RenderMode;

use super::InitError;

/// How a binding's geometry is drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Geometry {
    /// Indexed triangle list over the whole index buffer.
    Indexed { index_count: u32 },
    /// Non-indexed triangle list.
    Vertices { vertex_count: u32 },
}

/// Immutable bundle of backend handles needed to draw one mode.
///
/// `handles` is opaque to the orchestrator (pipeline state, depth-stencil state,
/// sampler, vertex/index buffers). Built once at startup and never rebuilt on the
/// per-frame path.
#[derive(Debug)]
pub struct PipelineBinding<H> {
    pub label: &'static str,
    pub handles: H,
    pub geometry: Geometry,
    /// Whether a texture + sampler pair is bound before drawing.
    pub textured: bool,
}

/// One binding per [`RenderMode`].
#[derive(Debug)]
pub struct PipelineSet<H> {
    animated: PipelineBinding<H>,
    flat: PipelineBinding<H>,
}

/// The static mode always draws a single triangle.
pub const FLAT_VERTEX_COUNT: u32 = 3;

impl<H> PipelineSet<H> {
    /// Pairs the two bindings, rejecting geometry the per-frame draw sequence
    /// cannot issue.
    pub fn new(animated: PipelineBinding<H>, flat: PipelineBinding<H>) -> Result<Self, InitError> {
        match animated.geometry {
            Geometry::Indexed { index_count } if index_count > 0 && index_count % 3 == 0 => {}
            Geometry::Indexed { .. } => {
                return Err(InitError::Binding {
                    mode: RenderMode::Animated3D,
                    reason: "index count must be a non-zero multiple of 3",
                });
            }
            Geometry::Vertices { .. } => {
                return Err(InitError::Binding {
                    mode: RenderMode::Animated3D,
                    reason: "mesh must be indexed",
                });
            }
        }
        if !animated.textured {
            return Err(InitError::Binding {
                mode: RenderMode::Animated3D,
                reason: "mesh binding has no texture",
            });
        }

        if flat.geometry != (Geometry::Vertices { vertex_count: FLAT_VERTEX_COUNT }) {
            return Err(InitError::Binding {
                mode: RenderMode::Static2D,
                reason: "flat binding must draw exactly three vertices",
            });
        }

        Ok(Self { animated, flat })
    }

    #[inline]
    pub fn get(&self, mode: RenderMode) -> &PipelineBinding<H> {
        match mode {
            RenderMode::Animated3D => &self.animated,
            RenderMode::Static2D => &self.flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(geometry: Geometry, textured: bool) -> PipelineBinding<()> {
        PipelineBinding {
            label: "test",
            handles: (),
            geometry,
            textured,
        }
    }

    fn flat() -> PipelineBinding<()> {
        binding(Geometry::Vertices { vertex_count: 3 }, false)
    }

    #[test]
    fn selects_binding_by_mode() {
        let set = PipelineSet::new(binding(Geometry::Indexed { index_count: 36 }, true), flat())
            .unwrap();
        assert_eq!(
            set.get(RenderMode::Animated3D).geometry,
            Geometry::Indexed { index_count: 36 }
        );
        assert_eq!(
            set.get(RenderMode::Static2D).geometry,
            Geometry::Vertices { vertex_count: 3 }
        );
    }

    #[test]
    fn non_indexed_mesh_rejected() {
        let err = PipelineSet::new(binding(Geometry::Vertices { vertex_count: 36 }, true), flat())
            .unwrap_err();
        assert!(matches!(err, InitError::Binding { mode: RenderMode::Animated3D, .. }));
    }

    #[test]
    fn empty_mesh_rejected() {
        let err = PipelineSet::new(binding(Geometry::Indexed { index_count: 0 }, true), flat())
            .unwrap_err();
        assert!(matches!(err, InitError::Binding { mode: RenderMode::Animated3D, .. }));
    }

    #[test]
    fn untextured_mesh_rejected() {
        assert!(
            PipelineSet::new(binding(Geometry::Indexed { index_count: 6 }, false), flat()).is_err()
        );
    }

    #[test]
    fn flat_binding_must_be_one_triangle() {
        let err = PipelineSet::new(
            binding(Geometry::Indexed { index_count: 6 }, true),
            binding(Geometry::Vertices { vertex_count: 6 }, false),
        )
        .unwrap_err();
        assert!(matches!(err, InitError::Binding { mode: RenderMode::Static2D, .. }));
    }
}
