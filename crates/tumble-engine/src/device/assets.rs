//! CPU-side geometry and texture handed to the GPU layer at startup.
//!
//! The engine does not generate or load these; the application supplies them.

use bytemuck::{Pod, Zeroable};

/// Lit, textured mesh vertex (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    #[inline]
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Vertex for the flat 2D triangle: clip-space position and color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FlatVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl FlatVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x4, // position
        1 => Float32x4  // color
    ];

    #[inline]
    pub const fn new(position: [f32; 4], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FlatVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Returns a description of the first structural problem, if any.
    pub fn problem(&self) -> Option<&'static str> {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return Some("mesh is empty");
        }
        if self.indices.len() % 3 != 0 {
            return Some("index count is not a multiple of 3");
        }
        let n = self.vertices.len();
        if self.indices.iter().any(|&i| usize::from(i) >= n) {
            return Some("index out of range");
        }
        None
    }
}

/// Tightly packed RGBA8 image (sRGB encoded).
#[derive(Debug, Clone, Default)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    pub fn problem(&self) -> Option<&'static str> {
        if self.width == 0 || self.height == 0 {
            return Some("texture has zero size");
        }
        if self.rgba.len() != self.width as usize * self.height as usize * 4 {
            return Some("texture data length does not match width * height * 4");
        }
        None
    }
}

/// Everything the two pipelines draw.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub mesh: MeshData,
    pub texture: TextureData,
    pub triangle: [FlatVertex; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri_mesh() -> MeshData {
        let v = MeshVertex::new([0.0; 3], [0.0, 0.0, 1.0], [0.0; 2]);
        MeshData {
            vertices: vec![v; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn vertex_sizes_match_layouts() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(MeshVertex::layout().array_stride, 32);
        assert_eq!(std::mem::size_of::<FlatVertex>(), 32);
    }

    #[test]
    fn valid_mesh_has_no_problem() {
        assert_eq!(tri_mesh().problem(), None);
    }

    #[test]
    fn out_of_range_index_detected() {
        let mut m = tri_mesh();
        m.indices[2] = 3;
        assert_eq!(m.problem(), Some("index out of range"));
    }

    #[test]
    fn partial_triangle_detected() {
        let mut m = tri_mesh();
        m.indices.push(0);
        assert!(m.problem().is_some());
    }

    #[test]
    fn texture_length_checked() {
        let t = TextureData {
            width: 2,
            height: 2,
            rgba: vec![255; 15],
        };
        assert!(t.problem().is_some());
        let t = TextureData {
            rgba: vec![255; 16],
            ..t
        };
        assert_eq!(t.problem(), None);
    }
}
