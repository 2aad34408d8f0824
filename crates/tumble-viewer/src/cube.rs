//! Unit cube with per-face normals and UVs.

use tumble_engine::device::{MeshData, MeshVertex};
use tumble_engine::math::Vec3;

/// Outward normal plus an in-face basis `(u, v)` with `u × v = normal`, so
/// corners walked `-u-v, +u-v, +u+v, -u+v` are counter-clockwise from outside.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
    (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
    (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
];

/// Corner signs along `(u, v)` and the matching texture coordinates (v down).
const CORNERS: [(f32, f32, [f32; 2]); 4] = [
    (-1.0, -1.0, [0.0, 1.0]),
    (1.0, -1.0, [1.0, 1.0]),
    (1.0, 1.0, [1.0, 0.0]),
    (-1.0, 1.0, [0.0, 0.0]),
];

/// Axis-aligned cube centred on the origin: 24 vertices, 36 indices.
pub fn cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in FACES {
        let base = vertices.len() as u16;
        for (su, sv, uv) in CORNERS {
            let p = (normal + u * su + v * sv) * h;
            vertices.push(MeshVertex::new(p.to_array(), normal.to_array(), uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v3(a: [f32; 3]) -> Vec3 {
        Vec3::new(a[0], a[1], a[2])
    }

    #[test]
    fn counts() {
        let m = cube(1.0);
        assert_eq!(m.vertices.len(), 24);
        assert_eq!(m.indices.len(), 36);
        assert_eq!(m.problem(), None);
    }

    #[test]
    fn corners_on_the_surface() {
        let m = cube(2.0);
        for v in &m.vertices {
            assert!(v.position.iter().all(|c| c.abs() == 1.0), "{:?}", v.position);
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let m = cube(1.0);
        for tri in m.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| &m.vertices[usize::from(i)]);
            let winding = (v3(b.position) - v3(a.position)).cross(v3(c.position) - v3(a.position));
            assert!(winding.dot(v3(a.normal)) > 0.0);
        }
    }

    #[test]
    fn normals_point_outward() {
        let m = cube(1.0);
        for v in &m.vertices {
            assert!(v3(v.position).dot(v3(v.normal)) > 0.0);
        }
    }
}
