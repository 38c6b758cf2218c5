use std::f32::consts::{PI, TAU};

use super::geometry::{Mesh, Vertex};
use crate::math::Vec3;

/// Latitude/longitude sphere centred on the origin.
///
/// Vertices form a `(width_segments + 1) x (height_segments + 1)` grid with a
/// duplicated seam column so UVs stay continuous. The pole rows emit a single
/// triangle per quad.
pub fn uv_sphere(radius: f32, width_segments: usize, height_segments: usize) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let columns = width_segments + 1;

    let mut mesh = Mesh::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let polar = v * PI;

        mesh.add_vertices((0..=width_segments).map(|ix| {
            let u = ix as f32 / width_segments as f32;
            let azimuth = u * TAU;

            let normal = Vec3::new(
                -azimuth.cos() * polar.sin(),
                polar.cos(),
                azimuth.sin() * polar.sin(),
            );

            Vertex::new(normal.scale(radius), normal).with_uv(u, 1.0 - v)
        }));
    }

    let at = |ix: usize, iy: usize| (iy * columns + ix) as u32;

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = at(ix + 1, iy);
            let b = at(ix, iy);
            let c = at(ix, iy + 1);
            let d = at(ix + 1, iy + 1);

            if iy != 0 {
                mesh.add_triangle(a, b, d);
            }
            if iy != height_segments - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_globe_counts() {
        let mesh = uv_sphere(120.0, 64, 64);
        assert_eq!(mesh.vertex_count(), 65 * 65);
        assert_eq!(mesh.triangle_count(), 64 * (2 * 64 - 2));
    }

    #[test]
    fn test_vertices_on_surface() {
        let mesh = uv_sphere(2.5, 16, 16);
        for v in &mesh.vertices {
            assert!((v.position.length() - 2.5).abs() < 1e-4);
            assert!((v.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_first_row_is_north_pole() {
        let mesh = uv_sphere(1.0, 8, 8);
        assert!(mesh.vertices[0].position.distance(&Vec3::UP) < 1e-6);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = uv_sphere(1.0, 12, 6);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.index_data().iter().all(|&i| i < count));
    }

    #[test]
    fn test_outward_winding() {
        let mesh = uv_sphere(1.0, 16, 16);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize].position);
            let face_normal = (b - a).cross(&(c - a));
            let centroid = (a + b + c).scale(1.0 / 3.0);
            assert!(face_normal.dot(&centroid) > 0.0);
        }
    }
}
