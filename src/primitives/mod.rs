use cgmath::{prelude::*, Vector3};

pub mod cube;
pub mod flat;
pub mod heightfield;
pub mod sphere;
pub mod tetrahedron;

pub use flat::{circle, sierpinski, tessellate};
pub use heightfield::{height_field_mesh, sombrero};
pub use tetrahedron::sierpinski3;

/// General vertex layout shared with all primitives
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PrimitiveVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Vertices and indices that several shapes append into, so every shape of
/// a scene can share one vertex buffer and one index buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vector3<f32>>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interleaved position/normal data ready for upload. `strip` says how
    /// the indices are assembled when computing normals.
    pub fn to_vertices(&self, strip: bool) -> Vec<PrimitiveVertex> {
        let normals = calc_normals(&self.vertices, &self.indices, strip);
        self.vertices
            .iter()
            .zip(normals)
            .map(|(p, n)| PrimitiveVertex {
                position: (*p).into(),
                normal: n.into(),
            })
            .collect()
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn push_vertices(&mut self, vertices: &[Vector3<f32>]) -> u32 {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        offset
    }
}

/// Per-vertex normals: the sum of the face normals of every triangle a
/// vertex belongs to, normalized. Indices form a triangle strip when `strip`
/// is set (winding flips on odd triangles) and a triangle list otherwise.
pub fn calc_normals(vertices: &[Vector3<f32>], indices: &[u32], strip: bool) -> Vec<Vector3<f32>> {
    calc_normals_skipping(vertices, indices, strip, &[])
}

/// Like `calc_normals`, leaving out the triangles that start at the index
/// positions in `skip` (for example the row-joining triangles of a strip).
pub fn calc_normals_skipping(
    vertices: &[Vector3<f32>],
    indices: &[u32],
    strip: bool,
    skip: &[usize],
) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zero(); vertices.len()];
    let step = if strip { 1 } else { 3 };
    for i in (0..indices.len().saturating_sub(2)).step_by(step) {
        if skip.contains(&i) {
            continue;
        }
        let (j, k, l) = (
            indices[i] as usize,
            indices[i + 1] as usize,
            indices[i + 2] as usize,
        );
        let (a, b, c) = (vertices[j], vertices[k], vertices[l]);
        let edge = if strip && i % 2 != 0 { a - b } else { b - a };
        let face = edge.cross(a - c);
        normals[j] += face;
        normals[k] += face;
        normals[l] += face;
    }
    for n in normals.iter_mut() {
        if n.magnitude2() > 0.0 {
            *n = n.normalize();
        }
    }
    normals
}

/// Midpoint that does not depend on argument order, so shared edges produce
/// bit-identical vertices.
pub(crate) fn midpoint<V>(a: V, b: V) -> V
where
    V: std::ops::Add<Output = V> + std::ops::Mul<f32, Output = V>,
{
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_list_normal_faces_out_of_winding() {
        let vertices = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        ];
        let normals = calc_normals(&vertices, &[0, 1, 2], false);
        for n in normals {
            assert!((n - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6, "{n:?}");
        }
    }

    #[test]
    fn test_skipped_triangle_adds_nothing() {
        let vertices = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ];
        let indices = [0, 1, 2, 2, 1, 3];
        let all = calc_normals(&vertices, &indices, false);
        assert!((all[1] - Vector3::new(0.0, 0.0, 1.0)).magnitude() > 0.1);

        let normals = calc_normals_skipping(&vertices, &indices, false, &[3]);
        assert_eq!(normals[3], Vector3::zero());
        for n in &normals[..3] {
            assert!((n - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6, "{n:?}");
        }
        assert_eq!(calc_normals_skipping(&vertices, &indices, false, &[]), all);
    }

    #[test]
    fn test_unused_vertex_keeps_zero_normal() {
        let vertices = [Vector3::zero(); 4];
        let normals = calc_normals(&vertices, &[], true);
        assert!(normals.iter().all(|n| *n == Vector3::zero()));
    }

    #[test]
    fn test_to_vertices_interleaves() {
        let mut mesh = Mesh::new();
        mesh.cube_between(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        let vertices = mesh.to_vertices(true);
        assert_eq!(vertices.len(), 8);
        assert_eq!(vertices[0].position, [-1.0, -1.0, -1.0]);
        assert_eq!(mesh.index_bytes().len(), 14 * 4);
    }
}
