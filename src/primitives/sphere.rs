use std::collections::HashMap;

use cgmath::{prelude::*, Vector3};

use super::{midpoint, Mesh};

// Regular tetrahedron inscribed in the unit sphere.
const TETRAHEDRON: [[f32; 3]; 4] = [
    [0.0, 0.0, -1.0],
    [0.0, 0.942_809_04, 0.333_333_33],
    [-0.816_496_6, -0.471_404_52, 0.333_333_33],
    [0.816_496_6, -0.471_404_52, 0.333_333_33],
];

/// Default subdivision count for spheres (1024 triangles).
pub const DEFAULT_SUBDIVISIONS: u32 = 4;

impl Mesh {
    /// Appends an approximate unit sphere made by repeatedly splitting the
    /// faces of a tetrahedron. Shared vertices are reused. Triangle list.
    pub fn unit_sphere(&mut self, subdivisions: u32) {
        let [a, b, c, d] = TETRAHEDRON.map(Vector3::from);
        let start = self.vertices.len();
        let mut seen = HashMap::new();
        self.divide_triangle(a, b, c, subdivisions, &mut seen);
        self.divide_triangle(d, c, b, subdivisions, &mut seen);
        self.divide_triangle(a, d, b, subdivisions, &mut seen);
        self.divide_triangle(a, c, d, subdivisions, &mut seen);
        for v in &mut self.vertices[start..] {
            *v = v.normalize();
        }
    }

    /// A subdivided sphere of `radius` around `center`.
    pub fn sphere(&mut self, center: Vector3<f32>, radius: f32, subdivisions: u32) {
        let start = self.vertices.len();
        self.unit_sphere(subdivisions);
        for v in &mut self.vertices[start..] {
            *v = *v * radius + center;
        }
    }

    fn divide_triangle(
        &mut self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        c: Vector3<f32>,
        subdivisions: u32,
        seen: &mut HashMap<[u32; 3], u32>,
    ) {
        if subdivisions == 0 {
            for v in [a, b, c] {
                let index = self.vertex_index(v, seen);
                self.indices.push(index);
            }
            return;
        }
        let (ab, ac, bc) = (midpoint(a, b), midpoint(a, c), midpoint(b, c));
        self.divide_triangle(a, ab, ac, subdivisions - 1, seen);
        self.divide_triangle(ab, b, bc, subdivisions - 1, seen);
        self.divide_triangle(bc, c, ac, subdivisions - 1, seen);
        self.divide_triangle(ab, bc, ac, subdivisions - 1, seen);
    }

    fn vertex_index(&mut self, v: Vector3<f32>, seen: &mut HashMap<[u32; 3], u32>) -> u32 {
        // + 0.0 folds -0.0 into 0.0 so both hash alike
        let key = [(v.x + 0.0).to_bits(), (v.y + 0.0).to_bits(), (v.z + 0.0).to_bits()];
        *seen.entry(key).or_insert_with(|| {
            self.vertices.push(v);
            self.vertices.len() as u32 - 1
        })
    }
}
