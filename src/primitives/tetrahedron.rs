use cgmath::Vector3;

use super::{midpoint, Mesh};

impl Mesh {
    /// Appends a tetrahedron as a six-index triangle strip.
    pub fn tetrahedron(&mut self, a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>, d: Vector3<f32>) {
        let offset = self.push_vertices(&[a, b, c, d]);
        self.indices
            .extend([0, 1, 2, 3, 0, 1].iter().map(|i| offset + i));
    }
}

/// Sierpinski tetrahedron: `count` rounds of splitting into the four corner
/// tetrahedra. Each leaf adds its four faces as a triangle list.
pub fn sierpinski3(
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
    d: Vector3<f32>,
    count: u32,
) -> Vec<Vector3<f32>> {
    let mut points = Vec::with_capacity(12 * 4usize.pow(count));
    divide_tetrahedron(a, b, c, d, count, &mut points);
    points
}

fn divide_tetrahedron(
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
    d: Vector3<f32>,
    count: u32,
    points: &mut Vec<Vector3<f32>>,
) {
    if count == 0 {
        points.extend_from_slice(&[a, c, b, a, c, d, a, b, d, b, c, d]);
        return;
    }
    let (ab, ac, ad) = (midpoint(a, b), midpoint(a, c), midpoint(a, d));
    let (bc, bd, cd) = (midpoint(b, c), midpoint(b, d), midpoint(c, d));
    divide_tetrahedron(a, ab, ac, ad, count - 1, points);
    divide_tetrahedron(ab, b, bc, bd, count - 1, points);
    divide_tetrahedron(ac, bc, c, cd, count - 1, points);
    divide_tetrahedron(ad, bd, cd, d, count - 1, points);
}
