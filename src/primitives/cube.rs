use cgmath::Vector3;

use super::Mesh;

// Strip order: around d, around h, around f, around b.
const CUBE_STRIP: [u32; 14] = [0, 2, 3, 4, 0, 7, 6, 4, 5, 2, 6, 1, 0, 2];

impl Mesh {
    /// Appends a cube whose faces `abcd` and `efgh` are opposite each other.
    /// The indices are a triangle strip.
    #[allow(clippy::too_many_arguments)]
    pub fn cube(
        &mut self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        c: Vector3<f32>,
        d: Vector3<f32>,
        e: Vector3<f32>,
        f: Vector3<f32>,
        g: Vector3<f32>,
        h: Vector3<f32>,
    ) {
        let offset = self.push_vertices(&[a, b, c, d, e, f, g, h]);
        self.indices.extend(CUBE_STRIP.iter().map(|i| offset + i));
    }

    /// Appends an axis-aligned cube with `pt1` and `pt2` at opposite corners.
    pub fn cube_between(&mut self, pt1: Vector3<f32>, pt2: Vector3<f32>) {
        self.cube(
            Vector3::new(pt1.x, pt1.y, pt1.z),
            Vector3::new(pt2.x, pt1.y, pt1.z),
            Vector3::new(pt2.x, pt2.y, pt1.z),
            Vector3::new(pt1.x, pt2.y, pt1.z),
            Vector3::new(pt1.x, pt2.y, pt2.z),
            Vector3::new(pt2.x, pt2.y, pt2.z),
            Vector3::new(pt2.x, pt1.y, pt2.z),
            Vector3::new(pt1.x, pt1.y, pt2.z),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_corners() -> [Vector3<f32>; 8] {
        [
            Vector3::new(-0.5, -0.5, 0.5),
            Vector3::new(0.5, -0.5, 0.5),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(-0.5, 0.5, 0.5),
            Vector3::new(-0.5, 0.5, -0.5),
            Vector3::new(0.5, 0.5, -0.5),
            Vector3::new(0.5, -0.5, -0.5),
            Vector3::new(-0.5, -0.5, -0.5),
        ]
    }

    fn build(mesh: &mut Mesh) {
        let [a, b, c, d, e, f, g, h] = unit_corners();
        mesh.cube(a, b, c, d, e, f, g, h);
    }

    #[test]
    fn test_cube_is_deterministic() {
        let mut first = Mesh::new();
        let mut second = Mesh::new();
        build(&mut first);
        build(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_second_cube_indices_are_offset() {
        let mut mesh = Mesh::new();
        build(&mut mesh);
        build(&mut mesh);
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.indices.len(), 28);
        assert_eq!(&mesh.indices[14..17], &[8, 10, 11]);
    }

    #[test]
    fn test_cube_between_corner_order() {
        let mut mesh = Mesh::new();
        mesh.cube_between(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices[0], Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[5], Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices[7], Vector3::new(0.0, 0.0, 3.0));
    }
}
