use std::f32::consts::PI;

use cgmath::Vector3;

use super::Mesh;

/// Samples the sombrero (sinc) function on a `(2 * detail + 1)` square grid.
/// `radius` sets how many ripples fit across the grid.
pub fn sombrero(radius: f32, detail: u32) -> Vec<Vec<f32>> {
    let detail = detail as i32;
    (-detail..=detail)
        .map(|i| {
            (-detail..=detail)
                .map(|j| {
                    let r = 2.0 * PI * ((i * i + j * j) as f32).sqrt() * radius / detail as f32;
                    if r != 0.0 {
                        r.sin() / r
                    } else {
                        1.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Four vertices per grid cell, spanning [-1, 1] in x and z with the sample
/// as height. Each quad is drawn on its own as a triangle fan or line loop.
pub fn height_field_mesh(data: &[Vec<f32>]) -> Vec<Vector3<f32>> {
    let m = data.len();
    let n = data.first().map_or(0, Vec::len);
    if m < 2 || n < 2 {
        return Vec::new();
    }
    let x = |i: usize| 2.0 * i as f32 / (m - 1) as f32 - 1.0;
    let z = |j: usize| 2.0 * j as f32 / (n - 1) as f32 - 1.0;

    let mut vertices = Vec::with_capacity(4 * (m - 1) * (n - 1));
    for i in 0..m - 1 {
        for j in 0..n - 1 {
            vertices.push(Vector3::new(x(i), data[i][j], z(j)));
            vertices.push(Vector3::new(x(i + 1), data[i + 1][j], z(j)));
            vertices.push(Vector3::new(x(i + 1), data[i + 1][j + 1], z(j + 1)));
            vertices.push(Vector3::new(x(i), data[i][j + 1], z(j + 1)));
        }
    }
    vertices
}

impl Mesh {
    /// Appends one vertex per sample, spanning [-1, 1] in x and z, and a
    /// single triangle strip over the whole grid. Each row ends with two
    /// extra indices that carry the strip over to the next row; those
    /// row-joining triangles are degenerate or sliver triangles.
    pub fn height_field(&mut self, data: &[Vec<f32>]) {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if rows < 2 || cols < 2 {
            return;
        }
        if data.iter().any(|row| row.len() < cols) {
            log::warn!("height field rows are shorter than the first ({cols} samples), skipping it");
            return;
        }
        let x = |i: usize| 2.0 * i as f32 / (rows - 1) as f32 - 1.0;
        let z = |j: usize| 2.0 * j as f32 / (cols - 1) as f32 - 1.0;

        let vertices: Vec<_> = data
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .take(cols)
                    .enumerate()
                    .map(move |(j, &h)| Vector3::new(x(i), h, z(j)))
            })
            .collect();
        let offset = self.push_vertices(&vertices);

        let at = |i: usize, j: usize| offset + (i * cols + j) as u32;
        for i in 0..rows - 1 {
            for j in 0..cols {
                self.indices.push(at(i, j));
                self.indices.push(at(i + 1, j));
            }
            self.indices.push(at(i + 1, cols - 1));
            self.indices.push(at(i + 1, 0));
        }
    }
}
