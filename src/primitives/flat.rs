//! Generators for the 2D examples. Output is a plain triangle list.

use std::f32::consts::PI;

use cgmath::Vector2;

use super::midpoint;

/// A filled circle around `c` as `n` triangles sharing the center.
pub fn circle(c: Vector2<f32>, r: f32, n: u32) -> Vec<Vector2<f32>> {
    let theta = 2.0 * PI / n as f32;
    let mut a = Vector2::new(c.x + r, c.y);
    let mut vertices = Vec::with_capacity(3 * n as usize);
    for i in 1..=n {
        let angle = i as f32 * theta;
        let b = Vector2::new(c.x + angle.cos() * r, c.y + angle.sin() * r);
        vertices.extend_from_slice(&[c, a, b]);
        a = b;
    }
    vertices
}

/// Splits a triangle into four, `count` times over.
pub fn tessellate(a: Vector2<f32>, b: Vector2<f32>, c: Vector2<f32>, count: u32) -> Vec<Vector2<f32>> {
    let mut points = Vec::with_capacity(3 * 4usize.pow(count));
    divide(a, b, c, count, true, &mut points);
    points
}

/// Sierpinski triangle: like `tessellate` but the middle triangle is dropped.
pub fn sierpinski(a: Vector2<f32>, b: Vector2<f32>, c: Vector2<f32>, count: u32) -> Vec<Vector2<f32>> {
    let mut points = Vec::with_capacity(3 * 3usize.pow(count));
    divide(a, b, c, count, false, &mut points);
    points
}

fn divide(
    a: Vector2<f32>,
    b: Vector2<f32>,
    c: Vector2<f32>,
    count: u32,
    keep_middle: bool,
    points: &mut Vec<Vector2<f32>>,
) {
    if count == 0 {
        points.extend_from_slice(&[a, b, c]);
        return;
    }
    let (ab, ac, bc) = (midpoint(a, b), midpoint(a, c), midpoint(b, c));
    divide(a, ab, ac, count - 1, keep_middle, points);
    divide(ab, b, bc, count - 1, keep_middle, points);
    divide(ac, bc, c, count - 1, keep_middle, points);
    if keep_middle {
        divide(bc, ac, ab, count - 1, keep_middle, points);
    }
}
