//! Matrix helpers. All angles are in degrees and matrices act on column
//! vectors, so `a * b` applies `b` first.

use cgmath::{prelude::*, Deg, Matrix4, Point3, Vector3};

pub fn translate(v: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(v)
}

pub fn rotate_x(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_x(Deg(angle))
}

pub fn rotate_y(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Deg(angle))
}

pub fn rotate_z(angle: f32) -> Matrix4<f32> {
    Matrix4::from_angle_z(Deg(angle))
}

/// Euler rotation: X is applied first, then Y, then Z (`Rz * Ry * Rx`).
pub fn euler(angles: Vector3<f32>) -> Matrix4<f32> {
    rotate_z(angles.z) * rotate_y(angles.y) * rotate_x(angles.x)
}

/// Rotation about an arbitrary axis. The axis does not need to be unit length;
/// a zero axis gives the identity.
pub fn rotate(angle: f32, axis: Vector3<f32>) -> Matrix4<f32> {
    if axis.magnitude2() == 0.0 {
        return Matrix4::identity();
    }
    Matrix4::from_axis_angle(axis.normalize(), Deg(angle))
}

pub fn scale(size: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_nonuniform_scale(size.x, size.y, size.z)
}

/// Symmetric perspective frustum. Degenerate parameters (a zero near plane,
/// `near == far`, a flat or folded field of view) still give a matrix; the
/// non-finite entries just make the geometry vanish.
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let f = 1.0 / (fovy.to_radians() / 2.0).tan();
    let d = far - near;
    Matrix4::new(
        f / aspect, 0.0, 0.0,                       0.0,
        0.0,        f,   0.0,                       0.0,
        0.0,        0.0, -(near + far) / d,        -1.0,
        0.0,        0.0, -2.0 * near * far / d,     0.0,
    )
}

pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4<f32> {
    cgmath::ortho(left, right, bottom, top, near, far)
}

pub fn look_at(eye: Point3<f32>, at: Point3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::look_at_rh(eye, at, up)
}

/// Flattens geometry onto the `y = 0` plane as seen from a point light.
pub fn shadow_projection(light: Vector3<f32>) -> Matrix4<f32> {
    let mut project = Matrix4::identity();
    project.y.w = -1.0 / light.y;
    project.w.w = 0.0;
    translate(light) * project * translate(-light)
}

/// Column-major floats, the layout uniform uploads expect.
pub fn flatten(m: &Matrix4<f32>) -> [f32; 16] {
    let cols: [[f32; 4]; 4] = (*m).into();
    let mut out = [0.0; 16];
    for (i, col) in cols.iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(col);
    }
    out
}

/// Transforms a point (w = 1) and drops back to three components.
pub fn transform_point(m: &Matrix4<f32>, p: Vector3<f32>) -> Vector3<f32> {
    let v = *m * p.extend(1.0);
    v.truncate() / v.w
}
