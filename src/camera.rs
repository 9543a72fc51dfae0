use cgmath::{Matrix4, Vector2, Vector3};

use crate::transform;

/// Projection for the standard viewer: a perspective frustum with the
/// camera pulled back along -z.
pub struct Camera {
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    pub distance: f32,
}

impl Camera {
    pub fn build_projection_matrix(&self) -> Matrix4<f32> {
        let proj = transform::perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * transform::translate(Vector3::new(0.0, 0.0, -self.distance))
    }
}

/// What a drag does: plain drag rotates, shift-drag moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Move,
}

#[derive(Copy, Clone, Debug)]
struct Drag {
    mode: DragMode,
    initial_coord: Vector2<f32>,
    initial_thetas: Vector3<f32>,
    initial_position: Vector3<f32>,
}

/// Mouse-driven rotation, position and scale of the displayed object.
pub struct CameraController {
    // Degrees about X, Y, Z
    pub thetas: Vector3<f32>,
    pub position: Vector3<f32>,
    pub scale: f32,
    rotate_speed: f32,
    wheel_divisor: f32,
    move_scales_with_zoom: bool,
    drag: Option<Drag>,
}

impl CameraController {
    pub fn new(scale: f32, rotate_speed: f32, wheel_divisor: f32) -> Self {
        Self {
            thetas: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
            scale,
            rotate_speed,
            wheel_divisor,
            move_scales_with_zoom: false,
            drag: None,
        }
    }

    /// When set, shift-drag travel is divided by the scale at the time of
    /// the move, keeping the grabbed point under the cursor.
    pub fn with_move_scaling(mut self, enabled: bool) -> Self {
        self.move_scales_with_zoom = enabled;
        self
    }

    /// Maps a pixel position to [-1, 1] on both axes with y pointing up.
    pub fn mouse_coords(x: f64, y: f64, width: u32, height: u32) -> Vector2<f32> {
        let x = 2.0 * (x / width.max(1) as f64) - 1.0;
        let y = 1.0 - 2.0 * (y / height.max(1) as f64);
        Vector2::new(x as f32, y as f32)
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.map(|d| d.mode)
    }

    /// Starts a drag from `coord` (already in [-1, 1]).
    pub fn process_mouse_down(&mut self, coord: Vector2<f32>, shift: bool) {
        self.drag = Some(Drag {
            mode: if shift { DragMode::Move } else { DragMode::Rotate },
            initial_coord: coord,
            initial_thetas: self.thetas,
            initial_position: self.position,
        });
    }

    /// Follows the drag. If the button was released while we weren't
    /// looking the drag just ends.
    pub fn process_mouse_moved(&mut self, coord: Vector2<f32>, button_down: bool) -> bool {
        if !button_down {
            return self.drag.take().is_some();
        }
        self.apply_drag(coord)
    }

    /// Applies the final position of the drag and ends it.
    pub fn process_mouse_up(&mut self, coord: Vector2<f32>) -> bool {
        let handled = self.apply_drag(coord);
        self.drag = None;
        handled
    }

    /// Wheel scrolling grows or shrinks the object.
    pub fn process_wheel(&mut self, delta_y: f32) {
        self.scale *= (self.wheel_divisor - delta_y) / self.wheel_divisor;
    }

    /// `S * T * Rz * Ry * Rx`
    pub fn build_model_view_matrix(&self) -> Matrix4<f32> {
        transform::scale(Vector3::new(self.scale, self.scale, self.scale))
            * transform::translate(self.position)
            * transform::euler(self.thetas)
    }

    fn apply_drag(&mut self, coord: Vector2<f32>) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let delta = coord - drag.initial_coord;
        match drag.mode {
            DragMode::Rotate => {
                self.thetas.y = drag.initial_thetas.y - delta.x * self.rotate_speed;
                self.thetas.x = drag.initial_thetas.x + delta.y * self.rotate_speed;
            }
            DragMode::Move => {
                let delta = if self.move_scales_with_zoom {
                    delta / self.scale
                } else {
                    delta
                };
                self.position.x = drag.initial_position.x + delta.x;
                self.position.y = drag.initial_position.y + delta.y;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(0.5, 180.0, 1000.0)
    }

    #[test]
    fn test_mouse_coords_center_and_corners() {
        assert_eq!(CameraController::mouse_coords(50.0, 50.0, 100, 100), Vector2::new(0.0, 0.0));
        assert_eq!(CameraController::mouse_coords(0.0, 0.0, 100, 100), Vector2::new(-1.0, 1.0));
        assert_eq!(CameraController::mouse_coords(100.0, 100.0, 100, 100), Vector2::new(1.0, -1.0));
    }

    #[test]
    fn test_drag_rotates() {
        let mut c = controller();
        c.process_mouse_down(Vector2::new(0.0, 0.0), false);
        assert!(c.process_mouse_moved(Vector2::new(0.5, 0.25), true));
        assert_eq!(c.thetas, Vector3::new(45.0, -90.0, 0.0));
        assert!(c.process_mouse_up(Vector2::new(0.5, 0.5)));
        assert_eq!(c.thetas, Vector3::new(90.0, -90.0, 0.0));
        assert_eq!(c.drag_mode(), None);
    }

    #[test]
    fn test_shift_drag_moves() {
        let mut c = controller();
        c.process_mouse_down(Vector2::new(0.0, 0.0), true);
        assert_eq!(c.drag_mode(), Some(DragMode::Move));
        c.process_mouse_moved(Vector2::new(0.25, -0.5), true);
        assert_eq!(c.position, Vector3::new(0.25, -0.5, 0.0));
        assert_eq!(c.thetas, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_scaled_move_follows_cursor() {
        let mut c = CameraController::new(0.01, 180.0, 1000.0).with_move_scaling(true);
        c.process_mouse_down(Vector2::new(-0.5, 0.0), true);
        c.process_mouse_up(Vector2::new(0.5, 0.0));
        assert!((c.position.x - 100.0).abs() < 1e-3, "{:?}", c.position);
        let origin = transform::transform_point(&c.build_model_view_matrix(), Vector3::new(0.0, 0.0, 0.0));
        assert!((origin.x - 1.0).abs() < 1e-5, "{origin:?}");

        // Without scaling the same drag barely moves a small model
        let mut plain = CameraController::new(0.01, 180.0, 1000.0);
        plain.process_mouse_down(Vector2::new(-0.5, 0.0), true);
        plain.process_mouse_up(Vector2::new(0.5, 0.0));
        let origin = transform::transform_point(&plain.build_model_view_matrix(), Vector3::new(0.0, 0.0, 0.0));
        assert!((origin.x - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_negative_speed_reverses_rotation() {
        let mut c = CameraController::new(0.5, -180.0, 1000.0);
        c.process_mouse_down(Vector2::new(0.0, 0.0), false);
        c.process_mouse_up(Vector2::new(0.5, 0.25));
        assert_eq!(c.thetas, Vector3::new(-45.0, 90.0, 0.0));
    }

    #[test]
    fn test_released_button_ends_drag() {
        let mut c = controller();
        c.process_mouse_down(Vector2::new(0.0, 0.0), false);
        assert!(c.process_mouse_moved(Vector2::new(0.5, 0.0), false));
        assert_eq!(c.thetas, Vector3::new(0.0, 0.0, 0.0));
        assert!(!c.process_mouse_moved(Vector2::new(0.9, 0.0), true));
    }

    #[test]
    fn test_wheel_scales() {
        let mut c = controller();
        c.process_wheel(100.0);
        assert!((c.scale - 0.45).abs() < 1e-6);
        c.process_wheel(-100.0);
        assert!((c.scale - 0.495).abs() < 1e-6);
    }

    #[test]
    fn test_model_view_scales_translation() {
        let mut c = controller();
        c.position = Vector3::new(1.0, 0.0, 0.0);
        let p = transform::transform_point(&c.build_model_view_matrix(), Vector3::new(0.0, 0.0, 0.0));
        assert!((p - Vector3::new(0.5, 0.0, 0.0)).x.abs() < 1e-6);
    }
}
