use crate::math::Mat4;

/// Radians of rotation per pixel of pointer travel
const DRAG_SENSITIVITY: f32 = 0.005;

/// Yaw added every frame while the pointer is not dragging
const AUTO_ROTATE_STEP: f32 = 0.001;

/// Pitch is kept short of the poles so the globe never flips
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

/// Globe orientation driven by pointer drags and a slow idle spin
#[derive(Debug, Clone, Default)]
pub struct RotationController {
    pub yaw: f32,
    pub pitch: f32,
    dragging: bool,
    last_pointer: Option<(f32, f32)>,
}

impl RotationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_pointer = Some((x, y));
    }

    /// Apply the drag delta since the last pointer event.
    ///
    /// Returns true when the orientation changed.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        if !self.dragging {
            return false;
        }
        let Some((last_x, last_y)) = self.last_pointer.replace((x, y)) else {
            return false;
        };

        self.yaw += (x - last_x) * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + (y - last_y) * DRAG_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        true
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.last_pointer = None;
    }

    /// Per-frame update: spin slowly unless the user holds the globe
    pub fn advance_frame(&mut self) {
        if !self.dragging {
            self.yaw += AUTO_ROTATE_STEP;
        }
    }

    /// Model matrix of the globe and everything attached to it
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::orientation(self.pitch, self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_rotate_when_idle() {
        let mut rotation = RotationController::new();
        for _ in 0..10 {
            rotation.advance_frame();
        }
        assert!((rotation.yaw - 0.01).abs() < 1e-6);
        assert_eq!(rotation.pitch, 0.0);
    }

    #[test]
    fn test_drag_rotates_proportionally() {
        let mut rotation = RotationController::new();
        rotation.pointer_down(100.0, 100.0);
        assert!(rotation.pointer_move(140.0, 80.0));
        assert!((rotation.yaw - 0.2).abs() < 1e-6);
        assert!((rotation.pitch + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_no_auto_rotate_while_dragging() {
        let mut rotation = RotationController::new();
        rotation.pointer_down(0.0, 0.0);
        rotation.advance_frame();
        assert_eq!(rotation.yaw, 0.0);

        rotation.pointer_up();
        rotation.advance_frame();
        assert!(rotation.yaw > 0.0);
    }

    #[test]
    fn test_first_move_uses_press_position() {
        let mut rotation = RotationController::new();
        rotation.pointer_down(500.0, 300.0);
        rotation.pointer_move(501.0, 300.0);
        assert!((rotation.yaw - DRAG_SENSITIVITY).abs() < 1e-6);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut rotation = RotationController::new();
        assert!(!rotation.pointer_move(10.0, 10.0));
        assert_eq!(rotation.yaw, 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut rotation = RotationController::new();
        rotation.pointer_down(0.0, 0.0);
        rotation.pointer_move(0.0, 10_000.0);
        assert!((rotation.pitch - PITCH_LIMIT).abs() < 1e-6);
    }
}
