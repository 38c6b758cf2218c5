use super::Vec3;

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    pub fn uniform_scale(s: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = s;
        m.data[5] = s;
        m.data[10] = s;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Pitch about X then yaw about Y, applied as `Rx * Ry`
    pub fn orientation(pitch: f32, yaw: f32) -> Self {
        Self::rotation_x(pitch).mul(&Self::rotation_y(yaw))
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// Matrix multiplication
    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Transpose of the upper 3x3, i.e. the inverse of a pure rotation
    pub fn rotation_inverse(&self) -> Self {
        let d = &self.data;
        Self {
            data: [
                d[0], d[4], d[8], 0.0,
                d[1], d[5], d[9], 0.0,
                d[2], d[6], d[10], 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    /// Transform a direction (ignores translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * d.x + self.data[4] * d.y + self.data[8] * d.z,
            self.data[1] * d.x + self.data[5] * d.y + self.data[9] * d.z,
            self.data[2] * d.x + self.data[6] * d.y + self.data[10] * d.z,
        )
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(a.distance(&b) < 0.0001, "{a:?} != {b:?}");
    }

    #[test]
    fn test_translation() {
        let result = Mat4::translation(1.0, 2.0, 3.0).transform_point(Vec3::ZERO);
        assert_close(result, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_uniform_scale() {
        let result = Mat4::uniform_scale(1.2).transform_point(Vec3::new(1.0, 2.0, 3.0));
        assert_close(result, Vec3::new(1.2, 2.4, 3.6));
    }

    #[test]
    fn test_rotation_y_turns_x_toward_minus_z() {
        let m = Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        assert_close(m.transform_point(Vec3::RIGHT), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_rotation_x_turns_y_toward_z() {
        let m = Mat4::rotation_x(std::f32::consts::FRAC_PI_2);
        assert_close(m.transform_point(Vec3::UP), Vec3::FORWARD);
    }

    #[test]
    fn test_orientation_applies_yaw_first() {
        let m = Mat4::orientation(std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
        // yaw sends +X to -Z, pitch then sends -Z to +Y
        assert_close(m.transform_point(Vec3::RIGHT), Vec3::UP);
    }

    #[test]
    fn test_rotation_inverse() {
        let m = Mat4::orientation(0.3, 1.1);
        let p = Vec3::new(1.0, -2.0, 0.5);
        let back = m.rotation_inverse().transform_point(m.transform_point(p));
        assert_close(back, p);
    }

    #[test]
    fn test_matrix_mul() {
        let combined = Mat4::translation(1.0, 0.0, 0.0).mul(&Mat4::uniform_scale(2.0));
        let result = combined.transform_point(Vec3::RIGHT);
        assert!((result.x - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 400.0), Vec3::ZERO, Vec3::UP);
        assert_close(view.transform_point(Vec3::new(0.0, 0.0, 400.0)), Vec3::ZERO);
        assert_close(view.transform_point(Vec3::ZERO), Vec3::new(0.0, 0.0, -400.0));
    }
}
