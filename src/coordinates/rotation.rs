//! Elementary axis rotations.
//!
//! All rotations here rotate the coordinate *frame* by `angle` (the vector is
//! fixed), i.e. the IAU `R1`/`R3` convention:
//!
//! ```text
//! R3(a) = | cos a   sin a   0 |
//!         |-sin a   cos a   0 |
//!         |   0       0     1 |
//! ```

use nalgebra::{Matrix3, Vector3};

/// Rotates the frame about the x axis, in place
pub fn rotate_x(v: &mut Vector3<f64>, angle: f64) {
    let (s, c) = angle.sin_cos();
    let y = c * v.y + s * v.z;
    v.z = -s * v.y + c * v.z;
    v.y = y;
}

/// Rotates the frame about the z axis, in place
pub fn rotate_z(v: &mut Vector3<f64>, angle: f64) {
    let (s, c) = angle.sin_cos();
    let x = c * v.x + s * v.y;
    v.y = -s * v.x + c * v.y;
    v.x = x;
}

/// Frame rotation matrix about the x axis (R1)
pub fn r1(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Frame rotation matrix about the z axis (R3)
pub fn r3(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_in_place_matches_matrix() {
        let v = Vector3::new(0.3, -1.2, 0.7);

        let mut vx = v;
        rotate_x(&mut vx, 0.4);
        assert_relative_eq!(vx, r1(0.4) * v, epsilon = 1e-15);

        let mut vz = v;
        rotate_z(&mut vz, -1.1);
        assert_relative_eq!(vz, r3(-1.1) * v, epsilon = 1e-15);
    }

    #[test]
    fn test_frame_rotation_sense() {
        // Rotating the frame +90° about z brings the old y axis onto +x
        let mut v = Vector3::new(0.0, 1.0, 0.0);
        rotate_z(&mut v, FRAC_PI_2);
        assert_relative_eq!(v, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn test_transpose_is_inverse() {
        let m = r3(0.8) * r1(-0.2);
        assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-15);
    }
}
