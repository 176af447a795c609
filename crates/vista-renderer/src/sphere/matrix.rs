//! 4×4 matrix math for the panorama camera.
//!
//! Column-major layout matching WGSL `mat4x4<f32>`. Right-handed view
//! space looking down -Z; clip-space depth in `[0, 1]` as wgpu expects.

/// 4×4 column-major matrix stored as `[f32; 16]`.
pub type Mat4 = [f32; 16];

pub const IDENTITY: Mat4 = [
    1.0, 0.0, 0.0, 0.0, // col 0
    0.0, 1.0, 0.0, 0.0, // col 1
    0.0, 0.0, 1.0, 0.0, // col 2
    0.0, 0.0, 0.0, 1.0, // col 3
];

/// Perspective projection with `[0, 1]` depth.
///
/// `fov_y` is the vertical field of view in radians; `near` and `far` must
/// be positive with `near < far`.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y * 0.5).tan();
    let range_inv = 1.0 / (near - far);

    [
        f / aspect,
        0.0,
        0.0,
        0.0,
        0.0,
        f,
        0.0,
        0.0,
        0.0,
        0.0,
        far * range_inv,
        -1.0,
        0.0,
        0.0,
        near * far * range_inv,
        0.0,
    ]
}

/// Rotation around the X axis.
pub fn rotate_x(angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    [
        1.0, 0.0, 0.0, 0.0, 0.0, c, s, 0.0, 0.0, -s, c, 0.0, 0.0, 0.0, 0.0, 1.0,
    ]
}

/// Rotation around the Y axis.
pub fn rotate_y(angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    [
        c, 0.0, -s, 0.0, 0.0, 1.0, 0.0, 0.0, s, 0.0, c, 0.0, 0.0, 0.0, 0.0, 1.0,
    ]
}

/// Multiply two 4×4 column-major matrices: result = a × b.
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += a[k * 4 + row] * b[col * 4 + k];
            }
            out[col * 4 + row] = sum;
        }
    }
    out
}

/// View matrix for a camera at the origin with the given yaw and pitch.
///
/// The camera's world rotation is yaw about Y, then pitch about the
/// rotated X, with zero roll. The view matrix is its inverse.
pub fn look_from_angles(yaw: f32, pitch: f32) -> Mat4 {
    mul(&rotate_x(-pitch), &rotate_y(-yaw))
}

/// Transform a point (w = 1) by `m`.
pub fn transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = m[row] * p[0] + m[4 + row] * p[1] + m[8 + row] * p[2] + m[12 + row];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx_eq(a: &[f32], b: &[f32], eps: f32) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < eps)
    }

    #[test]
    fn identity_mul_identity() {
        assert!(approx_eq(&mul(&IDENTITY, &IDENTITY), &IDENTITY, 1e-6));
    }

    #[test]
    fn rotate_x_90_degrees() {
        let r = rotate_x(FRAC_PI_2);
        // Y axis maps to Z.
        assert!(approx_eq(&r[4..8], &[0.0, 0.0, 1.0, 0.0], 1e-5));
    }

    #[test]
    fn rotate_y_90_degrees() {
        let r = rotate_y(FRAC_PI_2);
        assert!(approx_eq(&r[0..4], &[0.0, 0.0, -1.0, 0.0], 1e-5));
        assert!(approx_eq(&r[8..12], &[1.0, 0.0, 0.0, 0.0], 1e-5));
    }

    #[test]
    fn perspective_depth_range() {
        let p = perspective(FRAC_PI_2, 1.0, 1.0, 1100.0);
        let near = transform_point(&p, [0.0, 0.0, -1.0]);
        let far = transform_point(&p, [0.0, 0.0, -1100.0]);
        assert!((near[2] / near[3]).abs() < 1e-5);
        assert!((far[2] / far[3] - 1.0).abs() < 1e-5);
        assert!((p[11] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_angles_look_down_negative_z() {
        let v = look_from_angles(0.0, 0.0);
        assert!(approx_eq(&v, &IDENTITY, 1e-6));
    }

    #[test]
    fn positive_yaw_turns_left() {
        // After turning left by 90°, a point on -X is straight ahead (-Z).
        let v = look_from_angles(FRAC_PI_2, 0.0);
        let p = transform_point(&v, [-1.0, 0.0, 0.0]);
        assert!(approx_eq(&p[..3], &[0.0, 0.0, -1.0], 1e-5), "{p:?}");
    }

    #[test]
    fn positive_pitch_looks_up() {
        let v = look_from_angles(0.0, FRAC_PI_2);
        let p = transform_point(&v, [0.0, 1.0, 0.0]);
        assert!(approx_eq(&p[..3], &[0.0, 0.0, -1.0], 1e-5), "{p:?}");
    }

    #[test]
    fn pitch_applies_after_yaw() {
        // Turn left 90°, look up 45°: the target is up and to the left.
        let yaw = FRAC_PI_2;
        let pitch = FRAC_PI_2 / 2.0;
        let v = look_from_angles(yaw, pitch);
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let p = transform_point(&v, [-s, s, 0.0]);
        assert!(approx_eq(&p[..3], &[0.0, 0.0, -1.0], 1e-5), "{p:?}");
    }
}
