//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are stored column-major (`m[column][row]`), which is the layout WGSL's
//! `mat4x4<f32>` expects, so they can be uploaded without transposition.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a 4x4 matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0) by a 4x4 matrix
pub fn transform_direction(m: Mat4, d: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * d.x + m[1][0] * d.y + m[2][0] * d.z,
        m[0][1] * d.x + m[1][1] * d.y + m[2][1] * d.z,
        m[0][2] * d.x + m[1][2] * d.y + m[2][2] * d.z,
    )
}

/// Translation matrix
pub fn translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = t.x;
    m[3][1] = t.y;
    m[3][2] = t.z;
    m
}

/// Non-uniform scale matrix
pub fn scaling(s: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s.x;
    m[1][1] = s.y;
    m[2][2] = s.z;
    m
}

/// Rotation about the X axis (radians, right-handed)
pub fn rotation_x(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[1][1] = cs;
    m[1][2] = sn;
    m[2][1] = -sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Y axis (radians, right-handed)
pub fn rotation_y(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][2] = -sn;
    m[2][0] = sn;
    m[2][2] = cs;
    m
}

/// Rotation about the Z axis (radians, right-handed)
pub fn rotation_z(angle: f32) -> Mat4 {
    let (sn, cs) = angle.sin_cos();
    let mut m = IDENTITY;
    m[0][0] = cs;
    m[0][1] = sn;
    m[1][0] = -sn;
    m[1][1] = cs;
    m
}

/// Rotation from Euler angles in XYZ order: `Rx * Ry * Rz`
///
/// This is the order used for scene objects.
pub fn euler_xyz(angles: Vec3) -> Mat4 {
    mul(mul(rotation_x(angles.x), rotation_y(angles.y)), rotation_z(angles.z))
}

/// Rotation from Euler angles in YXZ order: `Ry * Rx * Rz`
///
/// Yaw-then-pitch order used for cameras, so `y` is heading and `x` is pitch.
pub fn euler_yxz(angles: Vec3) -> Mat4 {
    mul(mul(rotation_y(angles.y), rotation_x(angles.x)), rotation_z(angles.z))
}

/// Compose translation, rotation (XYZ Euler), and scale into one matrix: `T * R * S`
pub fn from_trs(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    mul(mul(translation(position), euler_xyz(rotation)), scaling(scale))
}

/// Invert a matrix that only contains rotation and translation
///
/// The rotation block is transposed and the translation is rotated back.
pub fn inverse_rigid(m: Mat4) -> Mat4 {
    let mut result = IDENTITY;
    for c in 0..3 {
        for r in 0..3 {
            result[c][r] = m[r][c];
        }
    }
    let t = [m[3][0], m[3][1], m[3][2]];
    for r in 0..3 {
        result[3][r] = -(m[r][0] * t[0] + m[r][1] * t[1] + m[r][2] * t[2]);
    }
    result
}

/// Right-handed perspective projection with a `[0, 1]` depth range (wgpu clip space)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * range, -1.0],
        [0.0, 0.0, near * far * range, 0.0],
    ]
}

/// Get the translation column of a matrix
pub fn get_translation(m: Mat4) -> Vec3 {
    Vec3::new(m[3][0], m[3][1], m[3][2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        a.iter()
            .flatten()
            .zip(b.iter().flatten())
            .all(|(x, y)| (x - y).abs() < EPSILON)
    }

    #[test]
    fn test_identity_mul() {
        let m = from_trs(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3), Vec3::ONE);
        assert!(mat_approx_eq(mul(IDENTITY, m), m));
        assert!(mat_approx_eq(mul(m, IDENTITY), m));
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let p = transform_point(rotation_z(FRAC_PI_2), Vec3::X);
        assert!(vec_approx_eq(p, Vec3::Y), "got {:?}", p);
    }

    #[test]
    fn test_rotation_x_quarter_turn() {
        let p = transform_point(rotation_x(FRAC_PI_2), Vec3::Y);
        assert!(vec_approx_eq(p, Vec3::Z), "got {:?}", p);
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let p = transform_point(rotation_y(FRAC_PI_2), Vec3::Z);
        assert!(vec_approx_eq(p, Vec3::X), "got {:?}", p);
    }

    #[test]
    fn test_trs_order() {
        // Scale X by 2, rotate 90 degrees about Z, then translate by (10, 0, 0)
        let m = from_trs(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, FRAC_PI_2),
            Vec3::new(2.0, 1.0, 1.0),
        );
        let p = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(10.0, 2.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let m = translation(Vec3::new(5.0, 5.0, 5.0));
        assert!(vec_approx_eq(transform_direction(m, Vec3::X), Vec3::X));
    }

    #[test]
    fn test_inverse_rigid() {
        let m = mul(translation(Vec3::new(1.0, -2.0, 3.0)), euler_yxz(Vec3::new(0.3, 1.2, 0.0)));
        let inv = inverse_rigid(m);
        assert!(mat_approx_eq(mul(inv, m), IDENTITY));
        assert!(mat_approx_eq(mul(m, inv), IDENTITY));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(75f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);

        let project_depth = |z: f32| {
            let clip_z = proj[2][2] * z + proj[3][2];
            let clip_w = proj[2][3] * z;
            clip_z / clip_w
        };

        assert!(project_depth(-0.1).abs() < EPSILON);
        assert!((project_depth(-1000.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_get_translation() {
        let m = from_trs(Vec3::new(4.0, 5.0, 6.0), Vec3::new(1.0, 1.0, 1.0), Vec3::ONE);
        assert_eq!(get_translation(m), Vec3::new(4.0, 5.0, 6.0));
    }
}
