/// Rotation state for the displayed surface and the matrix it produces
use nalgebra::{Matrix4, Point3, Vector3};

/// Default yaw (degrees about the vertical axis)
pub const INITIAL_YAW: f64 = -35.0;
/// Default pitch (degrees about the horizontal axis)
pub const INITIAL_PITCH: f64 = 35.0;

/// Two independent rotation angles, in degrees.
///
/// Angles accumulate without wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub yaw: f64,
    pub pitch: f64,
}

impl RotationState {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
    }

    /// Model matrix: yaw about +Y first, then pitch about +X.
    pub fn matrix(&self) -> Matrix4<f64> {
        Transform::rotation_matrix(self)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new(INITIAL_YAW, INITIAL_PITCH)
    }
}

/// Transform builder for the surface model matrix
pub struct Transform;

impl Transform {
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f64> {
        let ry = Matrix4::from_axis_angle(&Vector3::y_axis(), rotation.yaw.to_radians());
        let rx = Matrix4::from_axis_angle(&Vector3::x_axis(), rotation.pitch.to_radians());

        // Column vectors: the right-most factor applies first
        rx * ry
    }

    /// Apply `rotation` to a single point
    pub fn rotate_point(rotation: &RotationState, point: &Point3<f64>) -> Point3<f64> {
        rotation.matrix().transform_point(point)
    }

    /// Single-precision copy for GPU and terminal consumers
    pub fn to_f32(matrix: &Matrix4<f64>) -> Matrix4<f32> {
        matrix.map(|v| v as f32)
    }
}
