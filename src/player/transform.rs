//! # Transform
//!
//! Position plus an orthonormal orientation basis, and the movement component that
//! moves and rotates it.
//!
//! Anything that owns one or more transforms implements [`Movable`] by visiting them;
//! every movement and rotation is then written once and applied to each transform the
//! same way. The player uses this to keep its camera in lockstep with its body.

use cgmath::{Deg, InnerSpace, Matrix3, Point3, Vector3};

/// A position and orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position
    pub position: Point3<f32>,
    /// Look direction
    pub forward: Vector3<f32>,
    /// Right-hand side direction
    pub right: Vector3<f32>,
    /// Up direction
    pub up: Vector3<f32>,
}

impl Transform {
    /// Creates a transform at `position` looking down world -Z with +Y up.
    pub fn new(position: Point3<f32>) -> Self {
        Transform {
            position,
            forward: Vector3::new(0.0, 0.0, -1.0),
            right: Vector3::new(1.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    fn rotate_basis(&mut self, axis: Vector3<f32>, degrees: f32) {
        let rotation = Matrix3::from_axis_angle(axis.normalize(), Deg(degrees));
        self.forward = rotation * self.forward;
        self.right = rotation * self.right;
        self.up = rotation * self.up;
    }
}

/// Movement and rotation of one or more transforms at once.
///
/// Only [`Movable::for_each_transform`] has to be implemented.
pub trait Movable {
    /// Calls `apply` on every transform this value moves.
    fn for_each_transform(&mut self, apply: &mut dyn FnMut(&mut Transform));

    /// Translates by `offset` in world space.
    fn move_along_vector(&mut self, offset: Vector3<f32>) {
        self.for_each_transform(&mut |t: &mut Transform| t.position += offset);
    }

    /// Translates along each transform's own forward vector.
    fn move_forward_local(&mut self, amount: f32) {
        self.for_each_transform(&mut |t: &mut Transform| t.position += t.forward * amount);
    }

    /// Translates along each transform's own right vector.
    fn move_right_local(&mut self, amount: f32) {
        self.for_each_transform(&mut |t: &mut Transform| t.position += t.right * amount);
    }

    /// Translates along each transform's own up vector.
    fn move_up_local(&mut self, amount: f32) {
        self.for_each_transform(&mut |t: &mut Transform| t.position += t.up * amount);
    }

    /// Translates along world Z.
    fn move_forward_global(&mut self, amount: f32) {
        self.move_along_vector(Vector3::new(0.0, 0.0, amount));
    }

    /// Translates along world X.
    fn move_right_global(&mut self, amount: f32) {
        self.move_along_vector(Vector3::new(amount, 0.0, 0.0));
    }

    /// Translates along world Y.
    fn move_up_global(&mut self, amount: f32) {
        self.move_along_vector(Vector3::new(0.0, amount, 0.0));
    }

    /// Rolls about each transform's own forward vector.
    fn rotate_on_forward_local(&mut self, degrees: f32) {
        self.for_each_transform(&mut |t: &mut Transform| {
            let axis = t.forward;
            t.rotate_basis(axis, degrees)
        });
    }

    /// Pitches about each transform's own right vector.
    fn rotate_on_right_local(&mut self, degrees: f32) {
        self.for_each_transform(&mut |t: &mut Transform| {
            let axis = t.right;
            t.rotate_basis(axis, degrees)
        });
    }

    /// Yaws about each transform's own up vector.
    fn rotate_on_up_local(&mut self, degrees: f32) {
        self.for_each_transform(&mut |t: &mut Transform| {
            let axis = t.up;
            t.rotate_basis(axis, degrees)
        });
    }

    /// Rotates about world Z.
    fn rotate_on_forward_global(&mut self, degrees: f32) {
        self.for_each_transform(&mut |t: &mut Transform| t.rotate_basis(Vector3::unit_z(), degrees));
    }

    /// Rotates about world X.
    fn rotate_on_right_global(&mut self, degrees: f32) {
        self.for_each_transform(&mut |t: &mut Transform| t.rotate_basis(Vector3::unit_x(), degrees));
    }

    /// Rotates about world Y.
    fn rotate_on_up_global(&mut self, degrees: f32) {
        self.for_each_transform(&mut |t: &mut Transform| t.rotate_basis(Vector3::unit_y(), degrees));
    }
}

impl Movable for Transform {
    fn for_each_transform(&mut self, apply: &mut dyn FnMut(&mut Transform)) {
        apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn local_moves_follow_orientation() {
        let mut transform = Transform::new(Point3::new(0.0, 0.0, 0.0));
        transform.move_forward_local(2.0);
        assert_eq!(transform.position, Point3::new(0.0, 0.0, -2.0));

        transform.rotate_on_up_global(90.0);
        assert_close(transform.forward, Vector3::new(-1.0, 0.0, 0.0));
        assert_close(transform.right, Vector3::new(0.0, 0.0, -1.0));

        transform.move_forward_local(1.0);
        assert_close(transform.position - Point3::new(0.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, -2.0));
    }

    #[test]
    fn global_moves_ignore_orientation() {
        let mut transform = Transform::new(Point3::new(1.0, 2.0, 3.0));
        transform.rotate_on_right_local(45.0);
        transform.move_forward_global(1.0);
        transform.move_up_global(-2.0);
        transform.move_right_global(0.5);
        assert_eq!(transform.position, Point3::new(1.5, 0.0, 4.0));
    }

    #[test]
    fn rotations_keep_basis_orthonormal() {
        let mut transform = Transform::new(Point3::new(0.0, 0.0, 0.0));
        transform.rotate_on_right_local(30.0);
        transform.rotate_on_up_local(-75.0);
        transform.rotate_on_forward_local(12.0);
        transform.rotate_on_forward_global(5.0);
        assert!((transform.forward.magnitude() - 1.0).abs() < 1e-5);
        assert!(transform.forward.dot(transform.right).abs() < 1e-5);
        assert!(transform.forward.dot(transform.up).abs() < 1e-5);
        assert_close(transform.right.cross(transform.up), -transform.forward);
    }
}
