use glam::{Quat, Vec3};
use kostka_common::UP;
use kostka_input::Movement;

/// First-person camera driven by incremental mouse-look.
///
/// Orientation is a single forward vector updated in place each time the
/// mouse moves. The right vector is never stored; it is derived from the
/// current direction whenever it is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    direction: Vec3,
    /// World units per second.
    pub speed: f32,
    /// Radians per pixel of mouse motion.
    pub sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at(Vec3::splat(3.0), Vec3::ZERO)
    }
}

impl Camera {
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
            speed: 20.0,
            sensitivity: 0.005,
        }
    }

    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    pub fn with_tuning(mut self, speed: f32, sensitivity: f32) -> Self {
        self.speed = speed;
        self.sensitivity = sensitivity;
        self
    }

    /// Unit forward vector.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// `normalize(direction × UP)`. Zero when looking straight along the up axis.
    pub fn right(&self) -> Vec3 {
        self.direction.cross(UP).normalize_or_zero()
    }

    /// Pitch by `-pitch` around the pre-rotation right axis, then yaw by
    /// `-yaw` around world up, then renormalize.
    ///
    /// This is an incremental Euler update and accumulates rounding over
    /// many frames; renormalizing keeps the length at one, not the heading exact.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        let mut dir = self.direction;
        // Looking exactly along UP leaves no pitch axis; only yaw applies.
        if let Some(right) = dir.cross(UP).try_normalize() {
            dir = Quat::from_axis_angle(right, -pitch) * dir;
        }
        dir = Quat::from_axis_angle(UP, -yaw) * dir;
        if let Some(dir) = dir.try_normalize() {
            self.direction = dir;
        }
    }

    /// Mouse-look from raw pixel deltas.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.rotate(dx * self.sensitivity, dy * self.sensitivity);
    }

    /// Move for `dt` seconds. Active directions add up; diagonals are not normalized.
    pub fn translate(&mut self, movement: Movement, dt: f32) {
        let step = self.speed * dt;
        let right = self.right();
        let mut delta = Vec3::ZERO;
        if movement.forward {
            delta += self.direction * step;
        }
        if movement.back {
            delta -= self.direction * step;
        }
        if movement.right {
            delta += right * step;
        }
        if movement.left {
            delta -= right * step;
        }
        if movement.up {
            delta += UP * step;
        }
        if movement.down {
            delta -= UP * step;
        }
        self.position += delta;
    }
}
