//! Constant-acceleration motion

use crate::foundation::math::Vec3;

/// Advance one body by `dt` under constant `gravity`.
///
/// The position step uses the velocity from before this tick, so a body at
/// rest moves by exactly `0.5 * g * dt²` and ends with velocity `g * dt`.
pub fn integrate(position: &mut Vec3, velocity: &mut Vec3, gravity: Vec3, dt: f32) {
    *position += *velocity * dt + gravity * (0.5 * dt * dt);
    *velocity += gravity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_tick_from_rest() {
        let gravity = Vec3::new(0.0, 0.0, -9.8);
        let dt = 1.0 / 60.0;
        let mut position = Vec3::new(0.0, 0.0, 5.0);
        let mut velocity = Vec3::zeros();

        integrate(&mut position, &mut velocity, gravity, dt);

        assert_relative_eq!(velocity, gravity * dt);
        assert_relative_eq!(position.z, 5.0 - 0.5 * 9.8 * dt * dt, epsilon = 1e-6);
    }

    #[test]
    fn test_uses_velocity_before_update() {
        let mut position = Vec3::zeros();
        let mut velocity = Vec3::new(1.0, 0.0, 0.0);

        integrate(&mut position, &mut velocity, Vec3::new(2.0, 0.0, 0.0), 1.0);

        // 1 * 1 + 0.5 * 2 * 1
        assert_relative_eq!(position.x, 2.0);
        assert_relative_eq!(velocity.x, 3.0);
    }
}
