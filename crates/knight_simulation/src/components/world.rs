//! Конвенции осей хост-движка
//!
//! Движок Z-up: вертикаль = +Z, локальный forward актора = +X.
//! Transform — authoritative от движка (ECS читает позицию и rotation).

use bevy::prelude::*;

/// Вертикальная ось мира
pub const WORLD_UP: Vec3 = Vec3::Z;

/// Локальный forward актора до применения rotation
pub const ACTOR_FORWARD: Vec3 = Vec3::X;

/// Мировой forward актора (unit vector)
pub fn actor_forward(transform: &Transform) -> Vec3 {
    (transform.rotation * ACTOR_FORWARD).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_forward_is_x() {
        let transform = Transform::from_xyz(3.0, 4.0, 5.0);
        assert_eq!(actor_forward(&transform), Vec3::X);
    }

    #[test]
    fn test_yaw_rotates_forward_around_up() {
        let transform = Transform::from_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        let forward = actor_forward(&transform);
        assert!((forward - Vec3::Y).length() < 1e-5, "forward = {:?}", forward);
    }
}
