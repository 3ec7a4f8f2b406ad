//! Movement компоненты: locomotion состояние от движка

use bevy::prelude::*;

use crate::animation::AnimationParams;

/// Locomotion состояние (пишет движок после character movement step)
///
/// ECS читает для AnimationParams, сам не двигает актора.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
#[require(AnimationParams)]
pub struct Locomotion {
    /// Текущая velocity (engine units/sec)
    pub velocity: Vec3,
    /// В воздухе (прыжок/падение)
    pub is_falling: bool,
}
