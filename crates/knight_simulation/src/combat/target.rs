//! Combat target tracking
//!
//! Combat target = weak relation (Entity id), не владеет жизнью цели.
//! Ставится DamageIngestion (instigator), снимается каждый тик если цель
//! вышла за combat radius или исчезла из мира.

use bevy::prelude::*;

use crate::components::{HealthDisplay, Player};
use crate::config::CombatConfig;

/// Текущая цель combatant'а + радиус удержания
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CombatTarget {
    pub target: Option<Entity>,
    /// Свой радиус (engine units); `None` → `CombatConfig::combat_radius`
    pub combat_radius: Option<f32>,
}

impl CombatTarget {
    pub fn with_radius(combat_radius: f32) -> Self {
        Self {
            target: None,
            combat_radius: Some(combat_radius),
        }
    }

    pub fn set(&mut self, target: Option<Entity>) {
        self.target = target;
    }

    pub fn clear(&mut self) {
        self.target = None;
    }

    pub fn radius_or(&self, fallback: f32) -> f32 {
        self.combat_radius.unwrap_or(fallback)
    }

    /// Цель вне радиуса? Строго больше: на границе цель удерживается.
    pub fn is_out_of_range(&self, own_position: Vec3, target_position: Vec3, fallback_radius: f32) -> bool {
        own_position.distance(target_position) > self.radius_or(fallback_radius)
    }
}

/// Система: release combat target по дистанции
///
/// O(1) на combatant. Цель без Transform (despawned) резолвится в "нет цели".
/// HealthDisplay игрока — HUD, tracker его не прячет.
pub fn track_combat_targets(
    mut combatants: Query<(
        Entity,
        &Transform,
        &mut CombatTarget,
        Option<&mut HealthDisplay>,
        Has<Player>,
    )>,
    positions: Query<&Transform>,
    config: Res<CombatConfig>,
) {
    for (entity, transform, mut combat_target, display, is_player) in combatants.iter_mut() {
        let Some(target) = combat_target.target else {
            continue;
        };

        let lost = match positions.get(target) {
            Ok(target_transform) => combat_target.is_out_of_range(
                transform.translation,
                target_transform.translation,
                config.combat_radius,
            ),
            Err(_) => true,
        };

        if !lost {
            continue;
        }

        combat_target.clear();
        if let Some(mut display) = display {
            if !is_player {
                display.set_visible(false);
            }
        }

        crate::logger::log(&format!(
            "🎯 {:?} lost combat target {:?}",
            entity, target
        ));
    }
}
