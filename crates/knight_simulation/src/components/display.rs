//! HealthDisplay — presentation proxy для health bar виджета
//!
//! ECS хранит fraction + visibility, движок рендерит виджет.
//! Bridge читает через `Changed<HealthDisplay>` (без polling каждый frame).

use bevy::prelude::*;

/// Health bar над актором (или player HUD)
///
/// Начальное состояние (spawn): полный, скрыт.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HealthDisplay {
    pub fraction: f32,
    pub visible: bool,
}

impl Default for HealthDisplay {
    fn default() -> Self {
        Self {
            fraction: 1.0,
            visible: false,
        }
    }
}

impl HealthDisplay {
    pub fn set_health_fraction(&mut self, fraction: f32) {
        self.fraction = fraction.clamp(0.0, 1.0);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
