//! CombatConfig — глобальные gameplay константы
//!
//! Хост-движок может загрузить конфиг из своего формата (serde),
//! по умолчанию используются значения исходного геймплея.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки валидации конфига
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must name at least one montage section")]
    EmptySections { field: &'static str },
}

/// Gameplay параметры combat/patrol систем
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Радиус удержания combat target (engine units), если у актора не задан свой
    pub combat_radius: f32,
    /// Acceptance radius для patrol MoveTo запросов
    pub patrol_acceptance_radius: f32,
    /// Время жизни трупа до despawn (секунды)
    pub despawn_delay: f32,
    /// Секции attack montage (выбор случайный)
    pub attack_sections: Vec<String>,
    /// Секция equip montage: достать оружие
    pub equip_section: String,
    /// Секция equip montage: убрать оружие за спину
    pub unequip_section: String,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            combat_radius: 500.0,
            patrol_acceptance_radius: 15.0,
            despawn_delay: 10.0,
            attack_sections: vec!["Attack1".to_string(), "Attack2".to_string()],
            equip_section: "Equip".to_string(),
            unequip_section: "Unequip".to_string(),
        }
    }
}

impl CombatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("combat_radius", self.combat_radius)?;
        positive("patrol_acceptance_radius", self.patrol_acceptance_radius)?;
        positive("despawn_delay", self.despawn_delay)?;

        if self.attack_sections.is_empty() {
            return Err(ConfigError::EmptySections {
                field: "attack_sections",
            });
        }

        Ok(())
    }
}

/// Startup система: невалидный конфиг заменяется defaults (с логом)
pub fn validate_config(mut config: ResMut<CombatConfig>) {
    if let Err(err) = config.validate() {
        crate::logger::log_error(&format!("⚠️ CombatConfig invalid: {}, using defaults", err));
        *config = CombatConfig::default();
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CombatConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.patrol_acceptance_radius, 15.0);
        assert_eq!(config.despawn_delay, 10.0);
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let config = CombatConfig {
            combat_radius: 0.0,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "combat_radius",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_empty_attack_sections() {
        let config = CombatConfig {
            attack_sections: Vec::new(),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptySections { .. })
        ));
    }

    #[test]
    fn test_invalid_config_replaced_on_startup() {
        let mut world = World::new();
        world.insert_resource(CombatConfig {
            despawn_delay: -1.0,
            ..Default::default()
        });

        let mut schedule = Schedule::default();
        schedule.add_systems(validate_config);
        schedule.run(&mut world);

        assert_eq!(*world.resource::<CombatConfig>(), CombatConfig::default());
    }
}
