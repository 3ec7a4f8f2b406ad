//! Базовые компоненты акторов: Actor, Attributes

use bevy::prelude::*;
use thiserror::Error;

use crate::combat::{CombatState, CombatTarget};
use crate::components::HealthDisplay;

/// Актор (игрок, враг) — базовый компонент для combatant'ов
///
/// Автоматически добавляет Attributes, HealthDisplay, CombatState, CombatTarget,
/// Transform через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Attributes, HealthDisplay, CombatState, CombatTarget, Transform)]
pub struct Actor;

/// Ошибки конструирования Attributes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    #[error("max health must be finite and > 0, got {0}")]
    InvalidMax(f32),

    #[error("current health {current} is outside [0, {max}]")]
    CurrentOutOfRange { current: f32, max: f32 },
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max, max > 0.
/// Уменьшается только через DamageIngestion (heal path нет).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Attributes {
    current: f32,
    max: f32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(100.0) // Default 100 HP
    }
}

impl Attributes {
    /// Полное здоровье. Невалидный `max` заменяется на 1.0.
    pub fn new(max: f32) -> Self {
        let max = if max.is_finite() && max > 0.0 { max } else { 1.0 };
        Self { current: max, max }
    }

    pub fn try_new(current: f32, max: f32) -> Result<Self, AttributeError> {
        if !max.is_finite() || max <= 0.0 {
            return Err(AttributeError::InvalidMax(max));
        }
        if !current.is_finite() || current < 0.0 || current > max {
            return Err(AttributeError::CurrentOutOfRange { current, max });
        }
        Ok(Self { current, max })
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Доля здоровья в [0, 1]
    pub fn health_percent(&self) -> f32 {
        self.current / self.max
    }

    /// Вычитает урон с полом 0. Отрицательный/NaN урон = 0.
    pub fn receive_damage(&mut self, amount: f32) {
        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.current = (self.current - amount).clamp(0.0, self.max);
    }
}
