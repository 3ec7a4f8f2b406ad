//! Player control компоненты
//!
//! Отмечает entity которым управляет игрок через input (в отличие от AI),
//! и связь controller → pawn для instigator lookup.

use bevy::prelude::*;

use crate::combat::CharacterState;

/// Marker component для player-controlled entity
///
/// Player-акторы получают CharacterState (Unequipped/Equipped) — у врагов его нет.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(CharacterState)]
pub struct Player;

/// Controller entity → pawn которым он управляет
///
/// DamageIngestion резолвит instigator controller в pawn для CombatTarget.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Possesses {
    pub pawn: Entity,
}
