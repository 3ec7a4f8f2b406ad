//! Equipment компоненты: оружие и сокеты

use bevy::prelude::*;

use crate::combat::CharacterState;

/// Оружие (pickup actor в мире)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    pub two_handed: bool,
}

impl Weapon {
    /// CharacterState после того как оружие взято в руки
    pub fn equipped_state(&self) -> CharacterState {
        if self.two_handed {
            CharacterState::EquippedTwoHand
        } else {
            CharacterState::EquippedOneHand
        }
    }
}

/// Оружие в зоне подбора (пишет движок по overlap begin/end)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlappingWeapon(pub Entity);

/// Куда прикреплено оружие на скелете
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum WeaponSocket {
    /// RightHandSocket — в руке, готово к атаке
    Hand,
    /// SpineSocket — за спиной
    Back,
}

/// Оружие которым владеет актор
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldWeapon {
    pub weapon: Entity,
    pub socket: WeaponSocket,
}
