//! Equip / unequip flow
//!
//! ```text
//! Interact + weapon в зоне, рук пусто → PickUp (оружие сразу в руку, играем Equip)
//! Interact + оружие в руке, Equipped  → Disarm (играем Unequip, notify Disarm → за спину)
//! Interact + оружие за спиной          → Arm (играем Equip, notify Arm → в руку)
//! EquipFinished                        → CharacterState = target, Unoccupied
//! ```

use bevy::prelude::*;

use crate::animation::{AnimationNotify, NotifyKind};
use crate::combat::{CharacterState, CombatState};
use crate::components::{HeldWeapon, WeaponSocket};

/// Запрос к движку: прикрепить оружие к сокету владельца
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachWeapon {
    pub owner: Entity,
    pub weapon: Entity,
    pub socket: WeaponSocket,
}

/// Что делает Interact в текущем состоянии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractPlan {
    /// Подобрать оружие из зоны overlap
    PickUp { weapon: Entity, target: CharacterState },
    /// Достать оружие из-за спины
    Arm { target: CharacterState },
    /// Убрать оружие за спину
    Disarm,
}

/// Решение для Interact. `None` → команда не разрешена (no-op).
///
/// - `overlapping`: оружие в зоне подбора и его equipped state
/// - `held_equipped_state`: equipped state оружия которое уже есть у актора
pub fn plan_interact(
    state: &CombatState,
    character: CharacterState,
    overlapping: Option<(Entity, CharacterState)>,
    held_equipped_state: Option<CharacterState>,
) -> Option<InteractPlan> {
    if !state.is_unoccupied() {
        return None;
    }

    match (held_equipped_state, overlapping) {
        (None, Some((weapon, target))) => Some(InteractPlan::PickUp { weapon, target }),
        (Some(_), _) if character.is_equipped() => Some(InteractPlan::Disarm),
        (Some(target), _) => Some(InteractPlan::Arm { target }),
        (None, None) => None,
    }
}

/// Система: equip notifies (EquipFinished, Arm, Disarm)
pub fn process_equip_notifies(
    mut notifies: EventReader<AnimationNotify>,
    mut actors: Query<(&mut CombatState, &mut CharacterState, Option<&mut HeldWeapon>)>,
    mut attach_events: EventWriter<AttachWeapon>,
) {
    for event in notifies.read() {
        let Ok((mut state, mut character, held)) = actors.get_mut(event.entity) else {
            continue;
        };

        let socket = match event.notify {
            NotifyKind::EquipFinished => {
                if let Some(target) = state.finish_equip() {
                    *character = target;
                    crate::logger::log(&format!(
                        "🗡️ {:?} equip finished → {:?}",
                        event.entity, target
                    ));
                }
                continue;
            }
            NotifyKind::Arm => WeaponSocket::Hand,
            NotifyKind::Disarm => WeaponSocket::Back,
            NotifyKind::AttackEnd | NotifyKind::HitReactEnd => continue,
        };

        // Arm/Disarm вне Equipping (поздний notify после смерти) — игнор
        if !matches!(state.action, crate::combat::ActionState::Equipping { .. }) {
            continue;
        }

        let Some(mut held) = held else {
            continue;
        };

        if held.socket != socket {
            held.socket = socket;
            attach_events.write(AttachWeapon {
                owner: event.entity,
                weapon: held.weapon,
                socket,
            });
        }
    }
}
