//! Player commands (движок input → ECS)

use bevy::prelude::*;

use crate::animation::{request_montage, Montages, PlayMontage};
use crate::combat::{CharacterState, CombatState};
use crate::components::{HeldWeapon, OverlappingWeapon, Weapon, WeaponSocket};
use crate::config::CombatConfig;
use crate::player::equip::{plan_interact, AttachWeapon, InteractPlan};
use crate::{DeterministicRng, RandomSource};

/// Команда игрока для конкретного актора
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerCommand {
    pub entity: Entity,
    pub action: PlayerAction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// Оси ввода (forward/right, [-1, 1])
    Move { forward: f32, right: f32 },
    Jump,
    Attack,
    /// E key: подобрать / достать / убрать оружие
    Interact,
}

/// Разрешённое движение (ECS → движок character movement)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum MovementRequest {
    Move { entity: Entity, forward: f32, right: f32 },
    Jump { entity: Entity },
}

/// Система: PlayerCommand → gated действия
///
/// Любая команда вне Unoccupied — no-op (mash-proof).
pub fn process_player_commands(
    mut command_events: EventReader<PlayerCommand>,
    mut actors: Query<(
        &mut CombatState,
        Option<&CharacterState>,
        Option<&Montages>,
        Option<&OverlappingWeapon>,
        Option<&HeldWeapon>,
    )>,
    weapons: Query<&Weapon>,
    mut commands: Commands,
    mut montage_events: EventWriter<PlayMontage>,
    mut movement_events: EventWriter<MovementRequest>,
    mut attach_events: EventWriter<AttachWeapon>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<CombatConfig>,
) {
    for command in command_events.read() {
        let entity = command.entity;
        let Ok((mut state, character, montages, overlapping, held)) = actors.get_mut(entity) else {
            continue;
        };

        match command.action {
            PlayerAction::Move { forward, right } => {
                if state.is_unoccupied() {
                    movement_events.write(MovementRequest::Move { entity, forward, right });
                }
            }

            PlayerAction::Jump => {
                if state.is_unoccupied() {
                    movement_events.write(MovementRequest::Jump { entity });
                }
            }

            PlayerAction::Attack => {
                if !state.begin_attack(character) {
                    continue;
                }

                let sections = &config.attack_sections;
                if let Some(section) = sections.get(rng.pick_index(sections.len())) {
                    request_montage(
                        &mut montage_events,
                        entity,
                        montages.and_then(|m| m.attack.as_ref()),
                        section,
                    );
                }

                crate::logger::log(&format!("⚔️ {:?} attack started", entity));
            }

            PlayerAction::Interact => {
                // Interact только у player-controlled (есть CharacterState)
                let Some(&character) = character else {
                    continue;
                };

                let overlapping = overlapping.and_then(|o| {
                    weapons.get(o.0).ok().map(|weapon| (o.0, weapon.equipped_state()))
                });
                let held_equipped_state = held.map(|h| {
                    weapons
                        .get(h.weapon)
                        .map(Weapon::equipped_state)
                        .unwrap_or(CharacterState::EquippedOneHand)
                });

                let Some(plan) = plan_interact(&state, character, overlapping, held_equipped_state) else {
                    continue;
                };

                let (target, section) = match plan {
                    InteractPlan::PickUp { weapon, target } => {
                        commands
                            .entity(entity)
                            .insert(HeldWeapon {
                                weapon,
                                socket: WeaponSocket::Hand,
                            })
                            .remove::<OverlappingWeapon>();
                        attach_events.write(AttachWeapon {
                            owner: entity,
                            weapon,
                            socket: WeaponSocket::Hand,
                        });
                        (target, &config.equip_section)
                    }
                    InteractPlan::Arm { target } => (target, &config.equip_section),
                    InteractPlan::Disarm => (CharacterState::Unequipped, &config.unequip_section),
                };

                state.begin_equip(target);
                request_montage(
                    &mut montage_events,
                    entity,
                    montages.and_then(|m| m.equip.as_ref()),
                    section,
                );

                crate::logger::log(&format!("🗡️ {:?} interact: {:?}", entity, plan));
            }
        }
    }
}
