//! Player control: команды игрока, gated по CombatState
//!
//! Input binding живёт в движке. Движок присылает PlayerCommand,
//! ECS решает разрешена ли команда и отвечает MovementRequest/PlayMontage/AttachWeapon.

use bevy::prelude::*;

use crate::animation::{AnimationNotify, PlayMontage};
use crate::combat::{apply_damage, process_combat_notifies};
use crate::config::CombatConfig;
use crate::DeterministicRng;

pub mod commands;
pub mod equip;


pub use commands::{process_player_commands, MovementRequest, PlayerAction, PlayerCommand};
pub use equip::{plan_interact, process_equip_notifies, AttachWeapon, InteractPlan};

/// Player Plugin
///
/// Порядок выполнения (между process_combat_notifies и apply_damage):
/// 1. process_equip_notifies — EquipFinished/Arm/Disarm от движка
/// 2. process_player_commands — move/jump/attack/interact
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatConfig>()
            .init_resource::<DeterministicRng>();

        app.add_event::<PlayerCommand>()
            .add_event::<MovementRequest>()
            .add_event::<AttachWeapon>()
            .add_event::<AnimationNotify>()
            .add_event::<PlayMontage>();

        app.add_systems(
            FixedUpdate,
            (
                process_equip_notifies,
                process_player_commands,
            )
                .chain()
                .after(process_combat_notifies) // AttackEnd раньше новой команды
                .before(apply_damage), // команда тика раньше ударов этого тика
        );
    }
}
