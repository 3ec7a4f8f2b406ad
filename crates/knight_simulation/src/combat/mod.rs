//! Combat system module (engine-driven combat architecture)
//!
//! ECS ответственность:
//! - Game state: Attributes, CombatState, CombatTarget
//! - Combat rules: damage ingestion, directional hit-react, death, target release
//! - Events: DamageDealt, EntityDied, PlayMontage, SpawnEffect
//!
//! Движок ответственность:
//! - Hit detection (weapon box trace) → ImpactEvent
//! - Montage playback, AnimationNotify в конце секций
//! - Collision, despawn визуала

use bevy::prelude::*;

use crate::animation::{AnimationNotify, NotifyKind, PlayMontage};
use crate::config::CombatConfig;
use crate::DeterministicRng;

pub mod damage;
pub mod hit_reaction;
pub mod reactions;
pub mod state;
pub mod target;


// Re-export основных типов
pub use damage::{
    apply_damage, despawn_after_timeout, ingest_damage, DamageDealt, DamageOutcome, DespawnAfter,
    EntityDied, HitReceived, ImpactEvent,
};
pub use hit_reaction::{resolve_hit_reaction, signed_hit_angle, HitReaction};
pub use reactions::{handle_deaths, react_to_hits, HitEffects, SpawnEffect};
pub use state::{ActionState, CharacterState, CombatState, DeathPose};
pub use target::{track_combat_targets, CombatTarget};

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. process_combat_notifies — AttackEnd/HitReactEnd от движка
/// 2. apply_damage — ImpactEvent → Attributes/HealthDisplay/CombatTarget
/// 3. react_to_hits — directional hit-react + particles
/// 4. handle_deaths — Dead state, death montage, collision off
/// 5. track_combat_targets — release target по дистанции
/// 6. despawn_after_timeout — уборка трупов
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatConfig>()
            .init_resource::<DeterministicRng>();

        // Регистрация событий
        app.add_event::<ImpactEvent>()
            .add_event::<DamageDealt>()
            .add_event::<HitReceived>()
            .add_event::<EntityDied>()
            .add_event::<AnimationNotify>()
            .add_event::<PlayMontage>()
            .add_event::<SpawnEffect>();

        app.add_systems(
            FixedUpdate,
            (
                process_combat_notifies,
                apply_damage,
                react_to_hits,
                handle_deaths,
                track_combat_targets,
                despawn_after_timeout,
            )
                .chain(), // Последовательное выполнение
        );
    }
}

/// Система: animation notifies для attack/hit-react montage
///
/// Notify в неподходящем состоянии (например после смерти) — no-op.
pub fn process_combat_notifies(
    mut notifies: EventReader<AnimationNotify>,
    mut states: Query<&mut CombatState>,
) {
    for event in notifies.read() {
        let Ok(mut state) = states.get_mut(event.entity) else {
            continue;
        };

        match event.notify {
            NotifyKind::AttackEnd => {
                state.end_attack();
            }
            NotifyKind::HitReactEnd => {
                state.end_hit_react();
            }
            // Equip notifies обрабатывает PlayerPlugin
            NotifyKind::EquipFinished | NotifyKind::Arm | NotifyKind::Disarm => {}
        }
    }
}
