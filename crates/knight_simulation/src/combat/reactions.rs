//! Hit reactions и death handling (state machine side effects)

use bevy::prelude::*;
use bevy_rapier3d::geometry::ColliderDisabled;

use crate::animation::{request_montage, Montages, PlayMontage};
use crate::combat::{resolve_hit_reaction, CombatState, DeathPose, DespawnAfter, EntityDied, HitReceived};
use crate::components::{actor_forward, HealthDisplay};
use crate::config::CombatConfig;
use crate::DeterministicRng;

/// VFX актора при получении удара
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct HitEffects {
    /// Particle system asset (движок спавнит в точке удара)
    pub particles: Option<String>,
}

/// Запрос к движку: spawn effect в точке (fire-and-forget)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpawnEffect {
    pub effect: String,
    pub position: Vec3,
}

/// Система: HitReceived → hit particles + directional hit-react
///
/// Hit-react только у живых и только из Unoccupied/HitReacting.
/// Attacking/Equipping удар не прерывает (no-op).
pub fn react_to_hits(
    mut hits: EventReader<HitReceived>,
    mut actors: Query<(&Transform, &mut CombatState, Option<&Montages>, Option<&HitEffects>)>,
    mut montage_events: EventWriter<PlayMontage>,
    mut effect_events: EventWriter<SpawnEffect>,
) {
    for hit in hits.read() {
        let Ok((transform, mut state, montages, effects)) = actors.get_mut(hit.entity) else {
            continue;
        };

        if let Some(particles) = effects.and_then(|e| e.particles.as_ref()) {
            effect_events.write(SpawnEffect {
                effect: particles.clone(),
                position: hit.impact_point,
            });
        }

        if hit.lethal || state.is_dead() {
            continue;
        }

        let reaction = resolve_hit_reaction(
            actor_forward(transform),
            transform.translation,
            hit.impact_point,
        );

        if !state.begin_hit_react() {
            crate::logger::log(&format!(
                "{:?} hit during {:?}, no hit-react",
                hit.entity, state.action
            ));
            continue;
        }

        request_montage(
            &mut montage_events,
            hit.entity,
            montages.and_then(|m| m.hit_react.as_ref()),
            reaction.section_name(),
        );

        crate::logger::log(&format!("🩸 {:?} hit-react {:?}", hit.entity, reaction));
    }
}

/// Система: EntityDied → Dead state + side effects (ровно один раз)
///
/// 1. DeathPose случайно из {Death1, Death2}
/// 2. Death montage → секция pose (если montage настроен)
/// 3. HealthDisplay скрыт
/// 4. Collision выключен (ColliderDisabled)
/// 5. DespawnAfter через config.despawn_delay
pub fn handle_deaths(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut actors: Query<(&mut CombatState, Option<&Montages>, Option<&mut HealthDisplay>)>,
    mut montage_events: EventWriter<PlayMontage>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<CombatConfig>,
    time: Res<Time>,
) {
    for death in deaths.read() {
        let Ok((mut state, montages, display)) = actors.get_mut(death.entity) else {
            continue;
        };

        if state.is_dead() {
            continue;
        }

        let pose = DeathPose::pick(rng.as_mut());
        state.die(pose);

        if let Some(section) = pose.section_name() {
            request_montage(
                &mut montage_events,
                death.entity,
                montages.and_then(|m| m.death.as_ref()),
                section,
            );
        }

        if let Some(mut display) = display {
            display.set_visible(false);
        }

        if let Ok(mut entity_commands) = commands.get_entity(death.entity) {
            entity_commands.try_insert((
                ColliderDisabled,
                DespawnAfter {
                    despawn_time: time.elapsed_secs() + config.despawn_delay,
                },
            ));
        }

        crate::logger::log_info(&format!(
            "💀 {:?} died ({:?}), despawn in {}s",
            death.entity, pose, config.despawn_delay
        ));
    }
}
