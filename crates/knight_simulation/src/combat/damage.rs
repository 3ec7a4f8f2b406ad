//! Damage ingestion (engine hit detection → ECS)
//!
//! Порядок для каждого ImpactEvent:
//! 1. Мёртвая цель → игнор (только echo)
//! 2. Attributes: current -= amount (пол 0)
//! 3. HealthDisplay: новый health percent
//! 4. CombatTarget = pawn instigator'а (даже если удар убил)
//! 5. HealthDisplay: visible
//! 6. Жив → HitReceived (hit-react), мёртв → EntityDied (death)
//! 7. DamageDealt echo с исходным amount
//!
//! Armor/amplification нет — amount применяется как есть.

use bevy::prelude::*;

use crate::combat::CombatTarget;
use crate::components::{Attributes, HealthDisplay, Possesses};

/// Событие: удар по актору (от hit detection движка)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ImpactEvent {
    /// Кого ударили
    pub target: Entity,
    /// Точка удара (world)
    pub point: Vec3,
    /// Controller (или pawn) который нанёс удар
    pub instigator: Option<Entity>,
    /// Actor-причина (оружие, снаряд)
    pub causer: Option<Entity>,
    pub amount: f32,
}

/// Событие: echo применённого урона (amount как пришёл)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub target: Entity,
    pub instigator: Option<Entity>,
    pub amount: f32,
}

/// Событие: get-hit dispatch для выжившей или убитой цели
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitReceived {
    pub entity: Entity,
    pub impact_point: Vec3,
    /// Удар был смертельным (hit-react не играется, только effects)
    pub lethal: bool,
}

/// Событие: entity умер (health дошёл до 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент: деспавн entity после указанного времени
///
/// Ставится при смерти. Движок удаляет визуал по despawn entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Результат ingestion одного удара
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Цель уже мертва — ничего не изменилось
    Ignored,
    Survived,
    Killed,
}

/// Применяет урон к одному combatant'у (шаги 1–5)
///
/// `instigator_pawn` — уже резолвленный actor который станет combat target.
pub fn ingest_damage(
    attributes: &mut Attributes,
    display: Option<&mut HealthDisplay>,
    combat_target: &mut CombatTarget,
    instigator_pawn: Option<Entity>,
    amount: f32,
) -> DamageOutcome {
    if !attributes.is_alive() {
        return DamageOutcome::Ignored;
    }

    attributes.receive_damage(amount);

    let mut display = display;
    if let Some(display) = display.as_deref_mut() {
        display.set_health_fraction(attributes.health_percent());
    }

    combat_target.set(instigator_pawn);

    if let Some(display) = display {
        display.set_visible(true);
    }

    if attributes.is_alive() {
        DamageOutcome::Survived
    } else {
        DamageOutcome::Killed
    }
}

/// Controller → controlled pawn. Без Possesses instigator сам является актором.
pub fn resolve_instigator_pawn(
    instigator: Option<Entity>,
    controllers: &Query<&Possesses>,
) -> Option<Entity> {
    let instigator = instigator?;
    match controllers.get(instigator) {
        Ok(possesses) => Some(possesses.pawn),
        Err(_) => Some(instigator),
    }
}

/// Система: ImpactEvent → Attributes/HealthDisplay/CombatTarget + dispatch
pub fn apply_damage(
    mut impacts: EventReader<ImpactEvent>,
    mut targets: Query<(&mut Attributes, &mut CombatTarget, Option<&mut HealthDisplay>)>,
    controllers: Query<&Possesses>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut hit_events: EventWriter<HitReceived>,
    mut entity_died_events: EventWriter<EntityDied>,
) {
    for impact in impacts.read() {
        // Echo всегда (engine event chain ждёт amount обратно)
        damage_dealt_events.write(DamageDealt {
            target: impact.target,
            instigator: impact.instigator,
            amount: impact.amount,
        });

        let Ok((mut attributes, mut combat_target, display)) = targets.get_mut(impact.target) else {
            crate::logger::log_warning(&format!(
                "ImpactEvent: target {:?} has no Attributes/CombatTarget",
                impact.target
            ));
            continue;
        };

        let pawn = resolve_instigator_pawn(impact.instigator, &controllers);
        let outcome = ingest_damage(
            &mut attributes,
            display.map(|d| d.into_inner()),
            &mut combat_target,
            pawn,
            impact.amount,
        );

        match outcome {
            DamageOutcome::Ignored => {
                crate::logger::log(&format!(
                    "Impact on dead entity {:?} ignored",
                    impact.target
                ));
            }
            DamageOutcome::Survived => {
                hit_events.write(HitReceived {
                    entity: impact.target,
                    impact_point: impact.point,
                    lethal: false,
                });

                crate::logger::log(&format!(
                    "💥 {:?} took {} damage from {:?} (HP: {}/{})",
                    impact.target,
                    impact.amount,
                    pawn,
                    attributes.current(),
                    attributes.max()
                ));
            }
            DamageOutcome::Killed => {
                hit_events.write(HitReceived {
                    entity: impact.target,
                    impact_point: impact.point,
                    lethal: true,
                });
                entity_died_events.write(EntityDied {
                    entity: impact.target,
                    killer: pawn,
                });

                crate::logger::log_info(&format!(
                    "Entity {:?} killed by {:?}",
                    impact.target, pawn
                ));
            }
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
                entity_commands.despawn();
            }
        }
    }
}
