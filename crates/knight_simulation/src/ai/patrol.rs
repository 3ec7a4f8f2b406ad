//! Patrol directive
//!
//! Flow:
//! 1. PatrolGoal добавлен/изменён → MoveToRequest (acceptance radius из CombatConfig)
//! 2. PathResult Ok → PatrolPath.waypoints (только для debug визуализации)
//! 3. PathResult Err → warning, патруля нет (не фатально)
//!
//! Новый запрос вытесняет старый: ответ со старым request_id отбрасывается.

use bevy::prelude::*;

use crate::ai::events::{MoveToRequest, PathFailure, PathResult};
use crate::combat::{CombatState, EntityDied};
use crate::config::CombatConfig;

/// Куда патрулировать
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(PatrolPath)]
pub enum PatrolGoal {
    /// Фиксированная точка (world)
    Position(Vec3),
    /// Patrol target actor (позиция берётся на момент запроса)
    Actor(Entity),
}

/// Статус patrol запроса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatrolStatus {
    #[default]
    Idle,
    /// MoveToRequest отправлен, ждём PathResult
    Pending,
    /// Путь получен, движок ведёт актора
    Following,
    Failed(PathFailure),
}

/// Последний путь от движка (read-only для ECS, debug визуализация)
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PatrolPath {
    pub request_id: u32,
    pub status: PatrolStatus,
    pub waypoints: Vec<Vec3>,
}

/// Система: PatrolGoal (Added/Changed) → MoveToRequest
pub fn issue_patrol_requests(
    mut patrollers: Query<(Entity, &PatrolGoal, &mut PatrolPath, Option<&CombatState>), Changed<PatrolGoal>>,
    positions: Query<&Transform>,
    mut move_events: EventWriter<MoveToRequest>,
    config: Res<CombatConfig>,
) {
    for (entity, goal, mut path, state) in patrollers.iter_mut() {
        if state.is_some_and(CombatState::is_dead) {
            continue;
        }

        path.request_id = path.request_id.wrapping_add(1);
        path.waypoints.clear();

        let goal_position = match *goal {
            PatrolGoal::Position(position) => Some(position),
            PatrolGoal::Actor(target) => positions.get(target).ok().map(|t| t.translation),
        };

        let Some(goal_position) = goal_position else {
            path.status = PatrolStatus::Failed(PathFailure::InvalidGoal);
            crate::logger::log_warning(&format!(
                "Patrol: {:?} goal {:?} has no position",
                entity, goal
            ));
            continue;
        };

        path.status = PatrolStatus::Pending;
        move_events.write(MoveToRequest {
            entity,
            request_id: path.request_id,
            goal: goal_position,
            acceptance_radius: config.patrol_acceptance_radius,
        });

        crate::logger::log(&format!(
            "🚶 Patrol: {:?} → {:?} (request #{})",
            entity, goal_position, path.request_id
        ));
    }
}

/// Система: PathResult → PatrolPath
pub fn receive_path_results(
    mut results: EventReader<PathResult>,
    mut patrollers: Query<(&mut PatrolPath, Option<&CombatState>)>,
) {
    for result in results.read() {
        let Ok((mut path, state)) = patrollers.get_mut(result.entity) else {
            continue;
        };

        // Устаревший ответ (вытеснен новым запросом) или актор уже мёртв
        if result.request_id != path.request_id || path.status != PatrolStatus::Pending {
            continue;
        }
        if state.is_some_and(CombatState::is_dead) {
            continue;
        }

        match &result.outcome {
            Ok(waypoints) if !waypoints.is_empty() => {
                path.waypoints = waypoints.clone();
                path.status = PatrolStatus::Following;
                crate::logger::log(&format!(
                    "Patrol: {:?} path with {} waypoints",
                    result.entity,
                    waypoints.len()
                ));
            }
            Ok(_) => {
                path.status = PatrolStatus::Failed(PathFailure::NoPath);
                crate::logger::log_warning(&format!("Patrol: {:?} got empty path", result.entity));
            }
            Err(failure) => {
                path.status = PatrolStatus::Failed(*failure);
                crate::logger::log_warning(&format!(
                    "Patrol: {:?} path failed: {}",
                    result.entity, failure
                ));
            }
        }
    }
}

/// Система: смерть → патруль остановлен, debug путь очищен
pub fn stop_patrol_on_death(
    mut deaths: EventReader<EntityDied>,
    mut patrollers: Query<&mut PatrolPath>,
) {
    for death in deaths.read() {
        if let Ok(mut path) = patrollers.get_mut(death.entity) {
            path.status = PatrolStatus::Idle;
            path.waypoints.clear();
        }
    }
}
