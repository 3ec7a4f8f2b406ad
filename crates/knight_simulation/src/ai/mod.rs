//! Enemy AI: patrol directive
//!
//! ECS решает КУДА идти (patrol goal, acceptance radius),
//! движок решает КАК (NavMesh pathfinding, path following).
//! AI planning кроме patrol здесь нет.

use bevy::prelude::*;

use crate::combat::{handle_deaths, EntityDied};
use crate::config::CombatConfig;

pub mod events;
pub mod patrol;


// Re-export основных типов
pub use events::{MoveToRequest, PathFailure, PathResult};
pub use patrol::{
    issue_patrol_requests, receive_path_results, stop_patrol_on_death, PatrolGoal, PatrolPath,
    PatrolStatus,
};

/// AI Plugin
///
/// Порядок выполнения:
/// 1. issue_patrol_requests — новый/изменённый PatrolGoal → MoveToRequest
/// 2. receive_path_results — PathResult от движка → PatrolPath
/// 3. stop_patrol_on_death — мёртвые не патрулируют
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatConfig>();

        app.add_event::<MoveToRequest>()
            .add_event::<PathResult>()
            .add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (
                issue_patrol_requests,
                receive_path_results,
                stop_patrol_on_death,
            )
                .chain() // Последовательное выполнение для детерминизма
                .after(handle_deaths), // EntityDied и Dead state видны в том же тике
        );
    }
}
