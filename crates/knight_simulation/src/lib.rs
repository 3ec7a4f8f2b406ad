//! Knight Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (gameplay rules layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay rules (health, combat state, hit reactions, target tracking, patrol)
//! - Host engine = rendering, animation blending, pathfinding, physics, input binding
//!
//! Engine → ECS: ImpactEvent, AnimationNotify, PathResult, PlayerCommand
//! ECS → Engine: PlayMontage, MoveToRequest, MovementRequest, SpawnEffect, AttachWeapon
//! Presentation: HealthDisplay, AnimationParams, PatrolPath (Changed<T> queries)

use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod player;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, MoveToRequest, PathFailure, PathResult, PatrolGoal, PatrolPath};
pub use animation::{AnimationNotify, AnimationPlugin, AnimationParams, Montages, NotifyKind, PlayMontage};
pub use combat::{
    resolve_hit_reaction, ActionState, CharacterState, CombatPlugin, CombatState, CombatTarget,
    DamageDealt, DeathPose, DespawnAfter, EntityDied, HitReaction, ImpactEvent,
};
pub use components::*;
pub use config::{CombatConfig, ConfigError};
pub use logger::{log, log_error, log_info, log_warning};
pub use player::{MovementRequest, PlayerAction, PlayerCommand, PlayerPlugin};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию, тесты перезаписывают)
            .init_resource::<DeterministicRng>()
            .init_resource::<CombatConfig>()
            .add_systems(Startup, config::validate_config)
            .add_plugins((AnimationPlugin, CombatPlugin, PlayerPlugin, AIPlugin));
    }
}

/// Источник случайности для gameplay решений (death pose, attack section)
///
/// Отделён от конкретного RNG чтобы тесты могли подставить фиксированную последовательность.
pub trait RandomSource {
    /// Равномерный индекс в диапазоне `0..len` (`len > 0`)
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

impl RandomSource for DeterministicRng {
    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
