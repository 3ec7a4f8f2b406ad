//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, Attributes)
//! - display: presentation proxy (HealthDisplay)
//! - world: конвенции осей хост-движка (WORLD_UP, forward)
//! - movement: locomotion состояние от движка (Locomotion)
//! - player: player control (Player, Possesses)
//! - equipment: оружие (Weapon, OverlappingWeapon, HeldWeapon)

pub mod actor;
pub mod display;
pub mod equipment;
pub mod movement;
pub mod player;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use display::*;
pub use equipment::*;
pub use movement::*;
pub use player::*;
pub use world::*;
