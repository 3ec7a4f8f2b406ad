//! Animation bridge: montage requests, animation notifies, locomotion params
//!
//! ECS не знает про blending/skeleton. Она только:
//! - просит движок проиграть секцию S montage M (`PlayMontage`)
//! - получает notify с таймлайна анимации (`AnimationNotify`) между тиками
//! - отдаёт параметры для anim blueprint (`AnimationParams`)

use bevy::prelude::*;

use crate::combat::CharacterState;
use crate::components::{Locomotion, WORLD_UP};
use crate::player::process_equip_notifies;

/// Animation Plugin: регистрирует bridge события и locomotion params
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayMontage>()
            .add_event::<AnimationNotify>();

        // CharacterState уже после EquipFinished этого тика
        app.add_systems(FixedUpdate, update_animation_params.after(process_equip_notifies));
    }
}

/// Montage handles актора (asset path в движке)
///
/// `None` → соответствующая анимация не настроена, playback пропускается.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Montages {
    pub attack: Option<String>,
    pub hit_react: Option<String>,
    pub death: Option<String>,
    pub equip: Option<String>,
}

/// Запрос к движку: play montage + jump to section
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayMontage {
    pub entity: Entity,
    pub montage: String,
    pub section: String,
}

/// Notify с таймлайна анимации (движок → ECS)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationNotify {
    pub entity: Entity,
    pub notify: NotifyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    /// Конец attack montage
    AttackEnd,
    /// Конец hit-react montage
    HitReactEnd,
    /// Конец equip/unequip montage
    EquipFinished,
    /// Момент equip montage: оружие переходит в руку
    Arm,
    /// Момент unequip montage: оружие уходит за спину
    Disarm,
}

/// Параметры для anim blueprint (ECS → движок)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationParams {
    /// Горизонтальная скорость (engine units/sec)
    pub ground_speed: f32,
    pub is_falling: bool,
    pub character_state: CharacterState,
}

/// Пишет PlayMontage если montage настроен. Возвращает `true` если запрос отправлен.
pub fn request_montage(
    writer: &mut EventWriter<PlayMontage>,
    entity: Entity,
    montage: Option<&String>,
    section: &str,
) -> bool {
    let Some(montage) = montage else {
        return false;
    };

    writer.write(PlayMontage {
        entity,
        montage: montage.clone(),
        section: section.to_string(),
    });
    true
}

/// Горизонтальная скорость (без вертикальной компоненты)
pub fn ground_speed(velocity: Vec3) -> f32 {
    (velocity - WORLD_UP * velocity.dot(WORLD_UP)).length()
}

/// Система: Locomotion (+ CharacterState) → AnimationParams
///
/// Пишет только при реальном изменении, иначе Changed<AnimationParams> спамит bridge.
pub fn update_animation_params(
    mut actors: Query<(&Locomotion, Option<&CharacterState>, &mut AnimationParams)>,
) {
    for (locomotion, character, mut params) in actors.iter_mut() {
        let next = AnimationParams {
            ground_speed: ground_speed(locomotion.velocity),
            is_falling: locomotion.is_falling,
            character_state: character.copied().unwrap_or_default(),
        };

        if *params != next {
            *params = next;
        }
    }
}
