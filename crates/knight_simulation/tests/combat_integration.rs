//! Combat integration test
//!
//! Headless App с SimulationPlugin, FixedUpdate прогоняется напрямую
//! (один вызов = один simulation tick, без зависимости от real time).
//!
//! Проверяем:
//! - DamageIngestion сценарии (hit-react, смерть, повторный урон по мёртвому)
//! - Directional hit-react секции
//! - Combat target release по дистанции
//! - Despawn трупа через 10 секунд

use std::time::Duration;

use bevy::prelude::*;
use bevy_rapier3d::geometry::ColliderDisabled;
use knight_simulation::*;

/// Helper: App со всеми plugins, без MinimalPlugins (time двигаем вручную)
fn create_combat_app(seed: u64) -> App {
    logger::init_logger();

    let mut app = App::new();
    app.add_plugins(SimulationPlugin)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<()>::default());
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

/// Helper: враг в начале координат, смотрит на +X
fn spawn_enemy(app: &mut App, health: Attributes) -> Entity {
    app.world_mut()
        .spawn((
            Actor,
            health,
            Transform::from_translation(Vec3::ZERO),
            Montages {
                attack: None,
                hit_react: Some("HitReactMontage".to_string()),
                death: Some("DeathMontage".to_string()),
                equip: None,
            },
            combat::HitEffects {
                particles: Some("BloodSplash".to_string()),
            },
        ))
        .id()
}

/// Helper: игрок (pawn) + его controller
fn spawn_player(app: &mut App, position: Vec3) -> (Entity, Entity) {
    let pawn = app
        .world_mut()
        .spawn((Actor, Player, Transform::from_translation(position)))
        .id();
    let controller = app.world_mut().spawn(Possesses { pawn }).id();
    (pawn, controller)
}

fn impact(app: &mut App, target: Entity, point: Vec3, instigator: Entity, amount: f32) {
    app.world_mut().send_event(ImpactEvent {
        target,
        point,
        instigator: Some(instigator),
        causer: None,
        amount,
    });
}

#[test]
fn test_survivable_hit_scenario() {
    let mut app = create_combat_app(42);
    let enemy = spawn_enemy(&mut app, Attributes::new(100.0));
    let (pawn, controller) = spawn_player(&mut app, Vec3::new(0.0, 100.0, 0.0));

    impact(&mut app, enemy, Vec3::new(0.0, 40.0, 90.0), controller, 30.0);
    tick(&mut app);

    let world = app.world();
    let display = world.get::<HealthDisplay>(enemy).unwrap();
    assert!((display.fraction - 0.7).abs() < 1e-6);
    assert!(display.visible);
    assert_eq!(world.get::<CombatState>(enemy).unwrap().action, ActionState::HitReacting);
    assert_eq!(world.get::<CombatTarget>(enemy).unwrap().target, Some(pawn));

    // Удар справа (+Y при forward +X), высота игнорируется
    let montages = drain::<PlayMontage>(&mut app);
    assert_eq!(
        montages,
        vec![PlayMontage {
            entity: enemy,
            montage: "HitReactMontage".to_string(),
            section: "FromRight".to_string(),
        }]
    );

    let effects = drain::<combat::SpawnEffect>(&mut app);
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].position, Vec3::new(0.0, 40.0, 90.0));

    let dealt = drain::<DamageDealt>(&mut app);
    assert_eq!(dealt.len(), 1);
    assert_eq!(dealt[0].amount, 30.0);

    // HitReactEnd → Unoccupied
    app.world_mut().send_event(AnimationNotify {
        entity: enemy,
        notify: NotifyKind::HitReactEnd,
    });
    tick(&mut app);
    assert_eq!(
        app.world().get::<CombatState>(enemy).unwrap().action,
        ActionState::Unoccupied
    );
}

#[test]
fn test_lethal_hit_scenario() {
    let mut app = create_combat_app(42);
    let enemy = spawn_enemy(&mut app, Attributes::try_new(10.0, 100.0).unwrap());
    let (pawn, controller) = spawn_player(&mut app, Vec3::new(-50.0, 0.0, 0.0));

    impact(&mut app, enemy, Vec3::new(-20.0, 0.0, 0.0), controller, 50.0);
    tick(&mut app);

    let world = app.world();
    let state = *world.get::<CombatState>(enemy).unwrap();
    assert_eq!(state.action, ActionState::Dead);
    assert!(matches!(state.death_pose, DeathPose::Death1 | DeathPose::Death2));

    let display = world.get::<HealthDisplay>(enemy).unwrap();
    assert_eq!(display.fraction, 0.0);
    assert!(!display.visible);
    assert_eq!(world.get::<Attributes>(enemy).unwrap().current(), 0.0);
    assert!(world.get::<ColliderDisabled>(enemy).is_some());
    assert_eq!(world.get::<CombatTarget>(enemy).unwrap().target, Some(pawn));

    // Death montage в секции pose, hit-react не играется
    let montages = drain::<PlayMontage>(&mut app);
    assert_eq!(montages.len(), 1);
    assert_eq!(montages[0].montage, "DeathMontage");
    assert_eq!(Some(montages[0].section.as_str()), state.death_pose.section_name());

    let died = drain::<EntityDied>(&mut app);
    assert_eq!(died, vec![EntityDied { entity: enemy, killer: Some(pawn) }]);
}

#[test]
fn test_second_damage_on_dead_is_idempotent() {
    let mut app = create_combat_app(7);
    let enemy = spawn_enemy(&mut app, Attributes::new(20.0));
    let (_, controller) = spawn_player(&mut app, Vec3::X * 10.0);

    impact(&mut app, enemy, Vec3::X, controller, 25.0);
    tick(&mut app);
    let pose = app.world().get::<CombatState>(enemy).unwrap().death_pose;
    let despawn_time = app.world().get::<DespawnAfter>(enemy).unwrap().despawn_time;
    drain::<PlayMontage>(&mut app);
    drain::<EntityDied>(&mut app);

    impact(&mut app, enemy, Vec3::X, controller, 25.0);
    tick(&mut app);

    let world = app.world();
    let state = world.get::<CombatState>(enemy).unwrap();
    assert_eq!(state.action, ActionState::Dead);
    assert_eq!(state.death_pose, pose);
    assert!(!world.get::<HealthDisplay>(enemy).unwrap().visible);
    assert_eq!(world.get::<DespawnAfter>(enemy).unwrap().despawn_time, despawn_time);

    assert!(drain::<PlayMontage>(&mut app).is_empty());
    assert!(drain::<EntityDied>(&mut app).is_empty());
    // Echo всё равно есть
    assert_eq!(drain::<DamageDealt>(&mut app).len(), 2);
}

#[test]
fn test_two_lethal_hits_same_tick_die_once() {
    let mut app = create_combat_app(3);
    let enemy = spawn_enemy(&mut app, Attributes::new(10.0));
    let (_, controller) = spawn_player(&mut app, Vec3::X * 10.0);

    impact(&mut app, enemy, Vec3::X, controller, 15.0);
    impact(&mut app, enemy, -Vec3::X, controller, 15.0);
    tick(&mut app);

    assert_eq!(drain::<EntityDied>(&mut app).len(), 1);
    assert_eq!(drain::<PlayMontage>(&mut app).len(), 1);
}

#[test]
fn test_directional_sections() {
    let cases = [
        (Vec3::new(50.0, 0.0, 0.0), "FromFront"),
        (Vec3::new(-50.0, 0.0, 0.0), "FromBack"),
        (Vec3::new(0.0, -50.0, 0.0), "FromLeft"),
        (Vec3::new(0.0, 50.0, 0.0), "FromRight"),
    ];

    for (point, section) in cases {
        let mut app = create_combat_app(1);
        let enemy = spawn_enemy(&mut app, Attributes::new(100.0));
        let (_, controller) = spawn_player(&mut app, point * 2.0);

        impact(&mut app, enemy, point, controller, 1.0);
        tick(&mut app);

        let montages = drain::<PlayMontage>(&mut app);
        assert_eq!(montages.len(), 1, "point = {:?}", point);
        assert_eq!(montages[0].section, section, "point = {:?}", point);
    }
}

#[test]
fn test_rotated_enemy_hit_from_back() {
    let mut app = create_combat_app(1);
    let enemy = spawn_enemy(&mut app, Attributes::new(100.0));
    // Поворот на 180° вокруг Z: forward = -X
    app.world_mut().get_mut::<Transform>(enemy).unwrap().rotation =
        Quat::from_rotation_z(std::f32::consts::PI);
    let (_, controller) = spawn_player(&mut app, Vec3::X * 100.0);

    impact(&mut app, enemy, Vec3::X * 30.0, controller, 1.0);
    tick(&mut app);

    let montages = drain::<PlayMontage>(&mut app);
    assert_eq!(montages[0].section, "FromBack");
}

#[test]
fn test_missing_montages_skip_playback_only() {
    let mut app = create_combat_app(1);
    let enemy = app.world_mut().spawn((Actor, Attributes::new(10.0))).id();
    let (_, controller) = spawn_player(&mut app, Vec3::X * 10.0);

    impact(&mut app, enemy, Vec3::X, controller, 5.0);
    tick(&mut app);
    assert_eq!(
        app.world().get::<CombatState>(enemy).unwrap().action,
        ActionState::HitReacting
    );

    impact(&mut app, enemy, Vec3::X, controller, 5.0);
    tick(&mut app);

    let world = app.world();
    assert_eq!(world.get::<CombatState>(enemy).unwrap().action, ActionState::Dead);
    assert!(world.get::<ColliderDisabled>(enemy).is_some());
    assert!(drain::<PlayMontage>(&mut app).is_empty());
}

#[test]
fn test_combat_target_released_out_of_radius() {
    let mut app = create_combat_app(42);
    let enemy = spawn_enemy(&mut app, Attributes::new(100.0));
    let (pawn, controller) = spawn_player(&mut app, Vec3::X * 100.0);

    impact(&mut app, enemy, Vec3::X * 20.0, controller, 10.0);
    tick(&mut app);
    assert_eq!(app.world().get::<CombatTarget>(enemy).unwrap().target, Some(pawn));

    // Ровно на радиусе — цель удерживается
    app.world_mut().get_mut::<Transform>(pawn).unwrap().translation = Vec3::X * 500.0;
    tick(&mut app);
    assert_eq!(app.world().get::<CombatTarget>(enemy).unwrap().target, Some(pawn));
    assert!(app.world().get::<HealthDisplay>(enemy).unwrap().visible);

    app.world_mut().get_mut::<Transform>(pawn).unwrap().translation = Vec3::X * 501.0;
    tick(&mut app);
    assert_eq!(app.world().get::<CombatTarget>(enemy).unwrap().target, None);
    assert!(!app.world().get::<HealthDisplay>(enemy).unwrap().visible);
}

#[test]
fn test_dead_enemy_despawned_after_delay() {
    let mut app = create_combat_app(42);
    let enemy = spawn_enemy(&mut app, Attributes::new(10.0));
    let (_, controller) = spawn_player(&mut app, Vec3::X * 10.0);

    impact(&mut app, enemy, Vec3::X, controller, 100.0);
    tick(&mut app);

    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(9.5));
    tick(&mut app);
    assert!(app.world().get_entity(enemy).is_ok());

    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.5));
    tick(&mut app);
    assert!(app.world().get_entity(enemy).is_err());
}

#[test]
fn test_death_poses_deterministic_per_seed() {
    fn run(seed: u64) -> Vec<DeathPose> {
        let mut app = create_combat_app(seed);
        let (_, controller) = spawn_player(&mut app, Vec3::X * 10.0);
        let enemies: Vec<_> = (0..16)
            .map(|_| spawn_enemy(&mut app, Attributes::new(1.0)))
            .collect();

        for &enemy in &enemies {
            impact(&mut app, enemy, Vec3::X, controller, 1.0);
        }
        tick(&mut app);

        enemies
            .iter()
            .map(|&e| app.world().get::<CombatState>(e).unwrap().death_pose)
            .collect()
    }

    let first = run(42);
    assert_eq!(first, run(42));
    assert!(first.iter().all(|p| *p != DeathPose::None));
}

#[test]
fn test_attack_command_before_hit_in_same_tick() {
    let mut app = create_combat_app(42);
    let (pawn, _) = spawn_player(&mut app, Vec3::ZERO);
    app.world_mut()
        .entity_mut(pawn)
        .insert(CharacterState::EquippedOneHand);
    let enemy = spawn_enemy(&mut app, Attributes::new(100.0));

    // Команда и удар в одном тике: атака начинается раньше, удар её не прерывает
    app.world_mut().send_event(PlayerCommand {
        entity: pawn,
        action: PlayerAction::Attack,
    });
    impact(&mut app, pawn, Vec3::X * 20.0, enemy, 10.0);
    tick(&mut app);

    let world = app.world();
    assert_eq!(world.get::<CombatState>(pawn).unwrap().action, ActionState::Attacking);
    assert_eq!(world.get::<Attributes>(pawn).unwrap().current(), 90.0);
    assert_eq!(world.get::<CombatTarget>(pawn).unwrap().target, Some(enemy));
}
