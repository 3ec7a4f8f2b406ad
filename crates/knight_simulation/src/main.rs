//! Headless симуляция knight combat
//!
//! Запускает Bevy App без рендера: игрок бьёт врага пока тот не умрёт,
//! pathfinding движка заменён прямой линией до цели.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use knight_simulation::*;

/// Engine stub: MoveToRequest → прямой путь до goal
fn answer_path_requests(
    mut requests: EventReader<MoveToRequest>,
    transforms: Query<&Transform>,
    mut results: EventWriter<PathResult>,
) {
    for request in requests.read() {
        let start = transforms
            .get(request.entity)
            .map(|t| t.translation)
            .unwrap_or(Vec3::ZERO);

        results.write(PathResult {
            entity: request.entity,
            request_id: request.request_id,
            outcome: Ok(vec![start, request.goal]),
        });
    }
}

fn main() {
    let seed = 42;
    println!("Starting knight headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .add_systems(Update, answer_path_requests);

    let pawn = app
        .world_mut()
        .spawn((Actor, Player, Transform::from_xyz(-100.0, 0.0, 0.0)))
        .id();
    let controller = app.world_mut().spawn(Possesses { pawn }).id();

    let enemy = app
        .world_mut()
        .spawn((
            Actor,
            Attributes::new(100.0),
            Transform::from_xyz(0.0, 0.0, 0.0),
            PatrolGoal::Position(Vec3::new(400.0, 0.0, 0.0)),
        ))
        .id();

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        if tick % 60 == 30 {
            app.world_mut().send_event(ImpactEvent {
                target: enemy,
                point: Vec3::new(-20.0, 0.0, 90.0),
                instigator: Some(controller),
                causer: None,
                amount: 25.0,
            });
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let health = world.get::<Attributes>(enemy).map(|a| a.current());
            let state = world.get::<CombatState>(enemy).map(|s| s.action);
            println!(
                "Tick {}: {} entities, enemy HP {:?}, state {:?}",
                tick,
                world.entities().len(),
                health,
                state
            );
        }
    }

    println!("Simulation complete!");
}
