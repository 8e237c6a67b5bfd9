//! Тесты детерминизма
//!
//! Проверяем что демо-сценарий с одинаковым seed даёт идентичные результаты

use std::time::Duration;

use bevy::prelude::*;
use wayfarer_simulation::scenario::spawn_demo_scenario;
use wayfarer_simulation::{create_stepped_app, world_snapshot, Health, PlayerCommand, PlayerIntent};

const TICK: Duration = Duration::from_millis(125);

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 400;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    // Снепшоты должны быть идентичны
    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 200;

    // Запускаем 3 раза - все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let snapshot1 = run_simulation(1, 50);
    let snapshot2 = run_simulation(2, 50);

    assert_ne!(snapshot1, snapshot2, "Разные seed дали одинаковую сцену");
}

/// Запускает демо-сценарий и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_stepped_app(seed, TICK);
    let scenario = spawn_demo_scenario(app.world_mut(), 8);

    // Игрок идёт через всю карту - гарантированно встречает стражей
    app.world_mut().send_event(PlayerCommand::new(
        scenario.player,
        PlayerIntent::MoveTo(Vec3::new(20.0, 0.0, 20.0)),
    ));

    for _ in 0..tick_count {
        app.update();
    }

    let mut snapshot = world_snapshot::<Transform>(app.world_mut());
    snapshot.extend(world_snapshot::<Health>(app.world_mut()));
    snapshot
}
