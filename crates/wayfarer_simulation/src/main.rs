//! Headless симуляция Wayfarer
//!
//! Запускает Bevy App без рендера: игрок + патрульные стражи.
//! Опционально: путь к TOML конфигу первым аргументом.

use std::time::Duration;

use wayfarer_simulation::scenario::spawn_demo_scenario;
use wayfarer_simulation::{
    create_stepped_app, init_logger, log, log_error, AIController, BaseStats, Behavior, Health,
    SimulationConfig,
};

fn main() {
    init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path).unwrap_or_else(|error| {
            log_error(&format!("❌ Failed to load config {}: {}", path, error));
            SimulationConfig::default()
        }),
        None => SimulationConfig::default(),
    };

    log(&format!("Starting Wayfarer headless simulation (seed: {})", config.seed));

    let mut app = create_stepped_app(config.seed, Duration::from_secs_f64(config.tick_seconds()));
    // cooldown policy и прочее из загруженного конфига
    app.insert_resource(config);
    let scenario = spawn_demo_scenario(app.world_mut(), 6);

    // 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let world = app.world_mut();
            let attacking = world
                .query::<&AIController>()
                .iter(world)
                .filter(|controller| matches!(controller.last_behavior(), Behavior::Attack { .. }))
                .count();
            let player_health = world.get::<Health>(scenario.player).map_or(0.0, |health| health.current);
            let player_level = world.get::<BaseStats>(scenario.player).map_or(1, BaseStats::level);
            log(&format!(
                "Tick {}: {} entities, {} guards attacking, player health {:.1} (level {})",
                tick,
                world.entities().len(),
                attacking,
                player_health,
                player_level
            ));
        }
    }

    log("Simulation complete!");
}
