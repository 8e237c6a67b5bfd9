//! Wayfarer Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: AI агенты, бой, перемещение.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game state, AI решения, combat rules (этот crate)
//! - Host-движок = рендер, анимация, navmesh, ввод (через события/компоненты)
//!
//! Тик (FixedUpdate), строго по порядку:
//! Sense → Decide → Act → Move → Resolve → Present

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod action;
pub mod actor;
pub mod ai;
pub mod combat;
pub mod config;
pub mod equipment;
pub mod error;
pub mod logger;
pub mod movement;
pub mod perception;
pub mod player;
pub mod progression;
pub mod save;
pub mod scenario;
pub mod shared;

// Re-export базовых типов для удобства
pub use action::{Action, ActionOwner, ActionScheduler, AgentActions};
pub use actor::{AgentBlueprint, ControlDisabled, Health};
pub use ai::{AIConfig, AIController, AIPlugin, AlertShout, Behavior, PatrolPath};
pub use combat::{
    calculate_damage, AttackHit, CombatPlugin, CombatTarget, CooldownReset, DamageDealt, EntityDied, Faction, Fighter,
    Projectile, WeaponCatalog, WeaponConfiguration, WeaponId,
};
pub use config::SimulationConfig;
pub use equipment::{EquipWeaponRequest, EquipmentPlugin, WeaponPickup};
pub use error::{Result, SimulationError};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use movement::{ForwardSpeed, MovementPlugin, Mover, NavigationArea};
pub use perception::{PerceptionPlugin, SpatialIndex};
pub use player::{Player, PlayerCommand, PlayerIntent, PlayerPlugin};
pub use progression::{BaseStats, CharacterClass, Experience, LeveledUp, Progression, ProgressionPlugin};
pub use save::{capture_world, restore_world, SaveGame, SaveId};
pub use shared::{AnimationCue, AnimationCues, AnimationTriggered, Attachment, PresentationPlugin};

/// Фазы тика симуляции (FixedUpdate, цепочкой)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// SpatialIndex snapshot, валидация новых агентов
    Sense,
    /// AI решения, команды игрока, тревога
    Decide,
    /// Смена оружия, боевой тик Fighter'ов
    Act,
    /// Интеграция Mover
    Move,
    /// Снаряды, урон, смерть, опыт, pickups
    Resolve,
    /// Animation cues → события
    Present,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz))
            // Детерминистичный RNG (seed из конфига)
            .insert_resource(DeterministicRng::new(self.config.seed))
            .insert_resource(self.config.clone())
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Sense,
                    SimulationSet::Decide,
                    SimulationSet::Act,
                    SimulationSet::Move,
                    SimulationSet::Resolve,
                    SimulationSet::Present,
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((
                PerceptionPlugin,
                MovementPlugin,
                CombatPlugin,
                AIPlugin,
                PlayerPlugin,
                EquipmentPlugin,
                ProgressionPlugin,
                PresentationPlugin,
            ));
    }
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

/// Создаёт minimal Bevy App для headless симуляции (реальное время)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin::new(SimulationConfig {
        seed,
        ..default()
    }));

    app
}

/// Headless App с ручным временем: каждый `app.update()` = ровно один тик
///
/// Первый update (нулевой delta) делается здесь же.
pub fn create_stepped_app(seed: u64, tick: Duration) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::new(SimulationConfig {
            seed,
            tick_hz: 1.0 / tick.as_secs_f64(),
            ..default()
        }))
        // Одинаковый Duration → ровно один FixedUpdate на update
        .insert_resource(Time::<Fixed>::from_duration(tick))
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick));

    app.update();
    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
