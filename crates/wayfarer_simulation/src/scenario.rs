//! Демо-сценарий: игрок + патрульные стражи
//!
//! Позиции патрулей генерируются из DeterministicRng - одинаковый seed
//! даёт одинаковую сцену.

use bevy::prelude::*;
use rand::Rng;

use crate::actor::AgentBlueprint;
use crate::ai::PatrolPath;
use crate::equipment::WeaponPickup;
use crate::log;
use crate::progression::CharacterClass;
use crate::DeterministicRng;

/// Сущности демо-сцены
#[derive(Debug, Clone)]
pub struct DemoScenario {
    pub player: Entity,
    pub guards: Vec<Entity>,
    pub pickup: Entity,
}

/// Spawn игрока, `guard_count` стражей с патрулями и одного pickup'а
pub fn spawn_demo_scenario(world: &mut World, guard_count: usize) -> DemoScenario {
    let player = AgentBlueprint::player(Vec3::ZERO)
        .named("Player")
        .with_save_id("player")
        .spawn(world);

    let layouts: Vec<(Vec3, Vec<Vec3>, bool)> = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        (0..guard_count)
            .map(|_| {
                let center = Vec3::new(rng.rng.gen_range(-20.0..20.0), 0.0, rng.rng.gen_range(-20.0..20.0));
                let waypoints = (0..rng.rng.gen_range(2..5))
                    .map(|_| center + Vec3::new(rng.rng.gen_range(-6.0..6.0), 0.0, rng.rng.gen_range(-6.0..6.0)))
                    .collect();
                (center, waypoints, rng.rng.gen_bool(0.5))
            })
            .collect()
    };

    let guards: Vec<Entity> = layouts
        .into_iter()
        .enumerate()
        .map(|(index, (center, waypoints, looping))| {
            let (weapon, class) = if index % 2 == 0 {
                ("sword", CharacterClass::Guard)
            } else {
                ("bow", CharacterClass::Archer)
            };
            AgentBlueprint::enemy(center)
                .named(format!("Guard {}", index))
                .with_fighter(weapon)
                .with_progression(class, 1 + index as u32 % 3)
                .with_patrol(PatrolPath::new(waypoints, looping))
                .with_save_id(format!("guard-{}", index))
                .spawn(world)
        })
        .collect();

    let pickup = world
        .spawn((
            Transform::from_xyz(2.0, 0.0, 0.0),
            WeaponPickup::new(Some("sword".into()), 20.0, 10.0),
        ))
        .id();

    log(&format!("🗺️ Demo scenario: player {:?}, {} guards", player, guards.len()));

    DemoScenario { player, guards, pickup }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Health;
    use crate::combat::{Fighter, WeaponCatalog};
    use crate::progression::{BaseStats, Experience};
    use crate::SimulationConfig;

    fn scenario_world(seed: u64) -> World {
        let mut world = World::new();
        world.insert_resource(DeterministicRng::new(seed));
        world.insert_resource(SimulationConfig::default());
        world.insert_resource(WeaponCatalog::default());
        world
    }

    #[test]
    fn test_demo_scenario_layout() {
        let mut world = scenario_world(7);
        let scenario = spawn_demo_scenario(&mut world, 4);

        assert_eq!(scenario.guards.len(), 4);
        let bow_guard = world.get::<Fighter>(scenario.guards[1]).unwrap();
        assert_eq!(bow_guard.weapon().id.as_str(), "bow");
        let archer = world.get::<BaseStats>(scenario.guards[1]).unwrap();
        assert_eq!((archer.class, archer.level()), (CharacterClass::Archer, 2));
        // Archer L2 = 80 + 10
        assert_eq!(world.get::<Health>(scenario.guards[1]).unwrap().max, 90.0);
        assert!(world.get::<Experience>(scenario.player).is_some());
        for guard in &scenario.guards {
            let patrol = world.get::<PatrolPath>(*guard).unwrap();
            assert!((2..5).contains(&patrol.len()));
        }
    }

    #[test]
    fn test_demo_scenario_same_seed_same_layout() {
        let positions = |seed: u64| {
            let mut world = scenario_world(seed);
            let scenario = spawn_demo_scenario(&mut world, 3);
            scenario
                .guards
                .iter()
                .map(|guard| world.get::<Transform>(*guard).unwrap().translation)
                .collect::<Vec<_>>()
        };

        assert_eq!(positions(99), positions(99));
    }
}
