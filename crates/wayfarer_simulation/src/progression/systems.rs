//! Progression systems: опыт за убийство → уровень → здоровье

use bevy::prelude::*;

use super::components::{BaseStats, Experience};
use super::table::Progression;
use crate::actor::Health;
use crate::combat::{calculate_stat, EntityDied, Stat, StatModifiers};
use crate::{log_info, log_warning};

/// Событие: агент перешёл на новый уровень
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeveledUp {
    pub entity: Entity,
    pub level: u32,
}

/// Система: EntityDied → опыт убийце (Resolve set)
///
/// Награда = ExperienceReward класса/уровня погибшего. Без убийцы (restore)
/// или без BaseStats у погибшего опыт не начисляется.
pub fn award_experience(
    mut deaths: EventReader<EntityDied>,
    victims: Query<&BaseStats>,
    mut killers: Query<&mut Experience>,
    progression: Res<Progression>,
) {
    for death in deaths.read() {
        let Some(killer) = death.killer.filter(|killer| *killer != death.entity) else {
            continue;
        };
        let Ok(victim) = victims.get(death.entity) else {
            continue;
        };
        let Ok(mut experience) = killers.get_mut(killer) else {
            continue;
        };

        let reward = victim.stat_value(Stat::ExperienceReward, &progression);
        experience.gain(reward);
        log_info(&format!(
            "✨ {:?} gained {:.0} XP for {:?} (total {:.0})",
            killer,
            reward,
            death.entity,
            experience.value()
        ));
    }
}

/// Система: пересчёт уровня при изменении опыта (Resolve set)
///
/// Уровень только растёт. Новый max Health берётся из прогрессии,
/// доля текущего здоровья сохраняется.
pub fn update_levels(
    mut agents: Query<
        (Entity, &mut BaseStats, &Experience, Option<&mut Health>, Option<&StatModifiers>),
        Changed<Experience>,
    >,
    progression: Res<Progression>,
    mut level_ups: EventWriter<LeveledUp>,
) {
    for (entity, mut stats, experience, health, modifiers) in agents.iter_mut() {
        let level = match progression.level_for(stats.class, stats.starting_level, experience.value()) {
            Ok(level) => level,
            Err(error) => {
                log_warning(&format!("⚠️ {:?}: {}", entity, error));
                continue;
            }
        };
        if level <= stats.level() {
            continue;
        }

        stats.set_level(level);

        if let Some(mut health) = health {
            let base = stats.stat_value(Stat::Health, &progression);
            let max_health = match modifiers {
                Some(modifiers) => calculate_stat(base, Stat::Health, &[modifiers]),
                None => base,
            };
            health.rescale(max_health);
        }

        level_ups.write(LeveledUp { entity, level });
        log_info(&format!("⬆️ {:?} reached level {}", entity, level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::CharacterClass;

    fn progression_app() -> App {
        let mut app = App::new();
        app.init_resource::<Progression>()
            .add_event::<EntityDied>()
            .add_event::<LeveledUp>()
            .add_systems(Update, (award_experience, update_levels).chain());
        app
    }

    fn kill(app: &mut App, entity: Entity, killer: Option<Entity>) {
        app.world_mut().send_event(EntityDied { entity, killer });
        app.update();
    }

    #[test]
    fn test_killer_gains_victim_reward_and_levels_up() {
        let mut app = progression_app();
        let hero = app
            .world_mut()
            .spawn((BaseStats::new(CharacterClass::Player, 1), Experience::default(), Health::new(100.0)))
            .id();
        app.world_mut().get_mut::<Health>(hero).unwrap().current = 50.0;

        // Guard 3-го уровня: награда 50 + 25 + 25 = 100 → ровно порог, уровень не растёт
        let veteran = app.world_mut().spawn(BaseStats::new(CharacterClass::Guard, 3)).id();
        kill(&mut app, veteran, Some(hero));
        assert_eq!(app.world().get::<Experience>(hero).unwrap().value(), 100.0);
        assert_eq!(app.world().get::<BaseStats>(hero).unwrap().level(), 1);

        let recruit = app.world_mut().spawn(BaseStats::new(CharacterClass::Guard, 1)).id();
        kill(&mut app, recruit, Some(hero));

        assert_eq!(app.world().get::<Experience>(hero).unwrap().value(), 150.0);
        assert_eq!(app.world().get::<BaseStats>(hero).unwrap().level(), 2);
        // Player health L2 = 120, доля 0.5 сохранена
        let health = app.world().get::<Health>(hero).unwrap();
        assert_eq!(health.max, 120.0);
        assert_eq!(health.current, 60.0);

        let level_ups = app.world().resource::<Events<LeveledUp>>();
        assert_eq!(level_ups.len(), 1);
    }

    #[test]
    fn test_no_experience_without_killer_or_victim_stats() {
        let mut app = progression_app();
        let hero = app.world_mut().spawn(Experience::default()).id();
        let restored_dead = app.world_mut().spawn(BaseStats::new(CharacterClass::Guard, 1)).id();
        let crate_box = app.world_mut().spawn(Health::new(10.0)).id();

        kill(&mut app, restored_dead, None);
        kill(&mut app, crate_box, Some(hero));
        // Самоубийство не награждается
        kill(&mut app, hero, Some(hero));

        assert_eq!(app.world().get::<Experience>(hero).unwrap().value(), 0.0);
    }
}
