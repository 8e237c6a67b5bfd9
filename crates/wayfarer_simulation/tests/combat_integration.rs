//! Combat integration test
//!
//! Полный App, ручное время (125ms тик). Игрок управляется PlayerCommand.
//!
//! Проверяем:
//! - Cooldown cadence для обеих политик сброса
//! - Смерть (один EntityDied, отмена действий, Death cue)
//! - Снаряды (лук)
//! - Смена оружия + pickups
//! - Опыт за убийства и уровни
//! - Save/restore

use std::time::Duration;

use approx::assert_relative_eq;
use bevy::prelude::*;
use rstest::rstest;
use wayfarer_simulation::combat::{distance_to_segment, Stat};
use wayfarer_simulation::*;

const TICK: Duration = Duration::from_millis(125);

/// События, собранные за весь прогон
#[derive(Resource, Default)]
struct Collected {
    deaths: Vec<EntityDied>,
    cues: Vec<AnimationTriggered>,
}

fn collect_events(
    mut collected: ResMut<Collected>,
    mut deaths: EventReader<EntityDied>,
    mut cues: EventReader<AnimationTriggered>,
) {
    collected.deaths.extend(deaths.read().copied());
    collected.cues.extend(cues.read().copied());
}

/// Helper: combat App + сбор событий после Present
fn create_combat_app(seed: u64) -> App {
    let mut app = create_stepped_app(seed, TICK);
    app.init_resource::<Collected>().add_systems(
        FixedUpdate,
        collect_events.after(SimulationSet::Present),
    );
    app
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn command(app: &mut App, actor: Entity, intent: PlayerIntent) {
    app.world_mut().send_event(PlayerCommand::new(actor, intent));
}

fn health(app: &App, entity: Entity) -> f32 {
    app.world().get::<Health>(entity).unwrap().current
}

#[rstest]
#[case::reset_to_zero(CooldownReset::Zero, 9)]
#[case::reset_to_tick_delta(CooldownReset::TickDelta, 8)]
fn test_melee_cooldown_cadence(#[case] policy: CooldownReset, #[case] second_strike_tick: usize) {
    let mut app = create_combat_app(42);
    let player = AgentBlueprint::player(Vec3::ZERO)
        .with_fighter("sword")
        .with_cooldown_reset(policy)
        .spawn(app.world_mut());
    let dummy = AgentBlueprint::dummy(Vec3::new(1.0, 0.0, 0.0), Faction::Enemy).spawn(app.world_mut());

    command(&mut app, player, PlayerIntent::Attack(dummy));

    // Первый удар сразу (cooldown изначально готов)
    app.update();
    assert_eq!(health(&app, dummy), 90.0);

    run_ticks(&mut app, second_strike_tick - 2);
    assert_eq!(health(&app, dummy), 90.0);

    app.update();
    assert_eq!(health(&app, dummy), 80.0);
}

#[test]
fn test_killing_blow_single_death() {
    let mut app = create_combat_app(42);
    let player = AgentBlueprint::player(Vec3::ZERO).with_fighter("sword").spawn(app.world_mut());
    let dummy = AgentBlueprint::dummy(Vec3::new(1.0, 0.0, 0.0), Faction::Enemy)
        .with_max_health(15.0)
        .spawn(app.world_mut());

    command(&mut app, player, PlayerIntent::Attack(dummy));
    run_ticks(&mut app, 20);

    let collected = app.world().resource::<Collected>();
    assert_eq!(collected.deaths.len(), 1);
    assert_eq!(collected.deaths[0].entity, dummy);
    assert_eq!(collected.deaths[0].killer, Some(player));
    assert!(app.world().get::<Health>(dummy).unwrap().is_dead());

    // Мёртвая цель потеряна → StopAttack
    assert!(app.world().get::<Fighter>(player).unwrap().target().is_none());
    let player_cues: Vec<_> = collected
        .cues
        .iter()
        .filter(|event| event.entity == player)
        .map(|event| event.cue)
        .collect();
    assert_eq!(
        player_cues,
        vec![AnimationCue::Attack, AnimationCue::Attack, AnimationCue::StopAttack]
    );
}

#[test]
fn test_player_kills_guard() {
    let mut app = create_combat_app(42);
    let player = AgentBlueprint::player(Vec3::ZERO).with_fighter("sword").spawn(app.world_mut());
    let guard = AgentBlueprint::enemy(Vec3::new(1.5, 0.0, 0.0))
        .with_max_health(10.0)
        .spawn(app.world_mut());

    command(&mut app, player, PlayerIntent::Attack(guard));
    run_ticks(&mut app, 20);

    // Guard успел ударить один раз в том же тике
    assert_eq!(health(&app, player), 95.0);
    assert!(app.world().get::<Health>(guard).unwrap().is_dead());
    assert_eq!(app.world().get::<AIController>(guard).unwrap().last_behavior(), Behavior::Inactive);
    assert!(app.world().get::<Fighter>(guard).unwrap().target().is_none());
    assert!(app.world().get::<ActionScheduler>(guard).unwrap().current().is_none());

    let collected = app.world().resource::<Collected>();
    assert!(collected
        .cues
        .iter()
        .any(|event| event.entity == guard && event.cue == AnimationCue::Death));
}

#[test]
fn test_bow_projectile_hits_target() {
    let mut app = create_combat_app(42);
    let player = AgentBlueprint::player(Vec3::ZERO).with_fighter("bow").spawn(app.world_mut());
    let dummy = AgentBlueprint::dummy(Vec3::new(6.0, 0.0, 0.0), Faction::Enemy).spawn(app.world_mut());

    command(&mut app, player, PlayerIntent::Attack(dummy));

    // 20 м/с × 0.125 = 2.5 м/тик; cooldown лука 1.5s - второго выстрела нет
    run_ticks(&mut app, 6);

    assert_relative_eq!(health(&app, dummy), 91.2, epsilon = 1e-4);
    let world = app.world_mut();
    assert_eq!(world.query::<&Projectile>().iter(world).count(), 0);
}

#[test]
fn test_equip_swaps_weapon_instance() {
    let mut app = create_combat_app(42);
    let player = AgentBlueprint::player(Vec3::ZERO).with_fighter("sword").spawn(app.world_mut());
    let sword_instance = app.world().get::<Fighter>(player).unwrap().weapon_instance().unwrap();

    command(&mut app, player, PlayerIntent::Equip(WeaponId::from("bow")));
    app.update();

    let fighter = app.world().get::<Fighter>(player).unwrap();
    assert_eq!(fighter.weapon().id.as_str(), "bow");
    let bow_instance = fighter.weapon_instance().unwrap();
    assert!(app.world().get_entity(sword_instance).is_err());

    let attachment = app.world().get::<Attachment>(bow_instance).unwrap();
    assert_eq!(attachment.weapon.as_str(), "bow");
    assert_eq!(attachment.attachment_point, "LeftHand/WeaponAttachment");
    assert_eq!(app.world().get::<ChildOf>(bow_instance).unwrap().parent(), player);

    // Неизвестное оружие → no-op
    command(&mut app, player, PlayerIntent::Equip(WeaponId::from("trebuchet")));
    app.update();
    let fighter = app.world().get::<Fighter>(player).unwrap();
    assert_eq!(fighter.weapon().id.as_str(), "bow");
    assert_eq!(fighter.weapon_instance(), Some(bow_instance));
}

#[test]
fn test_pickup_equips_heals_and_respawns() {
    let mut app = create_combat_app(42);
    let player = AgentBlueprint::player(Vec3::ZERO).spawn(app.world_mut());
    app.world_mut().get_mut::<Health>(player).unwrap().current = 50.0;
    let pickup = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.5, 0.0, 0.0),
            WeaponPickup::new(Some(WeaponId::from("sword")), 20.0, 1.0),
        ))
        .id();

    app.update();
    assert_eq!(health(&app, player), 70.0);
    assert!(!app.world().get::<WeaponPickup>(pickup).unwrap().is_available());

    // EquipWeaponRequest применяется в следующем тике
    app.update();
    assert_eq!(app.world().get::<Fighter>(player).unwrap().weapon().id.as_str(), "sword");

    // respawn 1s = 8 тиков скрытия, затем снова подбирается
    run_ticks(&mut app, 7);
    assert_eq!(health(&app, player), 70.0);
    app.update();
    assert_eq!(health(&app, player), 90.0);
}

#[test]
fn test_player_move_and_stop() {
    let mut app = create_combat_app(42);
    let player = AgentBlueprint::player(Vec3::ZERO).spawn(app.world_mut());

    command(&mut app, player, PlayerIntent::MoveTo(Vec3::new(10.0, 0.0, 0.0)));
    run_ticks(&mut app, 8);

    // 2 м/с × 1s
    let position = app.world().get::<Transform>(player).unwrap().translation;
    assert_relative_eq!(position.x, 2.0, epsilon = 1e-4);
    assert_eq!(
        app.world().get::<ActionScheduler>(player).unwrap().current(),
        Some(&Action::Move {
            destination: Vec3::new(10.0, 0.0, 0.0)
        })
    );

    command(&mut app, player, PlayerIntent::Stop);
    run_ticks(&mut app, 4);

    let position = app.world().get::<Transform>(player).unwrap().translation;
    assert_relative_eq!(position.x, 2.0, epsilon = 1e-4);
    assert!(app.world().get::<Mover>(player).unwrap().is_stopped());
    assert!(app.world().get::<ActionScheduler>(player).unwrap().current().is_none());
}

/// Враг с классом/уровнем, добивается одним ударом
fn weakened_enemy(app: &mut App, position: Vec3, class: CharacterClass, level: u32) -> Entity {
    let enemy = AgentBlueprint::dummy(position, Faction::Enemy)
        .with_progression(class, level)
        .spawn(app.world_mut());
    app.world_mut().get_mut::<Health>(enemy).unwrap().current = 5.0;
    enemy
}

#[test]
fn test_kills_grant_experience_and_level_up() {
    let mut app = create_combat_app(42);
    let player = AgentBlueprint::player(Vec3::ZERO).with_fighter("sword").spawn(app.world_mut());

    // Guard L3: награда 100 = ровно порог 1-го уровня
    let veteran = weakened_enemy(&mut app, Vec3::new(1.0, 0.0, 0.0), CharacterClass::Guard, 3);
    command(&mut app, player, PlayerIntent::Attack(veteran));
    app.update();
    assert_eq!(app.world().get::<Experience>(player).unwrap().value(), 100.0);
    assert_eq!(app.world().get::<BaseStats>(player).unwrap().level(), 1);

    // Следующий удар через 1s cooldown (8 тиков)
    let recruit = weakened_enemy(&mut app, Vec3::new(-1.0, 0.0, 0.0), CharacterClass::Guard, 1);
    command(&mut app, player, PlayerIntent::Attack(recruit));
    run_ticks(&mut app, 8);
    assert!(app.world().get::<Health>(recruit).unwrap().is_dead());
    assert_eq!(app.world().get::<Experience>(player).unwrap().value(), 150.0);
    assert_eq!(app.world().get::<BaseStats>(player).unwrap().level(), 2);
    assert_eq!(app.world().get::<Health>(player).unwrap().max, 120.0);

    // Уровень 2 даёт +2 к урону меча
    let dummy = AgentBlueprint::dummy(Vec3::new(0.0, 0.0, 1.0), Faction::Enemy).spawn(app.world_mut());
    command(&mut app, player, PlayerIntent::Attack(dummy));
    run_ticks(&mut app, 8);
    assert_eq!(health(&app, dummy), 88.0);

    // Guard-манекены опыта не копят
    assert!(app.world().get::<Experience>(veteran).is_none());
}

#[test]
fn test_enemy_progression_sets_health_and_damage() {
    let mut app = create_combat_app(42);
    let progression = app.world().resource::<Progression>();
    assert_eq!(progression.value(CharacterClass::Guard, Stat::Health, 3).unwrap(), 130.0);

    let guard = AgentBlueprint::enemy(Vec3::new(1.0, 0.0, 0.0))
        .with_fighter("sword")
        .with_progression(CharacterClass::Guard, 3)
        .spawn(app.world_mut());
    let player = AgentBlueprint::player(Vec3::ZERO).spawn(app.world_mut());

    assert_eq!(app.world().get::<Health>(guard).unwrap().max, 130.0);

    // Guard L3 бьёт мечом: 10 + 3
    app.update();
    assert_eq!(health(&app, player), 87.0);
}

#[test]
fn test_projectile_segment_distance_from_combat_root() {
    let start = Vec3::ZERO;
    let end = Vec3::new(2.0, 0.0, 0.0);

    assert_eq!(distance_to_segment(Vec3::new(1.0, 1.0, 0.0), start, end), 1.0);
    // За концом отрезка - расстояние до конца
    assert_eq!(distance_to_segment(Vec3::new(5.0, 0.0, 4.0), start, end), 5.0);
}

#[test]
fn test_save_and_restore_round_trip() {
    let mut app = create_combat_app(42);
    let guard = AgentBlueprint::enemy(Vec3::new(30.0, 0.0, 0.0))
        .with_fighter("sword")
        .with_save_id("guard-1")
        .spawn(app.world_mut());
    app.world_mut().get_mut::<Health>(guard).unwrap().current = 40.0;

    let json = capture_world(app.world_mut()).to_json().unwrap();

    // Новая сессия: тот же guard, но с дефолтным состоянием
    let mut restored = create_combat_app(42);
    let fresh_guard = AgentBlueprint::enemy(Vec3::new(30.0, 0.0, 0.0))
        .with_save_id("guard-1")
        .spawn(restored.world_mut());

    let save = SaveGame::from_json(&json).unwrap();
    assert_eq!(restore_world(restored.world_mut(), &save), 1);
    restored.update();

    assert_eq!(health(&restored, fresh_guard), 40.0);
    assert_eq!(
        restored.world().get::<Fighter>(fresh_guard).unwrap().weapon().id.as_str(),
        "sword"
    );
}
