//! Tests for Fighter / Projectile components.

#[cfg(test)]
mod tests {
    use super::super::fighter::{CooldownReset, EquipOutcome, Fighter, FighterStep};
    use super::super::projectile::Projectile;
    use super::super::target::{Faction, TargetHealth, TargetView};
    use crate::action::Cancellable;
    use crate::combat::{ProjectileContact, ProjectileSpec, WeaponConfiguration};
    use crate::movement::{Mover, NavigationArea};
    use crate::shared::{AnimationCue, AnimationCues};
    use bevy::prelude::*;
    use rstest::rstest;

    fn target_at(position: Vec3) -> TargetView {
        TargetView {
            entity: Entity::from_raw(42),
            faction: Faction::Player,
            position,
            health: TargetHealth::Alive,
        }
    }

    fn armed_fighter(policy: CooldownReset) -> Fighter {
        let mut fighter = Fighter::new(Faction::Player, WeaponConfiguration::sword()).with_cooldown_reset(policy);
        fighter.set_target(Entity::from_raw(42));
        fighter
    }

    /// Номера тиков (1..=ticks) на которых случился Strike
    fn strike_ticks(fighter: &mut Fighter, ticks: usize, delta: f32) -> Vec<usize> {
        let target = target_at(Vec3::new(1.0, 0.0, 0.0));
        (1..=ticks)
            .filter(|_| {
                matches!(
                    fighter.plan(Vec3::ZERO, delta, |_| Some(target)),
                    FighterStep::Strike { .. }
                )
            })
            .collect()
    }

    #[test]
    fn test_first_strike_is_immediate_then_waits_full_cooldown() {
        // sword: time_between_attacks = 1.0, dt = 0.25 (точно в f32)
        let mut fighter = armed_fighter(CooldownReset::Zero);
        assert_eq!(strike_ticks(&mut fighter, 9, 0.25), vec![1, 5, 9]);
    }

    #[test]
    fn test_tick_delta_policy_is_one_tick_shorter() {
        let mut fighter = armed_fighter(CooldownReset::TickDelta);
        assert_eq!(strike_ticks(&mut fighter, 9, 0.25), vec![1, 4, 7]);
    }

    #[rstest]
    #[case(Vec3::new(2.0, 0.0, 0.0), true)] // ровно на границе range - атакуем
    #[case(Vec3::new(2.01, 0.0, 0.0), false)]
    fn test_range_is_inclusive(#[case] position: Vec3, #[case] in_range: bool) {
        let mut fighter = armed_fighter(CooldownReset::Zero);
        let step = fighter.plan(Vec3::ZERO, 0.1, |_| Some(target_at(position)));

        assert_eq!(matches!(step, FighterStep::Strike { .. }), in_range);
        assert_eq!(matches!(step, FighterStep::Pursue { .. }), !in_range);
    }

    #[rstest]
    #[case(TargetHealth::Dead)]
    #[case(TargetHealth::Missing)]
    fn test_unattackable_target_is_lost(#[case] health: TargetHealth) {
        let mut fighter = armed_fighter(CooldownReset::Zero);
        let step = fighter.plan(Vec3::ZERO, 0.1, |entity| {
            Some(TargetView {
                health,
                ..target_at(Vec3::X)
            })
            .filter(|view| view.entity == entity)
        });

        assert_eq!(step, FighterStep::TargetLost { target: Entity::from_raw(42) });
    }

    #[test]
    fn test_no_target_is_idle_but_cooldown_advances() {
        let mut fighter = Fighter::new(Faction::Player, WeaponConfiguration::sword());
        let mut cues = AnimationCues::default();
        fighter.set_target(Entity::from_raw(1));
        fighter.plan(Vec3::ZERO, 0.1, |_| Some(target_at(Vec3::X)));
        fighter.cancel(&mut cues);

        assert_eq!(fighter.plan(Vec3::ZERO, 0.5, |_| None), FighterStep::Idle);
        assert_eq!(fighter.time_since_last_attack(), 0.5);
        assert_eq!(cues.pending(), &[AnimationCue::StopAttack]);
    }

    #[test]
    fn test_can_attack_rules() {
        let navigation = NavigationArea::default();
        let fighter = Fighter::new(Faction::Player, WeaponConfiguration::sword());
        let mover = Mover::new(2.0);
        let near = target_at(Vec3::new(1.0, 0.0, 0.0));
        let far = target_at(Vec3::new(60.0, 0.0, 0.0));

        assert!(!fighter.can_attack(None, Vec3::ZERO, Some(&mover), &navigation));
        assert!(fighter.can_attack(Some(&near), Vec3::ZERO, Some(&mover), &navigation));
        // Дальше max_path_length (40) и вне range
        assert!(!fighter.can_attack(Some(&far), Vec3::ZERO, Some(&mover), &navigation));
        // Без Mover проверка пути пропускается
        assert!(fighter.can_attack(Some(&near), Vec3::ZERO, None, &navigation));
        assert!(fighter.can_attack(Some(&far), Vec3::ZERO, None, &navigation));

        let ally = TargetView {
            faction: Faction::Enemy,
            ..near
        };
        assert!(!fighter.can_attack(Some(&ally), Vec3::ZERO, Some(&mover), &navigation));

        let dead = TargetView {
            health: TargetHealth::Dead,
            ..near
        };
        assert!(!fighter.can_attack(Some(&dead), Vec3::ZERO, Some(&mover), &navigation));
    }

    #[test]
    fn test_unreachable_target_in_range_cannot_be_attacked() {
        // Цель в range, но стоит внутри препятствия
        let navigation = NavigationArea::default().with_obstacle(Rect::new(0.5, -1.0, 3.0, 1.0));
        let fighter = Fighter::new(Faction::Player, WeaponConfiguration::sword());
        let mover = Mover::new(2.0);
        let target = target_at(Vec3::new(1.0, 0.0, 0.0));

        assert!(fighter.is_in_range(Vec3::ZERO, target.position));
        assert!(!mover.can_move_to(Vec3::ZERO, target.position, &navigation));
        assert!(!fighter.can_attack(Some(&target), Vec3::ZERO, Some(&mover), &navigation));
    }

    #[test]
    fn test_equip_none_is_noop_and_swap_returns_old_instance() {
        let mut fighter = Fighter::default();
        let instance = Entity::from_raw(5);

        assert_eq!(fighter.equip_weapon(None), EquipOutcome::Ignored);
        assert_eq!(fighter.weapon().id.as_str(), "unarmed");

        fighter.equip_weapon(Some(&WeaponConfiguration::sword()));
        fighter.attach_instance(instance);

        let outcome = fighter.equip_weapon(Some(&WeaponConfiguration::bow()));
        assert_eq!(outcome, EquipOutcome::Equipped { replaced_instance: Some(instance) });
        assert!(fighter.weapon().has_projectile());
        assert!(fighter.weapon_instance().is_none());
    }

    #[test]
    fn test_projectile_never_hits_shooter() {
        let spec = ProjectileSpec {
            speed: 10.0,
            homing: false,
            hit_radius: 0.5,
            lifetime: 2.0,
            contact: ProjectileContact::AnyOpposing,
        };
        let shooter = Entity::from_raw(1);
        let target = Entity::from_raw(2);
        let bystander = Entity::from_raw(3);
        let projectile = Projectile::launch(shooter, target, Faction::Player, 8.0, &spec, Vec3::ZERO, Vec3::X);

        assert!(!projectile.accepts(shooter, Faction::Player, true));
        assert!(projectile.accepts(bystander, Faction::Player, true));
        assert!(!projectile.accepts(bystander, Faction::Enemy, true));
        assert!(!projectile.accepts(target, Faction::Player, false));

        let target_only_spec = ProjectileSpec {
            contact: ProjectileContact::TargetOnly,
            ..spec
        };
        let target_only = Projectile::launch(shooter, target, Faction::Player, 8.0, &target_only_spec, Vec3::ZERO, Vec3::X);
        assert!(!target_only.accepts(bystander, Faction::Player, true));
        assert!(target_only.accepts(target, Faction::Player, true));
    }

    #[test]
    fn test_homing_projectile_lands_on_moving_target() {
        let spec = ProjectileSpec {
            speed: 4.0,
            homing: true,
            hit_radius: 0.5,
            lifetime: 1.0,
            contact: ProjectileContact::TargetOnly,
        };
        let mut projectile = Projectile::launch(
            Entity::from_raw(1),
            Entity::from_raw(2),
            Faction::Player,
            8.0,
            &spec,
            Vec3::ZERO,
            Vec3::X,
        );

        // Цель ушла вбок - снаряд доворачивает
        let position = projectile.advance(Vec3::ZERO, Some(Vec3::new(0.0, 0.0, 4.0)), 0.5);
        assert_eq!(position, Vec3::new(0.0, 0.0, 2.0));

        // Остаток меньше шага - прилетаем точно в цель
        let position = projectile.advance(position, Some(Vec3::new(0.0, 0.0, 3.0)), 0.5);
        assert_eq!(position, Vec3::new(0.0, 0.0, 3.0));
        assert!(projectile.is_expired());
    }
}
