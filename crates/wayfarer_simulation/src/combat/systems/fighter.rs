//! Fighter systems: валидация + боевой тик

use bevy::prelude::*;

use crate::action::{ActionSlots, Cancellable};
use crate::actor::{ControlDisabled, Health};
use crate::combat::{
    calculate_damage, AttackHit, DamageSource, Fighter, FighterStep, ModifierProvider, Projectile, StatModifiers,
};
use crate::error::SimulationError;
use crate::movement::{Mover, NavigationArea};
use crate::perception::{target_view, SpatialIndex, TargetQuery};
use crate::progression::{BaseStats, Progression};
use crate::shared::{AnimationCue, AnimationCues};
use crate::{log, log_error};

/// Система: Fighter без Mover'а отключается (Sense set)
pub fn validate_fighters(
    mut commands: Commands,
    fighters: Query<(Entity, Has<Mover>), (Added<Fighter>, Without<ControlDisabled>)>,
) {
    for (entity, has_mover) in fighters.iter() {
        if has_mover {
            continue;
        }

        let error = SimulationError::MissingCollaborator {
            entity,
            component: "Fighter",
            missing: "Mover".into(),
        };
        log_error(&format!("❌ {}", error));
        commands.entity(entity).insert(ControlDisabled {
            reason: error.to_string(),
        });
    }
}

/// Система: боевой тик Fighter'ов (Act set)
///
/// Позиции целей - из SpatialIndex (snapshot начала тика).
pub fn fighter_tick(
    mut commands: Commands,
    mut fighters: Query<
        (
            Entity,
            &mut Fighter,
            Option<&mut Mover>,
            &mut AnimationCues,
            &mut Transform,
            Option<&StatModifiers>,
            Option<&BaseStats>,
            Option<&Health>,
        ),
        Without<ControlDisabled>,
    >,
    targets: TargetQuery,
    spatial: Res<SpatialIndex>,
    navigation: Res<NavigationArea>,
    progression: Res<Progression>,
    mut hits: EventWriter<AttackHit>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut fighter, mut mover, mut cues, mut transform, modifiers, base_stats, health) in fighters.iter_mut()
    {
        if health.is_some_and(Health::is_dead) {
            continue;
        }

        let origin = transform.translation;
        let step = fighter.plan(origin, delta, |target| target_view(&targets, &spatial, target));

        match step {
            FighterStep::Idle => {}

            FighterStep::TargetLost { target } => {
                let mut slots = ActionSlots {
                    mover: mover.as_deref_mut(),
                    fighter: Some(&mut *fighter),
                    cues: &mut *cues,
                };
                slots.cancel_fighter();
                log(&format!("🎯 {:?} lost target {:?}", entity, target));
            }

            FighterStep::Pursue { destination, .. } => {
                if let Some(mover) = mover.as_deref_mut() {
                    mover.move_to(origin, destination, navigation.as_ref());
                }
            }

            FighterStep::Hold { .. } => {
                if let Some(mover) = mover.as_deref_mut() {
                    mover.cancel(&mut cues);
                }
            }

            FighterStep::Strike {
                target,
                target_position,
            } => {
                if let Some(mover) = mover.as_deref_mut() {
                    mover.cancel(&mut cues);
                }

                let facing = Vec3::new(target_position.x, origin.y, target_position.z);
                if facing.distance_squared(origin) > f32::EPSILON {
                    transform.look_at(facing, Vec3::Y);
                }
                cues.push(AnimationCue::Attack);

                let weapon = fighter.weapon();
                let level_stats = base_stats.map(|stats| stats.level_stats(&progression));
                let mut providers: Vec<&dyn ModifierProvider> = Vec::with_capacity(3);
                providers.push(weapon);
                if let Some(modifiers) = modifiers {
                    providers.push(modifiers);
                }
                if let Some(level_stats) = &level_stats {
                    providers.push(level_stats);
                }
                let damage = calculate_damage(weapon.base_damage, &providers);

                match &weapon.projectile {
                    Some(spec) => {
                        // Снаряд летит в плоскости origin'ов (высоту рисует host)
                        commands.spawn((
                            Projectile::launch(
                                entity,
                                target,
                                fighter.target_faction,
                                damage,
                                spec,
                                origin,
                                target_position,
                            ),
                            Transform::from_translation(origin),
                        ));
                        log(&format!("🏹 {:?} fired at {:?} ({:.1} dmg)", entity, target, damage));
                    }
                    None => {
                        hits.write(AttackHit {
                            attacker: entity,
                            target,
                            damage,
                            source: DamageSource::Melee,
                        });
                        log(&format!("⚔️ {:?} hit {:?} ({:.1} dmg)", entity, target, damage));
                    }
                }
            }
        }
    }
}
