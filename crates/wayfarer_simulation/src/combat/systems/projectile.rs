//! Projectile flight + contact

use bevy::prelude::*;

use crate::combat::{AttackHit, DamageSource, Projectile, TargetHealth};
use crate::log;
use crate::perception::{target_status, LayerMask, SpatialBackend, SpatialIndex, TargetQuery};

/// Система: полёт снарядов (Resolve set, до apply_attack_hits)
///
/// Контакт: первый по ходу полёта подходящий CombatTarget в hit_radius
/// от отрезка start → position.
/// Снаряд исчезает при контакте или по истечении lifetime.
pub fn advance_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    targets: TargetQuery,
    spatial: Res<SpatialIndex>,
    mut hits: EventWriter<AttackHit>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut projectile, mut transform) in projectiles.iter_mut() {
        let start = transform.translation;
        let target_position = spatial.position_of(projectile.target);
        let position = projectile.advance(start, target_position, delta);
        transform.translation = position;

        // Swept contact: весь отрезок полёта за тик (быстрый снаряд не проскакивает цель)
        let midpoint = start.lerp(position, 0.5);
        let search_radius = start.distance(position) * 0.5 + projectile.hit_radius;
        let mut candidates: Vec<_> = spatial
            .overlap_sphere(midpoint, search_radius, LayerMask::CHARACTERS)
            .into_iter()
            .filter(|hit| distance_to_segment(hit.position, start, position) <= projectile.hit_radius)
            .collect();
        candidates.sort_by(|a, b| {
            a.position
                .distance_squared(start)
                .total_cmp(&b.position.distance_squared(start))
        });

        let contact = candidates.into_iter().find(|hit| {
            target_status(&targets, hit.entity).is_some_and(|(faction, health)| {
                projectile.accepts(hit.entity, faction, health == TargetHealth::Alive)
            })
        });

        if let Some(hit) = contact {
            hits.write(AttackHit {
                attacker: projectile.shooter,
                target: hit.entity,
                damage: projectile.damage,
                source: DamageSource::Projectile,
            });
            log(&format!("🎯 Projectile from {:?} hit {:?}", projectile.shooter, hit.entity));
            commands.entity(entity).despawn();
            continue;
        }

        if projectile.is_expired() {
            commands.entity(entity).despawn();
        }
    }
}

/// Расстояние от точки до отрезка [start, end]
pub fn distance_to_segment(point: Vec3, start: Vec3, end: Vec3) -> f32 {
    let segment = end - start;
    let length_squared = segment.length_squared();
    if length_squared <= f32::EPSILON {
        return point.distance(start);
    }

    let t = ((point - start).dot(segment) / length_squared).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}
