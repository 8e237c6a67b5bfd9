//! Movement systems

use bevy::prelude::*;

use super::components::{ForwardSpeed, Mover};
use crate::actor::Health;

/// Интеграция позиции по Mover (Move set)
///
/// - Мёртвые агенты останавливаются
/// - Агент поворачивается лицом по горизонтальной скорости
/// - ForwardSpeed = проекция velocity на forward
pub fn integrate_movers(
    mut movers: Query<(&mut Mover, &mut Transform, &mut ForwardSpeed, Option<&Health>)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut mover, mut transform, mut forward_speed, health) in movers.iter_mut() {
        if health.is_some_and(Health::is_dead) {
            if mover.is_moving() {
                mover.halt();
            }
            forward_speed.0 = 0.0;
            continue;
        }

        let position = mover.step(transform.translation, delta);
        transform.translation = position;

        let velocity = mover.velocity();
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        if horizontal.length_squared() > f32::EPSILON {
            transform.look_to(horizontal, Vec3::Y);
        }

        let forward = velocity.dot(transform.forward().as_vec3());
        if forward_speed.0 != forward {
            forward_speed.0 = forward;
        }
    }
}
