//! Alert propagation (крик тревоги → соседние AI)

use bevy::prelude::*;

use crate::actor::{ControlDisabled, Health};
use crate::ai::{AIConfig, AIController, AlertShout};
use crate::combat::CombatTarget;
use crate::log;
use crate::perception::{LayerMask, SpatialBackend, SpatialIndex};

/// Система: доставить AlertShout соседям (Decide set, после ai_decision_tick)
///
/// Получатель: любой другой живой AIController в радиусе той же фракции.
/// Эффект виден со следующего тика.
pub fn deliver_alerts(
    mut shouts: EventReader<AlertShout>,
    spatial: Res<SpatialIndex>,
    mut controllers: Query<
        (&mut AIController, &AIConfig, Option<&CombatTarget>, Option<&Health>),
        Without<ControlDisabled>,
    >,
) {
    for shout in shouts.read() {
        for hit in spatial.overlap_sphere(shout.origin, shout.radius, LayerMask::ALL) {
            if hit.entity == shout.source {
                continue;
            }

            let Ok((mut controller, config, combat_target, health)) = controllers.get_mut(hit.entity) else {
                continue;
            };
            if health.is_some_and(Health::is_dead) {
                continue;
            }

            let same_side = match (shout.faction, combat_target) {
                (Some(faction), Some(target)) => target.faction == faction,
                _ => true,
            };
            if !same_side {
                continue;
            }

            if controller.receive_alert(config, shout.chase_extension) {
                log(&format!("📢 {:?} alerted by {:?}", hit.entity, shout.source));
            }
        }
    }
}
