//! Weapon pickups: подбор оружия/лечения игроком + respawn таймер

use bevy::prelude::*;

use crate::actor::Health;
use crate::combat::WeaponId;
use crate::equipment::events::EquipWeaponRequest;
use crate::log;
use crate::player::Player;

/// Подбираемый предмет на земле
///
/// Игрок в radius → (опционально) оружие + лечение, затем предмет скрыт
/// на respawn_time секунд.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponPickup {
    pub weapon: Option<WeaponId>,
    pub health_to_restore: f32,
    pub respawn_time: f32,
    pub radius: f32,
    hidden_for: f32,
}

impl WeaponPickup {
    pub fn new(weapon: Option<WeaponId>, health_to_restore: f32, respawn_time: f32) -> Self {
        Self {
            weapon,
            health_to_restore,
            respawn_time,
            radius: 1.0,
            hidden_for: 0.0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn is_available(&self) -> bool {
        self.hidden_for <= 0.0
    }

    fn hide(&mut self) {
        self.hidden_for = self.respawn_time;
    }
}

/// Система: подбор + respawn (Resolve set)
pub fn collect_pickups(
    mut pickups: Query<(Entity, &mut WeaponPickup, &Transform)>,
    mut players: Query<(Entity, &Transform, &mut Health), With<Player>>,
    mut equip_requests: EventWriter<EquipWeaponRequest>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (pickup_entity, mut pickup, pickup_transform) in pickups.iter_mut() {
        if !pickup.is_available() {
            pickup.hidden_for -= delta;
            continue;
        }

        let origin = pickup_transform.translation;
        let collector = players.iter_mut().find(|(_, transform, health)| {
            health.is_alive() && transform.translation.distance(origin) <= pickup.radius
        });
        let Some((player, _, mut health)) = collector else {
            continue;
        };

        if let Some(weapon) = &pickup.weapon {
            equip_requests.write(EquipWeaponRequest {
                entity: player,
                weapon: Some(weapon.clone()),
            });
        }
        if pickup.health_to_restore > 0.0 {
            health.heal(pickup.health_to_restore);
        }

        pickup.hide();
        log(&format!("🎁 {:?} collected pickup {:?}", player, pickup_entity));
    }
}
