//! Equipment system implementations
//!
//! - `process_equip_requests` - смена оружия Fighter'а
//! - `spawn_weapon_instance` - Attachment child для визуального инстанса

use bevy::prelude::*;

use crate::combat::{EquipOutcome, Fighter, WeaponCatalog, WeaponConfiguration};
use crate::equipment::events::EquipWeaponRequest;
use crate::shared::Attachment;
use crate::{log, log_warning};

/// Spawn визуального инстанса оружия (None если у оружия нет prefab'а)
pub fn spawn_weapon_instance(commands: &mut Commands, owner: Entity, weapon: &WeaponConfiguration) -> Option<Entity> {
    let prefab_path = weapon.prefab_path.as_ref()?;
    let instance = commands
        .spawn((
            Attachment::weapon(weapon.id.clone(), prefab_path.clone(), weapon.hand),
            ChildOf(owner),
        ))
        .id();
    Some(instance)
}

/// Process equip weapon requests (Act set, до fighter_tick)
pub fn process_equip_requests(
    mut commands: Commands,
    mut requests: EventReader<EquipWeaponRequest>,
    mut fighters: Query<&mut Fighter>,
    catalog: Res<WeaponCatalog>,
) {
    for request in requests.read() {
        let Ok(mut fighter) = fighters.get_mut(request.entity) else {
            log_warning(&format!("Entity {:?} has no Fighter to equip", request.entity));
            continue;
        };

        let weapon = request.weapon.as_ref().and_then(|id| match catalog.require(id) {
            Ok(weapon) => Some(weapon),
            Err(error) => {
                log_warning(&format!("⚠️ {:?}: {}", request.entity, error));
                None
            }
        });

        let EquipOutcome::Equipped { replaced_instance } = fighter.equip_weapon(weapon) else {
            continue;
        };

        if let Some(old_instance) = replaced_instance {
            if let Ok(mut entity_commands) = commands.get_entity(old_instance) {
                entity_commands.despawn();
            }
        }

        let equipped = fighter.weapon().clone();
        if let Some(instance) = spawn_weapon_instance(&mut commands, request.entity, &equipped) {
            fighter.attach_instance(instance);
        }

        log(&format!("✅ {:?} equipped {}", request.entity, equipped.id));
    }
}
