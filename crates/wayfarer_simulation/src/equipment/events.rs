//! Equipment system events
//!
//! **Weapon lifecycle:**
//! - `EquipWeaponRequest` → сменить оружие Fighter'а (старый Attachment despawn, новый spawn)
//! - `weapon: None` → no-op (как EquipWeapon(null))

use bevy::prelude::*;

use crate::combat::WeaponId;

/// Equip weapon по id каталога
///
/// # Flow
/// 1. PlayerCommand::Equip / WeaponPickup / restore_world → EquipWeaponRequest
/// 2. process_equip_requests → Fighter::equip_weapon
/// 3. Старый инстанс despawn, новый Attachment как child entity
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EquipWeaponRequest {
    pub entity: Entity,
    pub weapon: Option<WeaponId>,
}
