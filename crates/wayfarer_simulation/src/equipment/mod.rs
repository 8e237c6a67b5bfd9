//! Equipment module - смена оружия и подбираемые предметы
//!
//! **Events → Systems flow:**
//! - PlayerCommand / WeaponPickup / restore_world пишут EquipWeaponRequest
//! - process_equip_requests меняет WeaponConfiguration у Fighter'а
//! - Attachment child entity = визуальный инстанс (host-движок рисует)

use bevy::prelude::*;

pub mod events;
pub mod pickup;
pub mod systems;

// Re-exports
pub use events::*;
pub use pickup::*;
pub use systems::*;

/// Equipment plugin (lifecycle management)
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        use crate::SimulationSet;

        app
            // Events
            .add_event::<EquipWeaponRequest>()
            // Смена оружия до боевого тика
            .add_systems(
                FixedUpdate,
                process_equip_requests
                    .in_set(SimulationSet::Act)
                    .before(crate::combat::fighter_tick),
            )
            .add_systems(
                FixedUpdate,
                collect_pickups
                    .in_set(SimulationSet::Resolve)
                    .after(crate::combat::handle_deaths),
            );
    }
}
