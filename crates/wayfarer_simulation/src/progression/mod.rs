//! Progression domain - класс, уровень, опыт
//!
//! **Events → Systems flow:**
//! - EntityDied (killer) → award_experience: опыт убийце
//! - Changed<Experience> → update_levels: новый уровень, max Health, LeveledUp
//! - fighter_tick берёт уровневый бонус урона через LevelStats

use bevy::prelude::*;

pub mod components;
pub mod systems;
pub mod table;

pub use components::*;
pub use systems::*;
pub use table::*;

/// Progression plugin
pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        use crate::SimulationSet;

        app.init_resource::<Progression>()
            .add_event::<LeveledUp>()
            .add_systems(
                FixedUpdate,
                (award_experience, update_levels)
                    .chain()
                    .in_set(SimulationSet::Resolve)
                    .after(crate::combat::handle_deaths)
                    .after(crate::equipment::collect_pickups),
            );
    }
}
