//! Player domain - управление игроком через PlayerCommand
//!
//! Input слой host-движка превращает клики в PlayerCommand,
//! симуляция выполняет их через тот же ActionScheduler, что и AI.

use bevy::prelude::*;

pub mod commands;
pub mod player;

pub use commands::*;
pub use player::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        use crate::SimulationSet;

        app.add_event::<PlayerCommand>()
            .add_systems(FixedUpdate, validate_players.in_set(SimulationSet::Sense))
            .add_systems(FixedUpdate, handle_player_commands.in_set(SimulationSet::Decide));
    }
}
