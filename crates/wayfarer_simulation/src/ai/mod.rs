//! AI decision-making module
//!
//! Приоритетный контроллер (Attack > Suspicious > Patrol), пересчёт каждый тик.
//! Тревога распространяется через AlertShout на соседей той же фракции.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use systems::*;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. validate_ai_controllers (Sense) - home + проверка Mover
/// 2. ai_decision_tick (Decide) - решение каждого агента
/// 3. deliver_alerts (Decide) - тревога соседям
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        use crate::SimulationSet;

        app.add_event::<AlertShout>()
            .add_systems(FixedUpdate, validate_ai_controllers.in_set(SimulationSet::Sense))
            .add_systems(
                FixedUpdate,
                (ai_decision_tick, deliver_alerts)
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(SimulationSet::Decide),
            );
    }
}
