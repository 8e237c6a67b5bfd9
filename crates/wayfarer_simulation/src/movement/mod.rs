//! Movement domain - кинематическое перемещение агентов
//!
//! Содержит:
//! - Mover (destination, скорость, stopping distance, max path length)
//! - ForwardSpeed (локальная forward скорость для анимации)
//! - NavigationBackend + NavigationArea (достижимость и длина пути)
//! - integrate_movers (шаг интеграции в Move set)
//!
//! Pathfinding не моделируется: путь = прямая, NavigationArea отвечает
//! только "можно ли туда попасть" и "сколько идти".

use bevy::prelude::*;

pub mod components;
pub mod navigation;
pub mod systems;

// Re-export all components
pub use components::*;
pub use navigation::*;
pub use systems::*;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationArea>().add_systems(
            FixedUpdate,
            integrate_movers.in_set(crate::SimulationSet::Move),
        );
    }
}
