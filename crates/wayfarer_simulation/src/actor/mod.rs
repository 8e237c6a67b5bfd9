//! Actor domain - базовые компоненты и сборка агентов
//!
//! Содержит:
//! - Health (здоровье, f32)
//! - ControlDisabled (маркер отключённого контроллера)
//! - AgentBlueprint (сборка агента из компонентов + валидация collaborator'ов)

pub mod components;
pub mod spawn;

// Re-export all components
pub use components::*;
pub use spawn::*;
