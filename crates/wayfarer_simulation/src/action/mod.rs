//! Action domain - эксклюзивное выполнение действий агента
//!
//! Содержит:
//! - Action (Move / Attack) - единица поведения, владеет слотом scheduler'а
//! - ActionScheduler - per-agent арбитр, держит "current action"
//! - AgentActions - связка scheduler + Mover + Fighter одного агента
//!
//! Отмена всегда синхронная: `start_action` вызывает `cancel()` уходящего
//! действия ДО установки нового. Никаких отложенных отмен через события.

pub mod agent;
pub mod scheduler;


pub use agent::*;
pub use scheduler::*;
