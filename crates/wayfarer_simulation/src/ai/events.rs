//! AI Events

use bevy::prelude::*;

use crate::combat::Faction;

/// Крик тревоги: агент атакует, соседи в радиусе настораживаются
///
/// Генерируется: ai_decision_tick (каждый тик в Attack)
/// Обрабатывается: deliver_alerts (сразу после решений, тот же тик)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AlertShout {
    pub source: Entity,
    /// Фракция кричащего (None → будим всех AI в радиусе)
    pub faction: Option<Faction>,
    pub origin: Vec3,
    pub radius: f32,
    pub chase_extension: f32,
}
