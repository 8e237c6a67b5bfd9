//! Player control marker component + команды игрока
//!
//! Отмечает entity которым управляет игрок (в отличие от AI).

use bevy::prelude::*;

use crate::combat::WeaponId;

/// Marker component для player-controlled entity
///
/// Акторы БЕЗ этого компонента управляются AI systems.
/// Акторы С этим компонентом получают PlayerCommand.
///
/// # Архитектурная заметка
/// - AI systems используют `Without<Player>` filter (пропускают player-controlled акторов)
/// - Command systems используют `With<Player>` filter (только player-controlled акторы)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Намерение игрока (клик, хоткей)
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerIntent {
    /// Атаковать цель (если можно)
    Attack(Entity),
    /// Идти в точку
    MoveTo(Vec3),
    /// Сменить оружие
    Equip(WeaponId),
    /// Отменить текущее действие
    Stop,
}

/// Event: команда от input слоя host-движка
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayerCommand {
    pub actor: Entity,
    pub intent: PlayerIntent,
}

impl PlayerCommand {
    pub fn new(actor: Entity, intent: PlayerIntent) -> Self {
        Self { actor, intent }
    }
}
