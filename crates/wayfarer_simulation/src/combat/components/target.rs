//! CombatTarget - то, что можно атаковать.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actor::Health;
use crate::perception::PerceptionLayers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Player,
    #[default]
    Enemy,
}

impl Faction {
    pub fn opposing(self) -> Faction {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Атакуемая entity
///
/// Атаковать можно только пока Health жив.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Health, PerceptionLayers)]
pub struct CombatTarget {
    pub faction: Faction,
}

impl CombatTarget {
    pub fn new(faction: Faction) -> Self {
        Self { faction }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TargetHealth {
    Alive,
    Dead,
    /// Нет Health компонента
    Missing,
}

impl TargetHealth {
    pub fn from_health(health: Option<&Health>) -> Self {
        match health {
            Some(health) if health.is_dead() => TargetHealth::Dead,
            Some(_) => TargetHealth::Alive,
            None => TargetHealth::Missing,
        }
    }
}

/// Snapshot цели на момент решения (позиция - начало тика)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub entity: Entity,
    pub faction: Faction,
    pub position: Vec3,
    pub health: TargetHealth,
}

impl TargetView {
    pub fn is_attackable(&self) -> bool {
        self.health == TargetHealth::Alive
    }

    pub fn has_health(&self) -> bool {
        self.health != TargetHealth::Missing
    }
}
