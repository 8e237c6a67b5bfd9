//! Конфигурация симуляции (tick rate, seed, cooldown policy)
//!
//! Per-agent параметры живут в config-компонентах (`AIConfig`),
//! оружие - в `WeaponCatalog`. Здесь только глобальные настройки.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::CooldownReset;
use crate::error::Result;

/// Глобальные настройки симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Частота FixedUpdate (Hz)
    pub tick_hz: f64,
    /// Seed для DeterministicRng
    pub seed: u64,
    /// Политика сброса attack cooldown для новых Fighter
    pub cooldown_reset: CooldownReset,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            cooldown_reset: CooldownReset::Zero,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Длительность одного тика (секунды)
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_hz
    }
}
