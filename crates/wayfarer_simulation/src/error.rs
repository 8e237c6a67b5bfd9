//! Ошибки симуляции
//!
//! Gameplay условия (невалидная цель, пустой patrol path, недостижимая точка)
//! НЕ являются ошибками - они кодируются bool / no-op. Сюда попадает только
//! то, что нужно сообщить наружу: сломанная сборка агента, конфиг, save.

use bevy::prelude::Entity;
use thiserror::Error;

use crate::combat::Stat;
use crate::progression::CharacterClass;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("{entity:?} requires a(n) {missing} in order to work ({component} disabled)")]
    MissingCollaborator {
        entity: Entity,
        component: &'static str,
        missing: String,
    },

    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),

    #[error("No progression for {class:?} / {stat:?}")]
    UnknownProgression { class: CharacterClass, stat: Stat },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Save format error: {0}")]
    SaveFormat(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
