//! Таблица прогрессии: (класс, стат) → формула роста по уровню
//!
//! Формула (рекуррентная):
//! - level ≤ 1 → starting_value
//! - иначе v(n) = v(n-1) × (1 + percentage_added) + absolute_added
//!
//! Таблица грузится из TOML (формат: массив `[[entry]]`), поверх встроенной.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::Stat;
use crate::error::{Result, SimulationError};

/// Максимальный уровень персонажа
pub const MAX_LEVEL: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    #[default]
    Player,
    Guard,
    Archer,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionFormula {
    pub starting_value: f32,
    /// Доля от предыдущего уровня: 0.1 = +10%
    pub percentage_added: f32,
    pub absolute_added: f32,
}

impl ProgressionFormula {
    pub fn new(starting_value: f32, percentage_added: f32, absolute_added: f32) -> Self {
        Self {
            starting_value,
            percentage_added,
            absolute_added,
        }
    }

    pub fn calculate(&self, level: u32) -> f32 {
        (2..=level.min(MAX_LEVEL)).fold(self.starting_value, |value, _| {
            value + value * self.percentage_added + self.absolute_added
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ProgressionEntry {
    class: CharacterClass,
    stat: Stat,
    #[serde(flatten)]
    formula: ProgressionFormula,
}

#[derive(Debug, Deserialize)]
struct ProgressionFile {
    #[serde(default)]
    entry: Vec<ProgressionEntry>,
}

/// Resource: формулы прогрессии всех классов
#[derive(Resource, Debug, Clone)]
pub struct Progression {
    formulas: HashMap<(CharacterClass, Stat), ProgressionFormula>,
}

impl Default for Progression {
    fn default() -> Self {
        use CharacterClass::*;

        // Damage - бонус к урону оружия (1-й уровень без бонуса)
        Self::empty()
            .with(Player, Stat::Health, ProgressionFormula::new(100.0, 0.0, 20.0))
            .with(Player, Stat::Damage, ProgressionFormula::new(0.0, 0.0, 2.0))
            .with(Player, Stat::ExperienceToLevel, ProgressionFormula::new(100.0, 0.5, 0.0))
            .with(Player, Stat::ExperienceReward, ProgressionFormula::new(10.0, 0.0, 10.0))
            .with(Guard, Stat::Health, ProgressionFormula::new(100.0, 0.0, 15.0))
            .with(Guard, Stat::Damage, ProgressionFormula::new(0.0, 0.0, 1.5))
            .with(Guard, Stat::ExperienceToLevel, ProgressionFormula::new(100.0, 0.5, 0.0))
            .with(Guard, Stat::ExperienceReward, ProgressionFormula::new(50.0, 0.0, 25.0))
            .with(Archer, Stat::Health, ProgressionFormula::new(80.0, 0.0, 10.0))
            .with(Archer, Stat::Damage, ProgressionFormula::new(0.0, 0.1, 1.0))
            .with(Archer, Stat::ExperienceToLevel, ProgressionFormula::new(100.0, 0.5, 0.0))
            .with(Archer, Stat::ExperienceReward, ProgressionFormula::new(60.0, 0.0, 30.0))
    }
}

impl Progression {
    pub fn empty() -> Self {
        Self {
            formulas: HashMap::new(),
        }
    }

    pub fn with(mut self, class: CharacterClass, stat: Stat, formula: ProgressionFormula) -> Self {
        self.formulas.insert((class, stat), formula);
        self
    }

    pub fn require(&self, class: CharacterClass, stat: Stat) -> Result<&ProgressionFormula> {
        self.formulas
            .get(&(class, stat))
            .ok_or(SimulationError::UnknownProgression { class, stat })
    }

    /// Значение стата на уровне
    pub fn value(&self, class: CharacterClass, stat: Stat, level: u32) -> Result<f32> {
        Ok(self.require(class, stat)?.calculate(level))
    }

    /// Уровень для накопленного опыта: растёт, пока порог текущего уровня < опыта
    ///
    /// Класс без ExperienceToLevel остаётся на starting_level.
    pub fn level_for(&self, class: CharacterClass, starting_level: u32, experience: f32) -> Result<u32> {
        let threshold = self.require(class, Stat::ExperienceToLevel)?;
        let mut level = starting_level.max(1);
        while level < MAX_LEVEL && threshold.calculate(level) < experience {
            level += 1;
        }
        Ok(level)
    }

    /// Встроенная таблица + записи из TOML (одинаковый ключ перезаписывает)
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ProgressionFile = toml::from_str(source)?;
        Ok(file
            .entry
            .into_iter()
            .fold(Self::default(), |table, entry| table.with(entry.class, entry.stat, entry.formula)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
