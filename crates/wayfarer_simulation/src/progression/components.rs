//! Компоненты прогрессии: BaseStats (класс + уровень), Experience

use bevy::prelude::*;

use super::table::{CharacterClass, Progression};
use crate::combat::{Modifier, ModifierProvider, ModifierTotals, Stat};
use crate::log_warning;

/// Класс и уровень персонажа
///
/// Уровень выводится из Experience (если есть), иначе = starting_level.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BaseStats {
    pub class: CharacterClass,
    pub starting_level: u32,
    level: u32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new(CharacterClass::default(), 1)
    }
}

impl BaseStats {
    pub fn new(class: CharacterClass, starting_level: u32) -> Self {
        let starting_level = starting_level.max(1);
        Self {
            class,
            starting_level,
            level: starting_level,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    /// Значение стата на текущем уровне (нет формулы → 0 + warning)
    pub fn stat_value(&self, stat: Stat, progression: &Progression) -> f32 {
        progression.value(self.class, stat, self.level).unwrap_or_else(|error| {
            log_warning(&format!("⚠️ {}", error));
            0.0
        })
    }

    /// Модификаторы уровня для calculate_stat
    pub fn level_stats<'a>(&'a self, progression: &'a Progression) -> LevelStats<'a> {
        LevelStats {
            stats: self,
            progression,
        }
    }
}

/// ModifierProvider: уровневый бонус к урону (Additive)
pub struct LevelStats<'a> {
    stats: &'a BaseStats,
    progression: &'a Progression,
}

impl ModifierProvider for LevelStats<'_> {
    fn collect_modifiers(&self, stat: Stat, totals: &mut ModifierTotals) {
        if stat != Stat::Damage {
            return;
        }
        let bonus = self.stats.stat_value(Stat::Damage, self.progression);
        if bonus != 0.0 {
            totals.add(Modifier::Additive(bonus));
        }
    }
}

/// Накопленный опыт (начисляется за убийства)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
#[require(BaseStats)]
pub struct Experience {
    value: f32,
}

impl Experience {
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn gain(&mut self, amount: f32) {
        self.value += amount.max(0.0);
    }

    /// Восстановление из save
    pub fn restore(&mut self, value: f32) {
        self.value = value.max(0.0);
    }
}
