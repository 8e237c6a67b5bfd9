//! Damage calculation и stat модификаторы
//!
//! Формула:
//! - final = (base + Σadditive) × (1 + Σpercentage)
//! - percentage хранится долями: 0.1 = +10%
//!
//! Провайдеры модификаторов: текущее оружие (damage_percentage_bonus),
//! StatModifiers компонент (баффы/экипировка) и уровень (LevelStats).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::weapon::WeaponConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Damage,
    Health,
    /// Опыт, который получает убийца
    ExperienceReward,
    /// Порог опыта для перехода на следующий уровень
    ExperienceToLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Additive(f32),
    Percentage(f32),
}

/// Накопленные модификаторы одного стата
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModifierTotals {
    pub additive: f32,
    pub percentage: f32,
}

impl ModifierTotals {
    pub fn add(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Additive(value) => self.additive += value,
            Modifier::Percentage(value) => self.percentage += value,
        }
    }

    pub fn apply(&self, base: f32) -> f32 {
        (base + self.additive) * (1.0 + self.percentage)
    }
}

/// Источник модификаторов стата
pub trait ModifierProvider {
    fn collect_modifiers(&self, stat: Stat, totals: &mut ModifierTotals);
}

impl ModifierProvider for WeaponConfiguration {
    fn collect_modifiers(&self, stat: Stat, totals: &mut ModifierTotals) {
        if stat == Stat::Damage && self.damage_percentage_bonus != 0.0 {
            totals.add(Modifier::Percentage(self.damage_percentage_bonus));
        }
    }
}

/// Модификаторы агента (баффы, экипировка)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct StatModifiers {
    pub entries: Vec<(Stat, Modifier)>,
}

impl StatModifiers {
    pub fn with(mut self, stat: Stat, modifier: Modifier) -> Self {
        self.entries.push((stat, modifier));
        self
    }
}

impl ModifierProvider for StatModifiers {
    fn collect_modifiers(&self, stat: Stat, totals: &mut ModifierTotals) {
        self.entries
            .iter()
            .filter(|(entry_stat, _)| *entry_stat == stat)
            .for_each(|(_, modifier)| totals.add(*modifier));
    }
}

pub fn calculate_stat(base: f32, stat: Stat, providers: &[&dyn ModifierProvider]) -> f32 {
    let mut totals = ModifierTotals::default();
    for provider in providers {
        provider.collect_modifiers(stat, &mut totals);
    }
    totals.apply(base)
}

/// Итоговый урон атаки
pub fn calculate_damage(base_damage: f32, providers: &[&dyn ModifierProvider]) -> f32 {
    calculate_stat(base_damage, Stat::Damage, providers)
}
