//! Weapon конфигурации и каталог
//!
//! WeaponConfiguration - неизменяемые данные оружия (range, cooldown, damage,
//! projectile). Fighter держит копию текущей конфигурации. Каталог грузится
//! из TOML (формат: массив `[[weapon]]`).

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Стабильный id оружия (ключ каталога и save-формата)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponId(pub String);

impl WeaponId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WeaponId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    #[default]
    Right,
    Left,
}

/// Кого может задеть снаряд
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileContact {
    /// Только назначенную цель
    #[default]
    TargetOnly,
    /// Любого живого противника (фракция цели)
    AnyOpposing,
}

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct ProjectileSpec {
    /// м/с
    pub speed: f32,
    /// Доворачивает на цель каждый тик
    #[serde(default)]
    pub homing: bool,
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f32,
    /// Секунды до самоуничтожения
    #[serde(default = "default_lifetime")]
    pub lifetime: f32,
    #[serde(default)]
    pub contact: ProjectileContact,
}

fn default_hit_radius() -> f32 {
    0.5
}

fn default_lifetime() -> f32 {
    5.0
}

/// Неизменяемая конфигурация оружия
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct WeaponConfiguration {
    pub id: WeaponId,
    /// Дистанция атаки (включительно)
    pub range: f32,
    /// Cooldown между атаками (секунды)
    pub time_between_attacks: f32,
    pub base_damage: f32,
    /// +N% к урону (0.1 = +10%)
    #[serde(default)]
    pub damage_percentage_bonus: f32,
    /// Visual prefab (None = без инстанса, например кулаки)
    #[serde(default)]
    pub prefab_path: Option<String>,
    #[serde(default)]
    pub hand: Hand,
    /// Some → атака выпускает снаряд вместо мгновенного удара
    #[serde(default)]
    pub projectile: Option<ProjectileSpec>,
}

impl WeaponConfiguration {
    pub fn has_projectile(&self) -> bool {
        self.projectile.is_some()
    }

    pub fn unarmed() -> Self {
        Self {
            id: WeaponId::from("unarmed"),
            range: 2.0,
            time_between_attacks: 1.0,
            base_damage: 5.0,
            damage_percentage_bonus: 0.0,
            prefab_path: None,
            hand: Hand::Right,
            projectile: None,
        }
    }

    pub fn sword() -> Self {
        Self {
            id: WeaponId::from("sword"),
            range: 2.0,
            time_between_attacks: 1.0,
            base_damage: 10.0,
            damage_percentage_bonus: 0.0,
            prefab_path: Some("res://weapons/sword.tscn".into()),
            hand: Hand::Right,
            projectile: None,
        }
    }

    pub fn bow() -> Self {
        Self {
            id: WeaponId::from("bow"),
            range: 20.0,
            time_between_attacks: 1.5,
            base_damage: 8.0,
            damage_percentage_bonus: 0.1,
            prefab_path: Some("res://weapons/bow.tscn".into()),
            hand: Hand::Left,
            projectile: Some(ProjectileSpec {
                speed: 20.0,
                homing: false,
                hit_radius: default_hit_radius(),
                lifetime: default_lifetime(),
                contact: ProjectileContact::TargetOnly,
            }),
        }
    }
}

impl Default for WeaponConfiguration {
    fn default() -> Self {
        Self::unarmed()
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    weapon: Vec<WeaponConfiguration>,
}

/// Каталог оружия по WeaponId
#[derive(Resource, Debug, Clone)]
pub struct WeaponCatalog {
    weapons: HashMap<WeaponId, WeaponConfiguration>,
}

impl Default for WeaponCatalog {
    fn default() -> Self {
        Self::empty()
            .with(WeaponConfiguration::unarmed())
            .with(WeaponConfiguration::sword())
            .with(WeaponConfiguration::bow())
    }
}

impl WeaponCatalog {
    pub fn empty() -> Self {
        Self {
            weapons: HashMap::new(),
        }
    }

    pub fn with(mut self, weapon: WeaponConfiguration) -> Self {
        self.insert(weapon);
        self
    }

    pub fn insert(&mut self, weapon: WeaponConfiguration) {
        self.weapons.insert(weapon.id.clone(), weapon);
    }

    pub fn get(&self, id: &WeaponId) -> Option<&WeaponConfiguration> {
        self.weapons.get(id)
    }

    pub fn require(&self, id: &WeaponId) -> Result<&WeaponConfiguration> {
        self.get(id).ok_or_else(|| SimulationError::UnknownWeapon(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Встроенный каталог + оружие из TOML (одинаковый id перезаписывает)
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self::default();
        for weapon in file.weapon {
            catalog.insert(weapon);
        }
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
