//! AgentBlueprint - сборка агента из компонентов.
//!
//! Один вызов `spawn` даёт полностью собранного агента: Transform, Health,
//! CombatTarget, Mover, Fighter (+ Attachment оружия), контроллер, патруль.
//! Оружие берётся из WeaponCatalog мира (если ресурса нет - встроенный).

use bevy::prelude::*;

use crate::ai::{AIConfig, AIController, PatrolPath};
use crate::combat::{
    calculate_stat, CombatTarget, CooldownReset, Faction, Fighter, Stat, StatModifiers, WeaponCatalog,
    WeaponConfiguration, WeaponId,
};
use crate::config::SimulationConfig;
use crate::log_warning;
use crate::movement::Mover;
use crate::player::Player;
use crate::progression::{BaseStats, CharacterClass, Experience, Progression};
use crate::save::SaveId;
use crate::shared::Attachment;

use super::components::Health;

/// Кто управляет агентом
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Player,
    Ai(AIConfig),
    /// Только цель (манекен, ящик)
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FighterBlueprint {
    pub target_faction: Faction,
    pub weapon: WeaponId,
    /// None → SimulationConfig::cooldown_reset
    pub cooldown_reset: Option<CooldownReset>,
}

#[derive(Debug, Clone)]
pub struct AgentBlueprint {
    pub name: Option<String>,
    pub position: Vec3,
    pub faction: Faction,
    pub max_health: f32,
    /// None → агент без Mover (контроллер будет отключён валидацией)
    pub move_speed: Option<f32>,
    pub fighter: Option<FighterBlueprint>,
    pub control: ControlKind,
    pub patrol: Option<PatrolPath>,
    pub modifiers: StatModifiers,
    /// Класс + стартовый уровень: max Health берётся из Progression
    pub progression: Option<BaseStats>,
    pub gains_experience: bool,
    pub save_id: Option<String>,
}

impl AgentBlueprint {
    fn base(position: Vec3, faction: Faction) -> Self {
        Self {
            name: None,
            position,
            faction,
            max_health: 100.0,
            move_speed: Some(2.0),
            fighter: None,
            control: ControlKind::None,
            patrol: None,
            modifiers: StatModifiers::default(),
            progression: None,
            gains_experience: false,
            save_id: None,
        }
    }

    /// Игрок с кулаками, копит опыт
    pub fn player(position: Vec3) -> Self {
        Self {
            control: ControlKind::Player,
            gains_experience: true,
            ..Self::base(position, Faction::Player)
        }
        .with_fighter("unarmed")
    }

    /// Враг с AI (атакует игрока)
    pub fn enemy(position: Vec3) -> Self {
        Self {
            control: ControlKind::Ai(AIConfig::default()),
            ..Self::base(position, Faction::Enemy)
        }
        .with_fighter("unarmed")
    }

    /// Просто цель без контроллера и Fighter'а
    pub fn dummy(position: Vec3, faction: Faction) -> Self {
        Self::base(position, faction)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn with_move_speed(mut self, speed: Option<f32>) -> Self {
        self.move_speed = speed;
        self
    }

    /// Fighter атакует противоположную фракцию
    pub fn with_fighter(mut self, weapon: impl Into<String>) -> Self {
        self.fighter = Some(FighterBlueprint {
            target_faction: self.faction.opposing(),
            weapon: WeaponId::new(weapon),
            cooldown_reset: None,
        });
        self
    }

    pub fn with_cooldown_reset(mut self, policy: CooldownReset) -> Self {
        if let Some(fighter) = self.fighter.as_mut() {
            fighter.cooldown_reset = Some(policy);
        }
        self
    }

    pub fn without_fighter(mut self) -> Self {
        self.fighter = None;
        self
    }

    pub fn with_ai(mut self, config: AIConfig) -> Self {
        self.control = ControlKind::Ai(config);
        self
    }

    pub fn with_patrol(mut self, patrol: PatrolPath) -> Self {
        self.patrol = Some(patrol);
        self
    }

    pub fn with_modifiers(mut self, modifiers: StatModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_progression(mut self, class: CharacterClass, level: u32) -> Self {
        self.progression = Some(BaseStats::new(class, level));
        self
    }

    /// Агент копит опыт за убийства (без класса → CharacterClass::Player)
    pub fn with_experience(mut self) -> Self {
        self.gains_experience = true;
        self
    }

    pub fn with_save_id(mut self, save_id: impl Into<String>) -> Self {
        self.save_id = Some(save_id.into());
        self
    }

    fn resolve_weapon(world: &World, id: &WeaponId) -> WeaponConfiguration {
        let found = match world.get_resource::<WeaponCatalog>() {
            Some(catalog) => catalog.require(id).cloned(),
            None => WeaponCatalog::default().require(id).cloned(),
        };

        found.unwrap_or_else(|error| {
            log_warning(&format!("⚠️ {} (falling back to unarmed)", error));
            WeaponConfiguration::unarmed()
        })
    }

    fn base_health(&self, world: &World) -> f32 {
        let Some(stats) = &self.progression else {
            return self.max_health;
        };
        match world.get_resource::<Progression>() {
            Some(progression) => stats.stat_value(Stat::Health, progression),
            None => stats.stat_value(Stat::Health, &Progression::default()),
        }
    }

    pub fn spawn(&self, world: &mut World) -> Entity {
        let max_health = calculate_stat(self.base_health(world), Stat::Health, &[&self.modifiers]);
        let default_policy = world
            .get_resource::<SimulationConfig>()
            .map(|config| config.cooldown_reset)
            .unwrap_or_default();
        let fighter = self.fighter.as_ref().map(|blueprint| {
            let weapon = Self::resolve_weapon(&*world, &blueprint.weapon);
            Fighter::new(blueprint.target_faction, weapon)
                .with_cooldown_reset(blueprint.cooldown_reset.unwrap_or(default_policy))
        });

        let mut entity = world.spawn((
            Transform::from_translation(self.position),
            CombatTarget::new(self.faction),
            Health::new(max_health),
            self.modifiers.clone(),
        ));

        if let Some(name) = &self.name {
            entity.insert(Name::new(name.clone()));
        }
        if let Some(speed) = self.move_speed {
            entity.insert(Mover::new(speed));
        }
        match &self.control {
            ControlKind::Player => {
                entity.insert(Player);
            }
            ControlKind::Ai(config) => {
                entity.insert((AIController::new(self.position), config.clone()));
            }
            ControlKind::None => {}
        }
        if let Some(patrol) = &self.patrol {
            entity.insert(patrol.clone());
        }
        if let Some(stats) = self.progression {
            entity.insert(stats);
        }
        if self.gains_experience {
            entity.insert(Experience::default());
        }
        if let Some(save_id) = &self.save_id {
            entity.insert(SaveId::new(save_id.clone()));
        }

        let id = entity.id();

        if let Some(mut fighter) = fighter {
            let weapon = fighter.weapon().clone();
            if let Some(prefab_path) = &weapon.prefab_path {
                let instance = world
                    .spawn((
                        Attachment::weapon(weapon.id.clone(), prefab_path.clone(), weapon.hand),
                        ChildOf(id),
                    ))
                    .id();
                fighter.attach_instance(instance);
            }
            world.entity_mut(id).insert(fighter);
        }

        id
    }
}
