//! Save/Load - минимальное persisted состояние агентов
//!
//! Сохраняется только то, что нельзя вывести из сцены:
//! - текущее оружие (WeaponId)
//! - текущее здоровье
//! - накопленный опыт (уровень выводится из него)
//!
//! Ключ - стабильный SaveId (entity id между запусками не стабилен).
//! Формат - JSON (serde_json).

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actor::Health;
use crate::combat::{EntityDied, Fighter, WeaponId};
use crate::equipment::EquipWeaponRequest;
use crate::error::Result;
use crate::log_info;
use crate::progression::Experience;

/// Стабильный id агента для save-файла
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct SaveId(pub String);

impl SaveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<WeaponId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub agents: BTreeMap<String, AgentRecord>,
}

impl SaveGame {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Снять состояние всех агентов с SaveId
pub fn capture_world(world: &mut World) -> SaveGame {
    let mut query = world.query::<(&SaveId, Option<&Fighter>, Option<&Health>, Option<&Experience>)>();

    let agents = query
        .iter(world)
        .map(|(save_id, fighter, health, experience)| {
            let record = AgentRecord {
                weapon: fighter.map(|fighter| fighter.weapon().id.clone()),
                health: health.map(|health| health.current),
                experience: experience.map(Experience::value),
            };
            (save_id.0.clone(), record)
        })
        .collect();

    SaveGame { agents }
}

/// Применить save к миру. Возвращает число восстановленных агентов.
///
/// - health ≤ 0 → агент восстанавливается мёртвым (EntityDied, killer None)
/// - оружие → EquipWeaponRequest (применится на следующем тике)
/// - опыт → Experience (уровень пересчитает update_levels)
/// - агенты без записи не трогаются
pub fn restore_world(world: &mut World, save: &SaveGame) -> usize {
    let mut query = world.query::<(Entity, &SaveId)>();
    let targets: Vec<(Entity, AgentRecord)> = query
        .iter(world)
        .filter_map(|(entity, save_id)| save.agents.get(&save_id.0).map(|record| (entity, record.clone())))
        .collect();

    for (entity, record) in &targets {
        if let Some(value) = record.health {
            let died = world.get_mut::<Health>(*entity).is_some_and(|mut health| {
                let was_alive = health.is_alive();
                health.restore(value);
                was_alive && health.is_dead()
            });
            if died {
                world.send_event(EntityDied {
                    entity: *entity,
                    killer: None,
                });
            }
        }

        if let Some(value) = record.experience {
            if let Some(mut experience) = world.get_mut::<Experience>(*entity) {
                experience.restore(value);
            }
        }

        if let Some(weapon) = &record.weapon {
            world.send_event(EquipWeaponRequest {
                entity: *entity,
                weapon: Some(weapon.clone()),
            });
        }
    }

    log_info(&format!("💾 Restored {} agents from save", targets.len()));
    targets.len()
}
