//! Fighter - атака цели: сближение, cooldown, удар.
//!
//! Явного FSM нет - состояние выводится из (target, дистанция, cooldown):
//! - нет цели → Idle
//! - цель мертва / пропала → TargetLost (Cancel)
//! - дальше range → Pursue (Mover.move_to к цели)
//! - в range, cooldown не готов → Hold (стоим)
//! - в range, cooldown готов → Strike (cue + урон/снаряд, сброс таймера)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::target::{Faction, TargetView};
use crate::action::{ActionScheduler, Cancellable};
use crate::combat::WeaponConfiguration;
use crate::movement::{Mover, NavigationBackend};
use crate::shared::{AnimationCue, AnimationCues};

/// Во что сбрасывается таймер после удара
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownReset {
    /// timer = 0 (интервал = ceil(tba / dt) тиков)
    #[default]
    Zero,
    /// timer = dt текущего тика (интервал на тик короче)
    TickDelta,
}

/// Результат одного тика Fighter'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FighterStep {
    Idle,
    TargetLost { target: Entity },
    Pursue { target: Entity, destination: Vec3 },
    Hold { target: Entity },
    Strike { target: Entity, target_position: Vec3 },
}

/// Результат EquipWeapon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    /// Конфигурация отсутствует - ничего не изменилось
    Ignored,
    /// Старый визуальный инстанс нужно уничтожить
    Equipped { replaced_instance: Option<Entity> },
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(ActionScheduler, AnimationCues)]
pub struct Fighter {
    /// Фракция, которую атакуем
    pub target_faction: Faction,
    pub cooldown_reset: CooldownReset,
    weapon: WeaponConfiguration,
    weapon_instance: Option<Entity>,
    target: Option<Entity>,
    time_since_last_attack: f32,
}

impl Default for Fighter {
    fn default() -> Self {
        Self::new(Faction::Player, WeaponConfiguration::unarmed())
    }
}

impl Fighter {
    pub fn new(target_faction: Faction, weapon: WeaponConfiguration) -> Self {
        Self {
            target_faction,
            cooldown_reset: CooldownReset::default(),
            weapon,
            weapon_instance: None,
            target: None,
            // Первый удар без ожидания
            time_since_last_attack: f32::INFINITY,
        }
    }

    pub fn with_cooldown_reset(mut self, policy: CooldownReset) -> Self {
        self.cooldown_reset = policy;
        self
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn weapon(&self) -> &WeaponConfiguration {
        &self.weapon
    }

    pub fn weapon_instance(&self) -> Option<Entity> {
        self.weapon_instance
    }

    pub fn time_since_last_attack(&self) -> f32 {
        self.time_since_last_attack
    }

    pub(crate) fn set_target(&mut self, target: Entity) {
        self.target = Some(target);
    }

    pub fn is_in_range(&self, origin: Vec3, target_position: Vec3) -> bool {
        origin.distance(target_position) <= self.weapon.range
    }

    pub fn is_cooldown_ready(&self) -> bool {
        self.time_since_last_attack >= self.weapon.time_between_attacks
    }

    /// Можно ли атаковать цель (чистая проверка, без side effects)
    ///
    /// - цель есть и жива
    /// - фракция совпадает с target_faction
    /// - Mover (если есть) дойдёт до неё: путь ≤ max_path_length
    pub fn can_attack(
        &self,
        target: Option<&TargetView>,
        origin: Vec3,
        mover: Option<&Mover>,
        navigation: &dyn NavigationBackend,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };
        if !target.is_attackable() || target.faction != self.target_faction {
            return false;
        }

        mover.is_none_or(|mover| mover.can_move_to(origin, target.position, navigation))
    }

    /// Один тик боя. `lookup` отдаёт текущее состояние цели.
    pub fn plan(
        &mut self,
        origin: Vec3,
        delta: f32,
        lookup: impl FnOnce(Entity) -> Option<TargetView>,
    ) -> FighterStep {
        self.time_since_last_attack += delta;

        let Some(target) = self.target else {
            return FighterStep::Idle;
        };
        let Some(view) = lookup(target).filter(TargetView::is_attackable) else {
            return FighterStep::TargetLost { target };
        };

        if !self.is_in_range(origin, view.position) {
            return FighterStep::Pursue {
                target,
                destination: view.position,
            };
        }

        if !self.is_cooldown_ready() {
            return FighterStep::Hold { target };
        }

        self.time_since_last_attack = match self.cooldown_reset {
            CooldownReset::Zero => 0.0,
            CooldownReset::TickDelta => delta,
        };

        FighterStep::Strike {
            target,
            target_position: view.position,
        }
    }

    /// Сменить оружие. None → no-op.
    ///
    /// Старый инстанс отдаётся наружу для despawn, новый прикрепляет
    /// `attach_instance` после spawn'а.
    pub fn equip_weapon(&mut self, weapon: Option<&WeaponConfiguration>) -> EquipOutcome {
        let Some(weapon) = weapon else {
            return EquipOutcome::Ignored;
        };

        self.weapon = weapon.clone();
        EquipOutcome::Equipped {
            replaced_instance: self.weapon_instance.take(),
        }
    }

    pub fn attach_instance(&mut self, instance: Entity) {
        self.weapon_instance = Some(instance);
    }
}

impl Cancellable for Fighter {
    /// Сброс цели + StopAttack cue (остановку Mover'а делает ActionSlots)
    fn cancel(&mut self, cues: &mut AnimationCues) {
        if self.target.take().is_some() {
            cues.push(AnimationCue::StopAttack);
        }
    }
}
