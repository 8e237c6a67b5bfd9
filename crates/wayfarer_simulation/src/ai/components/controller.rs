//! AIController - решение агента на каждый тик.
//!
//! Приоритеты (сверху вниз, первое подходящее):
//! 1. Мёртв → ничего (таймеры стоят)
//! 2. Ближайшая атакуемая цель → Attack (chase speed, shout, сброс "last saw")
//! 3. Недавно видел цель (< look_time) → Suspicious (стоим)
//! 4. Patrol: к waypoint'у / домой; после прибытия ждём dwell time
//!
//! Поведение пересчитывается с нуля каждый тик - переходы неявные.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::patrol::PatrolPath;
use crate::action::AgentActions;
use crate::combat::{Faction, TargetView};
use crate::movement::NavigationBackend;
use crate::perception::TargetSensor;

/// Конфигурация AI (per-agent)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AIConfig {
    /// Радиус обнаружения цели (м)
    pub chase_range: f32,
    /// Скорость преследования (м/с)
    pub chase_speed: f32,
    /// Сколько "ищем" цель после потери (сек)
    pub look_time: f32,
    /// Скорость патруля (м/с)
    pub patrol_speed: f32,
    /// Допуск прибытия на waypoint (м)
    pub waypoint_tolerance: f32,
    /// Пауза на waypoint'е (сек)
    pub waypoint_dwell_time: f32,
    /// Радиус крика тревоги (м)
    pub shout_radius: f32,
    /// На сколько тревога расширяет chase range у соседей (м)
    pub alert_chase_extension: f32,
    /// Кого атакуем
    pub target_faction: Faction,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            chase_range: 5.0,
            chase_speed: 2.0,
            look_time: 5.0,
            patrol_speed: 1.508,
            waypoint_tolerance: 1.0,
            waypoint_dwell_time: 6.0,
            shout_radius: 8.0,
            alert_chase_extension: 5.0,
            target_faction: Faction::Player,
        }
    }
}

/// Что агент делал в этом тике (для логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum Behavior {
    /// Мёртв или ещё не думал
    #[default]
    Inactive,
    Attack {
        target: Entity,
    },
    Suspicious,
    /// Стоит на waypoint'е (по сути тоже Suspicious - текущее действие отменено)
    Dwell,
    Patrol {
        destination: Vec3,
    },
}

/// Входные данные одного тика
pub struct ThinkContext<'a, S: TargetSensor + ?Sized> {
    pub position: Vec3,
    pub is_dead: bool,
    pub delta: f32,
    pub sensor: &'a S,
    pub navigation: &'a dyn NavigationBackend,
    pub patrol: Option<&'a mut PatrolPath>,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(AIConfig)]
pub struct AIController {
    /// Точка возврата (позиция при появлении)
    home: Vec3,
    /// Доп. chase range от тревоги (сбрасывается когда look_time истёк)
    chase_extension: f32,
    time_since_last_saw_target: f32,
    time_since_arrived_at_waypoint: f32,
    last_behavior: Behavior,
}

impl Default for AIController {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl AIController {
    pub fn new(home: Vec3) -> Self {
        Self {
            home,
            chase_extension: 0.0,
            time_since_last_saw_target: f32::INFINITY,
            time_since_arrived_at_waypoint: f32::INFINITY,
            last_behavior: Behavior::Inactive,
        }
    }

    pub fn home(&self) -> Vec3 {
        self.home
    }

    pub fn set_home(&mut self, home: Vec3) {
        self.home = home;
    }

    pub fn time_since_last_saw_target(&self) -> f32 {
        self.time_since_last_saw_target
    }

    pub fn time_since_arrived_at_waypoint(&self) -> f32 {
        self.time_since_arrived_at_waypoint
    }

    pub fn last_behavior(&self) -> Behavior {
        self.last_behavior
    }

    pub fn is_looking_for_target(&self, config: &AIConfig) -> bool {
        self.time_since_last_saw_target < config.look_time
    }

    pub fn effective_chase_range(&self, config: &AIConfig) -> f32 {
        config.chase_range + self.chase_extension
    }

    /// Тревога от соседа: "только что видели цель" + расширенный chase range
    ///
    /// Возвращает true если агент до этого был спокоен.
    pub fn receive_alert(&mut self, config: &AIConfig, extension: f32) -> bool {
        let was_calm = !self.is_looking_for_target(config);
        self.time_since_last_saw_target = 0.0;
        self.chase_extension = self.chase_extension.max(extension);
        was_calm
    }

    /// Решение на один тик
    pub fn think<S: TargetSensor + ?Sized>(
        &mut self,
        config: &AIConfig,
        actions: &mut AgentActions,
        context: ThinkContext<S>,
    ) -> Behavior {
        if context.is_dead {
            self.last_behavior = Behavior::Inactive;
            return Behavior::Inactive;
        }

        if !self.is_looking_for_target(config) {
            self.chase_extension = 0.0;
        }

        let position = context.position;
        let nearest = context
            .sensor
            .sense(position, self.effective_chase_range(config))
            .into_iter()
            .next()
            .map(|perceived| perceived.target);

        let behavior = match nearest {
            Some(target) if actions.can_attack(&target, position, context.navigation) => {
                self.attack_behavior(config, actions, &target)
            }
            _ if self.is_looking_for_target(config) => {
                actions.cancel_current_action();
                Behavior::Suspicious
            }
            _ => self.patrol_behavior(config, actions, position, context.navigation, context.patrol),
        };

        self.time_since_last_saw_target += context.delta;
        self.time_since_arrived_at_waypoint += context.delta;
        self.last_behavior = behavior;
        behavior
    }

    fn attack_behavior(&mut self, config: &AIConfig, actions: &mut AgentActions, target: &TargetView) -> Behavior {
        actions.set_move_speed(config.chase_speed);
        actions.attack(target);
        self.time_since_last_saw_target = 0.0;
        Behavior::Attack { target: target.entity }
    }

    fn patrol_behavior(
        &mut self,
        config: &AIConfig,
        actions: &mut AgentActions,
        position: Vec3,
        navigation: &dyn NavigationBackend,
        patrol: Option<&mut PatrolPath>,
    ) -> Behavior {
        actions.set_move_speed(config.patrol_speed);

        let mut destination = self.home;
        if let Some(path) = patrol {
            if path.waypoint_or(self.home).distance(position) <= config.waypoint_tolerance {
                self.time_since_arrived_at_waypoint = 0.0;
                path.next_index();
            }
            destination = path.waypoint_or(self.home);
        }

        if self.time_since_arrived_at_waypoint < config.waypoint_dwell_time {
            actions.cancel_current_action();
            return Behavior::Dwell;
        }

        actions.start_move_action(position, destination, navigation);
        Behavior::Patrol { destination }
    }
}
