//! Movement компоненты: Mover, ForwardSpeed

use bevy::prelude::*;

use super::navigation::NavigationBackend;
use crate::action::{ActionScheduler, Cancellable};
use crate::shared::AnimationCues;

/// Максимальная длина пути, которую агент готов пройти ради атаки
pub const DEFAULT_MAX_PATH_LENGTH: f32 = 40.0;

/// Кинематический mover агента
///
/// Источник правды для "куда идём". Интеграция позиции - в `integrate_movers`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(ActionScheduler, AnimationCues, ForwardSpeed)]
pub struct Mover {
    /// Скорость (м/с), меняется AI: patrol / chase
    pub speed: f32,
    /// Ближе этого к destination считаем что пришли
    pub stopping_distance: f32,
    /// Лимит длины пути для `can_move_to`
    pub max_path_length: f32,
    destination: Option<Vec3>,
    is_stopped: bool,
    velocity: Vec3,
}

impl Default for Mover {
    fn default() -> Self {
        Self::new(2.0) // 2 m/s - базовая скорость ходьбы
    }
}

impl Mover {
    pub fn new(speed: f32) -> Self {
        Self {
            speed: speed.max(0.0),
            stopping_distance: 0.05,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            destination: None,
            is_stopped: true,
            velocity: Vec3::ZERO,
        }
    }

    pub fn with_max_path_length(mut self, max_path_length: f32) -> Self {
        self.max_path_length = max_path_length;
        self
    }

    /// Задать destination и снять с паузы
    ///
    /// Недостижимая точка (нет пути) игнорируется - текущее движение
    /// не меняется. Лимит max_path_length здесь НЕ применяется, он только
    /// для решений (`can_move_to`).
    pub fn move_to(&mut self, origin: Vec3, destination: Vec3, navigation: &dyn NavigationBackend) -> bool {
        if navigation.path_length(origin, destination).is_none() {
            return false;
        }

        self.destination = Some(destination);
        self.is_stopped = false;
        true
    }

    /// Есть путь и он не длиннее max_path_length (без side effects)
    pub fn can_move_to(&self, origin: Vec3, point: Vec3, navigation: &dyn NavigationBackend) -> bool {
        navigation
            .path_length(origin, point)
            .is_some_and(|length| length <= self.max_path_length)
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_stopped(&self) -> bool {
        self.is_stopped
    }

    pub fn is_moving(&self) -> bool {
        !self.is_stopped && self.destination.is_some()
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Полная остановка (смерть): destination тоже забываем
    pub fn halt(&mut self) {
        self.destination = None;
        self.is_stopped = true;
        self.velocity = Vec3::ZERO;
    }

    /// Один шаг интеграции. Возвращает новую позицию.
    ///
    /// Шаг = min(speed·dt, остаток), так что destination не проскакиваем.
    pub fn step(&mut self, position: Vec3, delta: f32) -> Vec3 {
        let Some(destination) = self.destination.filter(|_| !self.is_stopped) else {
            self.velocity = Vec3::ZERO;
            return position;
        };

        let to_goal = destination - position;
        let remaining = to_goal.length();
        if remaining <= self.stopping_distance || delta <= 0.0 {
            self.velocity = Vec3::ZERO;
            return position;
        }

        let travel = (self.speed * delta).min(remaining);
        let offset = to_goal / remaining * travel;
        self.velocity = offset / delta;
        position + offset
    }
}

impl Cancellable for Mover {
    /// Остановка на месте (destination сохраняется, is_stopped = true)
    fn cancel(&mut self, _cues: &mut AnimationCues) {
        self.is_stopped = true;
        self.velocity = Vec3::ZERO;
    }
}

/// Forward скорость в локальных координатах агента (для анимации)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ForwardSpeed(pub f32);
