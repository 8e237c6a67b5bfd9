//! Базовые компоненты акторов: Health, ControlDisabled

use bevy::prelude::*;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max. Мёртв при current ≤ 0, смерть необратима
/// (heal/take_damage на мёртвом - no-op).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Нанести урон. Возвращает true если именно этот удар убил.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_dead() {
            return false;
        }

        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.max);
        self.is_dead()
    }

    pub fn heal(&mut self, amount: f32) {
        if self.is_dead() {
            return;
        }
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    /// Восстановление из save (мёртвым тоже можно восстановиться)
    pub fn restore(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }

    /// Новый max, доля текущего здоровья сохраняется (мёртвый остаётся мёртвым)
    pub fn rescale(&mut self, max: f32) {
        let fraction = self.fraction();
        self.max = max.max(0.0);
        self.current = self.max * fraction;
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }
}

/// Маркер: контроллер агента отключён (нет обязательного collaborator'а)
///
/// AI/Player/Fighter системы пропускают такие entity (`Without<ControlDisabled>`).
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ControlDisabled {
    pub reason: String,
}
