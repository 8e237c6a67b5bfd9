//! ActionScheduler - слот "current action" агента.

use bevy::prelude::*;

use crate::shared::AnimationCues;

/// Действие агента (владелец слота определяется вариантом)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum Action {
    /// Mover: движение к точке
    Move { destination: Vec3 },
    /// Fighter: атака цели
    Attack { target: Entity },
}

/// Компонент-владелец действия
///
/// Повторная отправка действия того же владельца (новый destination, та же
/// цель) - это НЕ смена действия, отмены не происходит.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ActionOwner {
    Mover,
    Fighter,
}

impl Action {
    pub fn owner(&self) -> ActionOwner {
        match self {
            Action::Move { .. } => ActionOwner::Mover,
            Action::Attack { .. } => ActionOwner::Fighter,
        }
    }
}

/// Компонент, которому можно отменить выполняемое действие.
///
/// `cancel` обязан быть идемпотентным.
pub trait Cancellable {
    fn cancel(&mut self, cues: &mut AnimationCues);
}

/// Тот, кто умеет отменить действие по его описанию (обычно `ActionSlots`)
pub trait ActionCanceller {
    fn cancel(&mut self, action: &Action);
}

/// Per-agent арбитр эксклюзивного выполнения
///
/// Инвариант: в любой момент не больше одного current action.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ActionScheduler {
    current: Option<Action>,
}

impl ActionScheduler {
    pub fn current(&self) -> Option<&Action> {
        self.current.as_ref()
    }

    pub fn current_owner(&self) -> Option<ActionOwner> {
        self.current.as_ref().map(Action::owner)
    }

    /// Установить новое действие (None = очистить слот)
    ///
    /// Если слот занят действием другого владельца - синхронно отменяем его
    /// до установки нового.
    pub fn start_action<C: ActionCanceller + ?Sized>(&mut self, action: Option<Action>, canceller: &mut C) {
        if let Some(current) = self.current {
            let same_owner = action.is_some_and(|incoming| incoming.owner() == current.owner());
            if !same_owner {
                canceller.cancel(&current);
            }
        }

        self.current = action;
    }

    pub fn cancel_current_action<C: ActionCanceller + ?Sized>(&mut self, canceller: &mut C) {
        self.start_action(None, canceller);
    }
}
