//! AgentActions - мутабельный вид на одного агента для decision-кода.
//!
//! Собирается системой из query item'ов (scheduler, Mover, Fighter, cues)
//! и живёт ровно один вызов. Decision-логика (AIController, PlayerCommand)
//! работает только через него, не трогая ECS напрямую.

use bevy::prelude::*;

use super::scheduler::{Action, ActionCanceller, ActionOwner, ActionScheduler, Cancellable};
use crate::combat::{Fighter, TargetView};
use crate::movement::{Mover, NavigationBackend};
use crate::shared::AnimationCues;

/// Action-компоненты агента (без scheduler'а)
pub struct ActionSlots<'a> {
    pub mover: Option<&'a mut Mover>,
    pub fighter: Option<&'a mut Fighter>,
    pub cues: &'a mut AnimationCues,
}

impl ActionSlots<'_> {
    /// Отмена атаки: сброс цели + остановка преследования
    pub fn cancel_fighter(&mut self) {
        if let Some(fighter) = self.fighter.as_deref_mut() {
            fighter.cancel(self.cues);
        }
        if let Some(mover) = self.mover.as_deref_mut() {
            mover.cancel(self.cues);
        }
    }
}

impl ActionCanceller for ActionSlots<'_> {
    fn cancel(&mut self, action: &Action) {
        match action.owner() {
            ActionOwner::Mover => {
                if let Some(mover) = self.mover.as_deref_mut() {
                    mover.cancel(self.cues);
                }
            }
            ActionOwner::Fighter => self.cancel_fighter(),
        }
    }
}

pub struct AgentActions<'a> {
    pub scheduler: &'a mut ActionScheduler,
    pub slots: ActionSlots<'a>,
}

impl<'a> AgentActions<'a> {
    pub fn new(
        scheduler: &'a mut ActionScheduler,
        mover: Option<&'a mut Mover>,
        fighter: Option<&'a mut Fighter>,
        cues: &'a mut AnimationCues,
    ) -> Self {
        Self {
            scheduler,
            slots: ActionSlots { mover, fighter, cues },
        }
    }

    pub fn start_action(&mut self, action: Option<Action>) {
        self.scheduler.start_action(action, &mut self.slots);
    }

    pub fn cancel_current_action(&mut self) {
        self.scheduler.cancel_current_action(&mut self.slots);
    }

    /// StartMoveAction: захват слота + MoveTo
    ///
    /// Возвращает false если Mover'а нет или точка недостижима
    /// (слот при этом всё равно занят Move - как и при ручном клике).
    pub fn start_move_action(&mut self, origin: Vec3, destination: Vec3, navigation: &dyn NavigationBackend) -> bool {
        if self.slots.mover.is_none() {
            return false;
        }

        self.start_action(Some(Action::Move { destination }));
        self.slots
            .mover
            .as_deref_mut()
            .is_some_and(|mover| mover.move_to(origin, destination, navigation))
    }

    /// Attack: захват слота + установка цели Fighter'у
    ///
    /// Цель без Health (TargetHealth::Missing) молча игнорируется.
    pub fn attack(&mut self, target: &TargetView) {
        if self.slots.fighter.is_none() || !target.has_health() {
            return;
        }

        self.start_action(Some(Action::Attack { target: target.entity }));
        if let Some(fighter) = self.slots.fighter.as_deref_mut() {
            fighter.set_target(target.entity);
        }
    }

    pub fn can_attack(&self, target: &TargetView, origin: Vec3, navigation: &dyn NavigationBackend) -> bool {
        self.slots
            .fighter
            .as_deref()
            .is_some_and(|fighter| fighter.can_attack(Some(target), origin, self.slots.mover.as_deref(), navigation))
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        if let Some(mover) = self.slots.mover.as_deref_mut() {
            mover.set_move_speed(speed);
        }
    }

    pub fn mover(&self) -> Option<&Mover> {
        self.slots.mover.as_deref()
    }

    pub fn fighter(&self) -> Option<&Fighter> {
        self.slots.fighter.as_deref()
    }
}
