//! Presentation outbox: animation cues для host-движка
//!
//! Симуляция не знает про AnimationTree. Компоненты кладут cue в
//! `AnimationCues`, в конце тика `flush_animation_cues` превращает их в
//! `AnimationTriggered` события с заранее посчитанным `ParameterId`.
//! Forward speed публикуется отдельно через `ForwardSpeed` компонент.

use std::collections::HashMap;

use bevy::prelude::*;

pub const FORWARD_SPEED_PARAMETER: &str = "ForwardSpeed";
pub const ATTACK_PARAMETER: &str = "Attack";
pub const STOP_ATTACK_PARAMETER: &str = "StopAttack";
pub const DEATH_PARAMETER: &str = "Death";

/// Одноразовый animation trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationCue {
    Attack,
    StopAttack,
    Death,
}

impl AnimationCue {
    pub fn parameter_name(self) -> &'static str {
        match self {
            AnimationCue::Attack => ATTACK_PARAMETER,
            AnimationCue::StopAttack => STOP_ATTACK_PARAMETER,
            AnimationCue::Death => DEATH_PARAMETER,
        }
    }
}

/// Outbox animation cues агента (очищается каждый тик)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AnimationCues {
    pending: Vec<AnimationCue>,
}

impl AnimationCues {
    pub fn push(&mut self, cue: AnimationCue) {
        self.pending.push(cue);
    }

    pub fn pending(&self) -> &[AnimationCue] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = AnimationCue> + '_ {
        self.pending.drain(..)
    }
}

/// Стабильный id animation параметра
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct ParameterId(pub u32);

impl ParameterId {
    /// FNV-1a от имени - одинаковый между запусками и платформами
    pub fn from_name(name: &str) -> Self {
        let hash = name.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
        });
        Self(hash)
    }
}

/// Таблица name → ParameterId
///
/// Строится один раз при старте и дальше только читается.
#[derive(Resource, Debug, Clone)]
pub struct AnimationParameters {
    ids: HashMap<&'static str, ParameterId>,
}

impl AnimationParameters {
    pub fn from_names(names: &[&'static str]) -> Self {
        Self {
            ids: names.iter().map(|name| (*name, ParameterId::from_name(name))).collect(),
        }
    }

    pub fn id(&self, name: &str) -> Option<ParameterId> {
        self.ids.get(name).copied()
    }

    pub fn cue_id(&self, cue: AnimationCue) -> Option<ParameterId> {
        self.id(cue.parameter_name())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self::from_names(&[
            FORWARD_SPEED_PARAMETER,
            ATTACK_PARAMETER,
            STOP_ATTACK_PARAMETER,
            DEATH_PARAMETER,
        ])
    }
}

/// Event: cue ушёл в presentation слой
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationTriggered {
    pub entity: Entity,
    pub cue: AnimationCue,
    pub parameter: ParameterId,
}

/// Система: AnimationCues → AnimationTriggered (Present set)
pub fn flush_animation_cues(
    mut agents: Query<(Entity, &mut AnimationCues)>,
    parameters: Res<AnimationParameters>,
    mut triggered: EventWriter<AnimationTriggered>,
) {
    for (entity, mut cues) in agents.iter_mut() {
        if cues.is_empty() {
            continue;
        }

        for cue in cues.drain() {
            let Some(parameter) = parameters.cue_id(cue) else {
                continue;
            };
            triggered.write(AnimationTriggered {
                entity,
                cue,
                parameter,
            });
        }
    }
}

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationParameters>()
            .add_event::<AnimationTriggered>()
            .add_systems(
                FixedUpdate,
                flush_animation_cues.in_set(crate::SimulationSet::Present),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_ids_are_stable_and_distinct() {
        let parameters = AnimationParameters::default();

        assert_eq!(parameters.len(), 4);
        assert_eq!(parameters.id(ATTACK_PARAMETER), Some(ParameterId::from_name("Attack")));
        assert_ne!(parameters.cue_id(AnimationCue::Attack), parameters.cue_id(AnimationCue::StopAttack));
        assert!(parameters.id("Jump").is_none());
    }

    #[test]
    fn test_cues_drain_in_push_order() {
        let mut cues = AnimationCues::default();
        cues.push(AnimationCue::Attack);
        cues.push(AnimationCue::StopAttack);

        let drained: Vec<_> = cues.drain().collect();
        assert_eq!(drained, vec![AnimationCue::Attack, AnimationCue::StopAttack]);
        assert!(cues.is_empty());
    }
}
