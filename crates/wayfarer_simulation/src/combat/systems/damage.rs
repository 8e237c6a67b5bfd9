//! Damage application + death handling

use bevy::prelude::*;

use crate::action::{ActionScheduler, ActionSlots};
use crate::actor::Health;
use crate::combat::{AttackHit, DamageDealt, EntityDied, Fighter};
use crate::movement::Mover;
use crate::shared::{AnimationCue, AnimationCues};
use crate::{log, log_info};

/// Система: AttackHit → Health (Resolve set)
///
/// 1. Пропускаем удары по себе и по уже мёртвым
/// 2. Применяем урон
/// 3. Генерируем DamageDealt и EntityDied события
pub fn apply_attack_hits(
    mut attack_hits: EventReader<AttackHit>,
    mut targets: Query<&mut Health>,
    mut damage_dealt: EventWriter<DamageDealt>,
    mut entity_died: EventWriter<EntityDied>,
) {
    for hit in attack_hits.read() {
        if hit.attacker == hit.target {
            continue;
        }

        let Ok(mut health) = targets.get_mut(hit.target) else {
            log(&format!("AttackHit: target {:?} has no Health", hit.target));
            continue;
        };
        if health.is_dead() {
            continue;
        }

        let target_died = health.take_damage(hit.damage);

        damage_dealt.write(DamageDealt {
            attacker: hit.attacker,
            target: hit.target,
            damage: hit.damage,
            source: hit.source,
            target_died,
        });

        if target_died {
            entity_died.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.attacker),
            });
            log_info(&format!("💀 Entity {:?} killed by {:?}", hit.target, hit.attacker));
        }
    }
}

/// Система: смерть → отмена текущего действия + Death cue
///
/// Тело остаётся в мире (CombatTarget с мёртвым Health не атакуется).
pub fn handle_deaths(
    mut deaths: EventReader<EntityDied>,
    mut agents: Query<(
        &mut ActionScheduler,
        Option<&mut Mover>,
        Option<&mut Fighter>,
        &mut AnimationCues,
    )>,
) {
    for death in deaths.read() {
        let Ok((mut scheduler, mut mover, mut fighter, mut cues)) = agents.get_mut(death.entity) else {
            continue;
        };

        let mut slots = ActionSlots {
            mover: mover.as_deref_mut(),
            fighter: fighter.as_deref_mut(),
            cues: &mut *cues,
        };
        scheduler.cancel_current_action(&mut slots);
        if let Some(mover) = slots.mover.as_deref_mut() {
            mover.halt();
        }
        slots.cues.push(AnimationCue::Death);
    }
}
