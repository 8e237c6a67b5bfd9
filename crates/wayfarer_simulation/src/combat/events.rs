//! Combat events

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DamageSource {
    Melee,
    Projectile,
}

/// Событие: удар достиг цели (урон ещё не применён)
///
/// Генерируется:
/// - fighter_tick (мгновенный удар)
/// - advance_projectiles (контакт снаряда)
///
/// Обрабатывается: apply_attack_hits
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackHit {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    pub source: DamageSource,
}

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
/// Используется для UI, звуков, эффектов.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    pub source: DamageSource,
    pub target_died: bool,
}

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
