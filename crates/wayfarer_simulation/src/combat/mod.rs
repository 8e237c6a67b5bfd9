//! Combat system module
//!
//! ECS ответственность:
//! - Fighter: цель, сближение, cooldown, удар/выстрел
//! - Projectile: полёт, контакт, lifetime
//! - Damage: модификаторы, Health, смерть
//! - Events: AttackHit → DamageDealt / EntityDied
//!
//! Host-движок только показывает результат (AnimationTriggered, Attachment).

use bevy::prelude::*;

pub mod components;
pub mod damage;
pub mod events;
pub mod systems;
pub mod weapon;

// Re-export основных типов
pub use components::*;
pub use damage::*;
pub use events::*;
pub use systems::*;
pub use weapon::*;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. validate_fighters (Sense) - Fighter без Mover отключается
/// 2. fighter_tick (Act) - сближение / удар / выстрел
/// 3. advance_projectiles → apply_attack_hits → handle_deaths (Resolve)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        use crate::SimulationSet;

        // Регистрация событий
        app.add_event::<AttackHit>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.init_resource::<WeaponCatalog>();

        // Регистрация систем в FixedUpdate
        app.add_systems(FixedUpdate, validate_fighters.in_set(SimulationSet::Sense))
            .add_systems(FixedUpdate, fighter_tick.in_set(SimulationSet::Act))
            .add_systems(
                FixedUpdate,
                (advance_projectiles, apply_attack_hits, handle_deaths)
                    .chain() // Последовательное выполнение
                    .in_set(SimulationSet::Resolve),
            );
    }
}
