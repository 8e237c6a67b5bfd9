//! Projectile - снаряд, выпущенный Fighter'ом с ranged оружием.

use bevy::prelude::*;

use super::target::Faction;
use crate::combat::{ProjectileContact, ProjectileSpec};

/// Снаряд в полёте
///
/// Урон посчитан в момент выстрела (модификаторы стрелка на тот момент).
/// Стрелка никогда не задевает.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub shooter: Entity,
    pub target: Entity,
    /// Фракция, которую снаряд может задеть
    pub target_faction: Faction,
    pub damage: f32,
    pub speed: f32,
    pub homing: bool,
    pub hit_radius: f32,
    pub contact: ProjectileContact,
    remaining_lifetime: f32,
    direction: Vec3,
}

impl Projectile {
    pub fn launch(
        shooter: Entity,
        target: Entity,
        target_faction: Faction,
        damage: f32,
        spec: &ProjectileSpec,
        from: Vec3,
        aim_point: Vec3,
    ) -> Self {
        Self {
            shooter,
            target,
            target_faction,
            damage,
            speed: spec.speed,
            homing: spec.homing,
            hit_radius: spec.hit_radius,
            contact: spec.contact,
            remaining_lifetime: spec.lifetime,
            direction: (aim_point - from).normalize_or(Vec3::NEG_Z),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_lifetime <= 0.0
    }

    /// Шаг полёта. Homing снаряд доворачивает на цель и не проскакивает её.
    pub fn advance(&mut self, position: Vec3, target_position: Option<Vec3>, delta: f32) -> Vec3 {
        self.remaining_lifetime -= delta;
        let travel = self.speed * delta;

        if self.homing {
            if let Some(target_position) = target_position {
                let to_target = target_position - position;
                let distance = to_target.length();
                if distance <= travel {
                    return target_position;
                }
                self.direction = to_target / distance;
            }
        }

        position + self.direction * travel
    }

    /// Может ли снаряд задеть кандидата
    pub fn accepts(&self, candidate: Entity, faction: Faction, alive: bool) -> bool {
        if candidate == self.shooter || !alive {
            return false;
        }

        match self.contact {
            ProjectileContact::TargetOnly => candidate == self.target,
            ProjectileContact::AnyOpposing => faction == self.target_faction,
        }
    }
}
