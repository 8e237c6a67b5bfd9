//! Combat target perception (query + TargetView lookup)

use bevy::prelude::*;

use super::spatial::{LayerMask, SpatialBackend, SpatialIndex};
use crate::actor::Health;
use crate::combat::{CombatTarget, Faction, TargetHealth, TargetView};

/// Query для чтения целей: фракция + здоровье
pub type TargetQuery<'w, 's> = Query<'w, 's, (&'static CombatTarget, Option<&'static Health>)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerceptionRequest {
    pub origin: Vec3,
    pub radius: f32,
    /// Какую фракцию ищем
    pub faction: Faction,
    pub layers: LayerMask,
    /// Сам наблюдатель
    pub exclude: Option<Entity>,
}

impl PerceptionRequest {
    pub fn new(origin: Vec3, radius: f32, faction: Faction) -> Self {
        Self {
            origin,
            radius,
            faction,
            layers: LayerMask::CHARACTERS,
            exclude: None,
        }
    }

    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perceived {
    pub target: TargetView,
    pub distance: f32,
}

/// Живые цели нужной фракции в радиусе, ближайшая первой
///
/// `lookup` отдаёт (фракция, здоровье) или None если entity не CombatTarget.
/// Сортировка стабильная, равные дистанции сохраняют порядок backend'а.
pub fn query_combat_targets<B, F>(backend: &B, request: &PerceptionRequest, lookup: F) -> Vec<Perceived>
where
    B: SpatialBackend + ?Sized,
    F: Fn(Entity) -> Option<(Faction, TargetHealth)>,
{
    let mut found: Vec<Perceived> = backend
        .overlap_sphere(request.origin, request.radius, request.layers)
        .into_iter()
        .filter(|hit| Some(hit.entity) != request.exclude)
        .filter_map(|hit| {
            let (faction, health) = lookup(hit.entity)?;
            if faction != request.faction || health != TargetHealth::Alive {
                return None;
            }
            Some(Perceived {
                target: TargetView {
                    entity: hit.entity,
                    faction,
                    position: hit.position,
                    health,
                },
                distance: hit.position.distance(request.origin),
            })
        })
        .collect();

    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    found
}

/// Источник целей для AI (в системах - замыкание над SpatialIndex)
pub trait TargetSensor {
    fn sense(&self, origin: Vec3, radius: f32) -> Vec<Perceived>;
}

impl<F> TargetSensor for F
where
    F: Fn(Vec3, f32) -> Vec<Perceived>,
{
    fn sense(&self, origin: Vec3, radius: f32) -> Vec<Perceived> {
        self(origin, radius)
    }
}

/// Фракция + здоровье цели для `query_combat_targets`
pub fn target_status(targets: &TargetQuery, entity: Entity) -> Option<(Faction, TargetHealth)> {
    let (target, health) = targets.get(entity).ok()?;
    Some((target.faction, TargetHealth::from_health(health)))
}

/// Полный TargetView (позиция из SpatialIndex - snapshot начала тика)
pub fn target_view(targets: &TargetQuery, spatial: &SpatialIndex, entity: Entity) -> Option<TargetView> {
    let (faction, health) = target_status(targets, entity)?;
    Some(TargetView {
        entity,
        faction,
        position: spatial.position_of(entity)?,
        health,
    })
}
