//! Spatial collaborator: overlap sphere по слоям.

use std::collections::HashMap;

use bevy::prelude::*;

/// Битовая маска слоёв perception
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const CHARACTERS: LayerMask = LayerMask(1);
    pub const PICKUPS: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

/// На каких слоях entity видно perception запросам
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PerceptionLayers(pub LayerMask);

impl Default for PerceptionLayers {
    fn default() -> Self {
        Self(LayerMask::CHARACTERS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialHit {
    pub entity: Entity,
    pub position: Vec3,
}

/// Spatial query backend
pub trait SpatialBackend {
    /// Все entity в сфере (порядок не гарантирован)
    fn overlap_sphere(&self, origin: Vec3, radius: f32, filter: LayerMask) -> Vec<SpatialHit>;
}

#[derive(Debug, Clone, Copy)]
struct SpatialEntry {
    entity: Entity,
    position: Vec3,
    layers: LayerMask,
}

/// Snapshot позиций на начало тика (линейный scan)
///
/// Все решения в тике видят одни и те же позиции - порядок обработки
/// агентов не влияет на perception.
#[derive(Resource, Debug, Default)]
pub struct SpatialIndex {
    entries: Vec<SpatialEntry>,
    lookup: HashMap<Entity, usize>,
}

impl SpatialIndex {
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lookup.clear();
    }

    pub fn insert(&mut self, entity: Entity, position: Vec3, layers: LayerMask) {
        if let Some(&index) = self.lookup.get(&entity) {
            self.entries[index] = SpatialEntry { entity, position, layers };
            return;
        }
        self.lookup.insert(entity, self.entries.len());
        self.entries.push(SpatialEntry { entity, position, layers });
    }

    pub fn position_of(&self, entity: Entity) -> Option<Vec3> {
        self.lookup.get(&entity).map(|&index| self.entries[index].position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SpatialBackend for SpatialIndex {
    fn overlap_sphere(&self, origin: Vec3, radius: f32, filter: LayerMask) -> Vec<SpatialHit> {
        let radius_squared = radius * radius;
        self.entries
            .iter()
            .filter(|entry| entry.layers.intersects(filter))
            .filter(|entry| entry.position.distance_squared(origin) <= radius_squared)
            .map(|entry| SpatialHit {
                entity: entry.entity,
                position: entry.position,
            })
            .collect()
    }
}

/// Система: перестроить SpatialIndex из Transform (Sense set, начало тика)
pub fn rebuild_spatial_index(mut index: ResMut<SpatialIndex>, bodies: Query<(Entity, &Transform, &PerceptionLayers)>) {
    index.clear();
    for (entity, transform, layers) in bodies.iter() {
        index.insert(entity, transform.translation, layers.0);
    }
}
