//! Perception domain - кто вокруг агента
//!
//! Содержит:
//! - LayerMask / PerceptionLayers (фильтр spatial запросов)
//! - SpatialBackend + SpatialIndex (overlap sphere, перестраивается в Sense set)
//! - query_combat_targets (живые цели нужной фракции, по возрастанию дистанции)
//!
//! Физика/коллайдеры host-движка сюда не попадают - только позиции.

use bevy::prelude::*;

pub mod sensor;
pub mod spatial;

pub use sensor::*;
pub use spatial::*;

pub struct PerceptionPlugin;

impl Plugin for PerceptionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpatialIndex>().add_systems(
            FixedUpdate,
            rebuild_spatial_index.in_set(crate::SimulationSet::Sense),
        );
    }
}
