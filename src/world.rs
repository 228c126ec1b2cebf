//! Simulation snapshot types.
//!
//! The `Snapshot` struct provides a serializable view of the simulation state
//! that a host renderer consumes to draw the field.

use crate::components::*;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot of a single base's state for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSnapshot {
    pub side: String,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub health: f32,
    pub health_max: f32,
    pub has_tower: bool,
    /// Targeting radius; 0 when the base has no tower.
    pub tower_range: f32,
}

/// Snapshot of a single unit's state for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: u32,
    pub side: String,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub health: f32,
    pub health_max: f32,
    pub attacking: bool,
}

/// Complete simulation state snapshot for the host renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current simulation tick.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub time: f32,
    /// Both bases, Player first.
    pub bases: Vec<BaseSnapshot>,
    /// All live units, in spawn order.
    pub units: Vec<UnitSnapshot>,
}

impl Snapshot {
    /// Create a snapshot from the ECS world. Units are emitted in unit-id
    /// order and bases Player-first, so the output is a deterministic
    /// function of the simulation state.
    pub fn from_world(world: &mut World, tick: u64, time: f32) -> Self {
        let mut bases = Vec::new();
        let mut base_query =
            world.query_filtered::<(&Side, &Bounds, &Health, Option<&Tower>), With<Base>>();
        for (side, bounds, health, tower) in base_query.iter(world) {
            bases.push(BaseSnapshot {
                side: side.as_str().to_string(),
                x: bounds.x,
                y: bounds.y,
                w: bounds.w,
                h: bounds.h,
                health: health.current,
                health_max: health.max,
                has_tower: tower.is_some(),
                tower_range: tower.map(|t| t.range).unwrap_or(0.0),
            });
        }
        bases.sort_by_key(|b| if b.side == "Player" { 0 } else { 1 });

        let mut units = Vec::new();
        let mut unit_query =
            world.query_filtered::<(&UnitId, &Side, &Bounds, &Health, &UnitState), With<Unit>>();
        for (id, side, bounds, health, state) in unit_query.iter(world) {
            if !health.is_alive() {
                continue;
            }
            units.push(UnitSnapshot {
                id: id.0,
                side: side.as_str().to_string(),
                x: bounds.x,
                y: bounds.y,
                w: bounds.w,
                h: bounds.h,
                health: health.current,
                health_max: health.max,
                attacking: state.is_attacking(),
            });
        }
        units.sort_by_key(|u| u.id);

        Self {
            tick,
            time,
            bases,
            units,
        }
    }

    /// Serialize snapshot to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize snapshot to pretty JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
