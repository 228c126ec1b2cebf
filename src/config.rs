//! Simulation configuration.
//!
//! All tuning lives in one resource so a host can load a complete setup from
//! JSON and hand it to `SimWorld::with_config`.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Tuning for the simulation. Distances are world units (pixels in the
/// default renderer), durations are seconds.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed timestep in seconds (e.g., 1/30 = 0.0333 for 30 Hz).
    pub fixed_timestep: f32,
    /// Field dimensions.
    pub field_width: f32,
    pub field_height: f32,
    /// Base rectangle size and its inset from the field edge.
    pub base_width: f32,
    pub base_height: f32,
    pub base_margin: f32,
    pub base_health: f32,
    /// Unit rectangle size.
    pub unit_width: f32,
    pub unit_height: f32,
    pub unit_health: f32,
    /// March speed in units per second.
    pub unit_speed: f32,
    /// Damage a unit deals to the base it attacks, once per simulated second.
    pub melee_damage_per_second: f32,
    /// Minimum simulated time between spawns on one side.
    pub spawn_cooldown: f32,
    /// Tower tuning, applied when a base is spawned with a tower.
    pub tower_range: f32,
    pub tower_damage_per_second: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 30.0, // 30 Hz
            field_width: 800.0,
            field_height: 400.0,
            base_width: 50.0,
            base_height: 100.0,
            base_margin: 50.0,
            base_health: 100.0,
            unit_width: 20.0,
            unit_height: 20.0,
            unit_health: 20.0,
            unit_speed: 60.0, // 2 units per tick at 30 Hz
            melee_damage_per_second: 10.0,
            spawn_cooldown: 1.0,
            tower_range: 150.0,
            tower_damage_per_second: 5.0,
        }
    }
}

impl SimConfig {
    /// Number of ticks in one simulated second; the melee strike threshold.
    pub fn ticks_per_strike(&self) -> u32 {
        ((1.0 / self.fixed_timestep).round() as u32).max(1)
    }

    /// Y coordinate of the march lane. Units travel in a single row just
    /// above the base tops.
    pub fn lane_y(&self) -> f32 {
        self.field_height - self.base_height - self.unit_height
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
