//! Warpath - Simulation Core
//!
//! A deterministic, fixed-timestep ECS simulation of a minimal lane battle:
//! two bases face off across a 2D field, units spawn on input and march on
//! the enemy base, dealing damage by melee while a tower thins them out.
//! Uses `bevy_ecs` for the entity-component-system architecture; rendering
//! and windowing live in the host, which feeds input events in and consumes
//! snapshots (JSON or the flat frame-bridge buffer) out.

pub mod api;
pub mod components;
pub mod config;
pub mod frame_bridge;
pub mod spatial;
pub mod systems;
pub mod world;

pub use api::{InputEvent, SimWorld};
pub use components::*;
pub use config::SimConfig;
pub use spatial::{SpatialEntry, SpatialGrid};
pub use systems::*;
pub use world::Snapshot;
