//! Public API for the simulation.
//!
//! This module provides the main interface for a host (window loop, engine
//! embedding, headless driver) to interact with the simulation.
//!
//! ## Fixed Timestep
//!
//! The simulation uses a fixed timestep internally (default 30 Hz). When
//! `step(dt)` is called, the simulation accumulates time and runs fixed
//! updates as needed. This ensures deterministic behavior regardless of the
//! host frame rate.
//!
//! ## Input
//!
//! The host forwards its raw events through `handle_event`: the spawn key
//! queues a Player spawn request (granted or refused by the cooldown gate on
//! the next tick), and a quit event flips `is_running` so the host loop can
//! terminate.

use crate::components::*;
use crate::config::SimConfig;
use crate::spatial::{spatial_index_system, SpatialGrid};
use crate::systems::*;
use crate::world::Snapshot;
use bevy_ecs::prelude::*;

/// Host-side input, already mapped from raw keys/window events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Spawn key (space bar in the reference host) was pressed.
    SpawnPressed,
    /// Window close was requested.
    Quit,
}

/// The main simulation world container.
///
/// Holds the ECS world and schedule, providing a clean API for:
/// - Setting up the field (bases, towers)
/// - Stepping the simulation forward
/// - Feeding input events in
/// - Extracting state snapshots
pub struct SimWorld {
    world: World,
    schedule: Schedule,
    tick: u64,
    time: f32,
    /// Accumulated time for fixed timestep.
    time_accumulator: f32,
    running: bool,
}

impl SimWorld {
    /// Create a new empty simulation world (no bases, no units).
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Create a new simulation world with custom configuration.
    pub fn with_config(config: SimConfig) -> Self {
        let mut world = World::new();

        // Collision checks probe one unit footprint at a time; cells twice
        // that size keep the probe within a 2x2 cell neighborhood.
        let cell_size = config.unit_width.max(config.unit_height) * 2.0;

        world.insert_resource(DeltaTime(config.fixed_timestep));
        world.insert_resource(SimTime::default());
        world.insert_resource(SpatialGrid::new(cell_size));
        world.insert_resource(SpawnQueue::default());
        world.insert_resource(SpawnCooldowns::default());
        world.insert_resource(UnitIdAllocator::default());
        world.insert_resource(config);

        // One tick runs the systems as a single sequential chain.
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                spawn_system,
                spatial_index_system,
                march_system,
                melee_system,
                tower_system,
                cleanup_system,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            tick: 0,
            time: 0.0,
            time_accumulator: 0.0,
            running: true,
        }
    }

    /// Create the standard skirmish: a plain Player base on the left and an
    /// Enemy base with a tower on the right.
    pub fn new_skirmish() -> Self {
        let mut sim = Self::new();
        sim.spawn_base(Side::Player);
        sim.spawn_tower_base(Side::Enemy);
        sim
    }

    /// Spawn a base for a side, placed per the configured field geometry.
    pub fn spawn_base(&mut self, side: Side) {
        let bundle = self.base_bundle(side);
        self.world.spawn(bundle);
    }

    /// Spawn a base with a tower for a side.
    pub fn spawn_tower_base(&mut self, side: Side) {
        let config = self.config();
        let tower = Tower {
            range: config.tower_range,
            damage_per_second: config.tower_damage_per_second,
        };
        let bundle = self.base_bundle(side);
        self.world.spawn((bundle, tower));
    }

    fn base_bundle(&self, side: Side) -> BaseBundle {
        let config = self.config();
        let x = match side {
            Side::Player => config.base_margin,
            Side::Enemy => config.field_width - config.base_margin - config.base_width,
        };
        let bounds = Bounds::new(
            x,
            config.field_height - config.base_height,
            config.base_width,
            config.base_height,
        );
        BaseBundle::new(side, bounds, config.base_health)
    }

    /// Queue a spawn request for a side. The cooldown gate decides on the
    /// next tick whether it is granted.
    pub fn request_spawn(&mut self, side: Side) {
        self.world.resource_mut::<SpawnQueue>().0.push(side);
    }

    /// Feed a host input event into the simulation.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::SpawnPressed => self.request_spawn(Side::Player),
            InputEvent::Quit => {
                tracing::info!("quit requested");
                self.running = false;
            }
        }
    }

    /// False once a quit event has been received.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Step the simulation forward by `dt` seconds.
    ///
    /// Uses fixed timestep internally - accumulates time and runs fixed
    /// updates as needed. This ensures deterministic behavior regardless of
    /// frame rate.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let fixed_dt = self.config().fixed_timestep;
        self.time_accumulator += dt;

        while self.time_accumulator >= fixed_dt {
            self.fixed_update(fixed_dt);
            self.time_accumulator -= fixed_dt;
        }
    }

    /// Run a single fixed timestep update.
    fn fixed_update(&mut self, dt: f32) {
        self.time += dt;

        if let Some(mut dt_res) = self.world.get_resource_mut::<DeltaTime>() {
            dt_res.0 = dt;
        }
        if let Some(mut time_res) = self.world.get_resource_mut::<SimTime>() {
            time_res.0 = self.time;
        }

        self.schedule.run(&mut self.world);
        self.tick += 1;
    }

    /// Get a snapshot of the current simulation state.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::from_world(&mut self.world, self.tick, self.time)
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&mut self) -> String {
        self.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current tick number.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Get the elapsed simulation time.
    pub fn current_time(&self) -> f32 {
        self.time
    }

    /// Number of live units.
    pub fn unit_count(&mut self) -> usize {
        let mut query = self.world.query_filtered::<&Health, With<Unit>>();
        query.iter(&self.world).filter(|h| h.is_alive()).count()
    }

    /// Current health of a side's base, if that base exists.
    pub fn base_health(&mut self, side: Side) -> Option<f32> {
        let mut query = self.world.query_filtered::<(&Side, &Health), With<Base>>();
        query
            .iter(&self.world)
            .find(|(base_side, _)| **base_side == side)
            .map(|(_, health)| health.current)
    }

    fn config(&self) -> SimConfig {
        self.world.resource::<SimConfig>().clone()
    }

    /// Get direct access to the ECS world (for advanced usage).
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world (for advanced usage).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}
