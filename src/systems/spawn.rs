//! Spawn system - turns queued spawn requests into units, gated by a
//! per-side cooldown on simulation time.

use crate::components::*;
use crate::config::SimConfig;
use bevy_ecs::prelude::*;

/// Elapsed simulation time in seconds, advanced once per fixed tick.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimTime(pub f32);

/// Pending spawn requests, pushed by the host between ticks and drained at
/// the start of the next tick.
#[derive(Resource, Debug, Default)]
pub struct SpawnQueue(pub Vec<Side>);

/// Simulation time of each side's most recent successful spawn.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SpawnCooldowns {
    last: [Option<f32>; 2],
}

impl SpawnCooldowns {
    pub fn last_spawn(&self, side: Side) -> Option<f32> {
        self.last[side.as_index() as usize]
    }

    pub fn record(&mut self, side: Side, time: f32) {
        self.last[side.as_index() as usize] = Some(time);
    }
}

/// Monotonic unit id allocator; ids follow spawn order.
#[derive(Resource, Debug, Default)]
pub struct UnitIdAllocator {
    next: u32,
}

impl UnitIdAllocator {
    pub fn allocate(&mut self) -> UnitId {
        let id = UnitId(self.next);
        self.next += 1;
        id
    }
}

/// System that drains the spawn queue.
///
/// A request is granted when the side's previous spawn is at least
/// `spawn_cooldown` simulated seconds in the past and both the side's own
/// base (the spawn point) and the enemy base (the march target) exist. New
/// units appear at the own base's forward edge in the march lane.
pub fn spawn_system(
    mut commands: Commands,
    config: Res<SimConfig>,
    time: Res<SimTime>,
    mut queue: ResMut<SpawnQueue>,
    mut cooldowns: ResMut<SpawnCooldowns>,
    mut ids: ResMut<UnitIdAllocator>,
    bases: Query<(&Side, &Bounds), With<Base>>,
) {
    if queue.0.is_empty() {
        return;
    }

    let mut base_bounds: [Option<Bounds>; 2] = [None, None];
    for (side, bounds) in bases.iter() {
        base_bounds[side.as_index() as usize] = Some(*bounds);
    }

    for side in queue.0.drain(..) {
        if let Some(last) = cooldowns.last_spawn(side) {
            if time.0 - last < config.spawn_cooldown {
                tracing::debug!(side = side.as_str(), "spawn refused, cooldown active");
                continue;
            }
        }

        let own = match base_bounds[side.as_index() as usize] {
            Some(own) => own,
            None => {
                tracing::warn!(side = side.as_str(), "spawn refused, no base to spawn at");
                continue;
            }
        };
        if base_bounds[side.opponent().as_index() as usize].is_none() {
            tracing::warn!(side = side.as_str(), "spawn refused, no base to march on");
            continue;
        }

        let x = match side {
            Side::Player => own.right(),
            Side::Enemy => own.left() - config.unit_width,
        };
        let bounds = Bounds::new(x, config.lane_y(), config.unit_width, config.unit_height);
        let id = ids.allocate();
        commands.spawn(UnitBundle::new(
            id,
            side,
            bounds,
            config.unit_health,
            UnitStats {
                speed: config.unit_speed,
                melee_damage: config.melee_damage_per_second,
            },
        ));
        cooldowns.record(side, time.0);
        tracing::debug!(unit = id.0, side = side.as_str(), "unit spawned");
    }
}
