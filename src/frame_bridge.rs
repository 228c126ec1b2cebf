//! Host renderer bridge.
//!
//! Converts simulation snapshots into a flat `f32` buffer for efficient
//! cross-language transfer to a host renderer (the crate builds as a
//! `cdylib` for exactly this embedding).
//!
//! # Stable buffer layout (version 1.0)
//!
//! ```text
//! [0] base_count (as f32)
//! [1] unit_count (as f32)
//! then base_count * BASE_STRIDE elements, one block per base:
//!   [+0] side_id      - 0.0 = Player, 1.0 = Enemy
//!   [+1] x  [+2] y  [+3] w  [+4] h
//!   [+5] health  [+6] health_max
//!   [+7] has_tower    - 1.0 when a tower is mounted
//!   [+8] tower_range  - 0.0 without a tower
//! then unit_count * UNIT_STRIDE elements, one block per unit:
//!   [+0] id           - unit id (u32 as f32)
//!   [+1] side_id
//!   [+2] x  [+3] y  [+4] w  [+5] h
//!   [+6] health  [+7] health_max
//!   [+8] is_attacking - 1.0 when the unit has reached its base
//! ```
//!
//! Field order and strides are part of the contract; do not change them
//! without versioning. The buffer is a deterministic function of the
//! snapshot: bases are emitted Player-first and units in spawn order, as the
//! snapshot stores them.

use crate::world::Snapshot;

/// Number of f32 values in the buffer header (base count, unit count).
pub const HEADER_SIZE: usize = 2;

/// Number of f32 values per base block.
pub const BASE_STRIDE: usize = 9;

/// Number of f32 values per unit block.
pub const UNIT_STRIDE: usize = 9;

// Side id constants for the wire format.
pub const SIDE_PLAYER: f32 = 0.0;
pub const SIDE_ENEMY: f32 = 1.0;

// Offsets within a base block.
pub const BASE_FIELD_SIDE: usize = 0;
pub const BASE_FIELD_X: usize = 1;
pub const BASE_FIELD_Y: usize = 2;
pub const BASE_FIELD_W: usize = 3;
pub const BASE_FIELD_H: usize = 4;
pub const BASE_FIELD_HEALTH: usize = 5;
pub const BASE_FIELD_HEALTH_MAX: usize = 6;
pub const BASE_FIELD_HAS_TOWER: usize = 7;
pub const BASE_FIELD_TOWER_RANGE: usize = 8;

// Offsets within a unit block.
pub const UNIT_FIELD_ID: usize = 0;
pub const UNIT_FIELD_SIDE: usize = 1;
pub const UNIT_FIELD_X: usize = 2;
pub const UNIT_FIELD_Y: usize = 3;
pub const UNIT_FIELD_W: usize = 4;
pub const UNIT_FIELD_H: usize = 5;
pub const UNIT_FIELD_HEALTH: usize = 6;
pub const UNIT_FIELD_HEALTH_MAX: usize = 7;
pub const UNIT_FIELD_ATTACKING: usize = 8;

/// Convert a side string to its numeric id. Unknown sides map to Player.
#[inline]
pub fn side_to_id(side: &str) -> f32 {
    match side {
        "Enemy" => SIDE_ENEMY,
        _ => SIDE_PLAYER,
    }
}

/// Buffer offset of base block `i`.
#[inline]
pub const fn base_offset(base_index: usize) -> usize {
    HEADER_SIZE + base_index * BASE_STRIDE
}

/// Buffer offset of unit block `i`, given the number of bases in the buffer.
#[inline]
pub const fn unit_offset(unit_index: usize, base_count: usize) -> usize {
    HEADER_SIZE + base_count * BASE_STRIDE + unit_index * UNIT_STRIDE
}

/// Required buffer size for the given entity counts.
#[inline]
pub const fn calculate_buffer_size(base_count: usize, unit_count: usize) -> usize {
    HEADER_SIZE + base_count * BASE_STRIDE + unit_count * UNIT_STRIDE
}

/// Parse the (base_count, unit_count) header from a flat buffer.
///
/// Returns `None` if the buffer is too short to hold a header.
#[inline]
pub fn parse_counts(buffer: &[f32]) -> Option<(usize, usize)> {
    if buffer.len() < HEADER_SIZE {
        return None;
    }
    Some((buffer[0] as usize, buffer[1] as usize))
}

/// Convert a simulation snapshot to a flat buffer for transfer to the host.
///
/// See the module documentation for the layout. Given the same snapshot, the
/// output is identical.
pub fn snapshot_to_flatbuffer(snapshot: &Snapshot) -> Vec<f32> {
    let base_count = snapshot.bases.len();
    let unit_count = snapshot.units.len();
    let buffer_size = calculate_buffer_size(base_count, unit_count);

    let mut buffer = Vec::with_capacity(buffer_size);
    buffer.push(base_count as f32);
    buffer.push(unit_count as f32);

    for base in &snapshot.bases {
        buffer.push(side_to_id(&base.side));
        buffer.push(base.x);
        buffer.push(base.y);
        buffer.push(base.w);
        buffer.push(base.h);
        buffer.push(base.health);
        buffer.push(base.health_max);
        buffer.push(if base.has_tower { 1.0 } else { 0.0 });
        buffer.push(base.tower_range);
    }

    for unit in &snapshot.units {
        buffer.push(unit.id as f32);
        buffer.push(side_to_id(&unit.side));
        buffer.push(unit.x);
        buffer.push(unit.y);
        buffer.push(unit.w);
        buffer.push(unit.h);
        buffer.push(unit.health);
        buffer.push(unit.health_max);
        buffer.push(if unit.attacking { 1.0 } else { 0.0 });
    }

    debug_assert_eq!(buffer.len(), buffer_size, "buffer size mismatch");
    buffer
}
