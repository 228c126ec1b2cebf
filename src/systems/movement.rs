//! Movement system - marches units toward the enemy base.

use crate::components::*;
use crate::spatial::SpatialGrid;
use bevy_ecs::prelude::*;

/// Resource containing the delta time for the current tick.
#[derive(Resource, Default)]
pub struct DeltaTime(pub f32);

/// System that advances marching units toward their target base.
///
/// Each alive, marching unit steps toward the enemy base by `speed * dt`,
/// clamped to the remaining gap. The step is refused when the moved
/// rectangle would intersect any other live unit, so no movement ever
/// produces an overlap. On closing the gap the unit transitions to
/// `Attacking` and stops for good.
///
/// Accepted moves are written back to the spatial grid immediately, so each
/// unit's collision check sees the positions of units that already moved
/// this tick.
pub fn march_system(
    dt: Res<DeltaTime>,
    mut grid: ResMut<SpatialGrid>,
    bases: Query<(&Side, &Bounds), (With<Base>, Without<Unit>)>,
    mut units: Query<
        (
            Entity,
            &UnitId,
            &Side,
            &mut Bounds,
            &mut UnitState,
            &UnitStats,
            &Health,
        ),
        (With<Unit>, Without<Base>),
    >,
) {
    let delta = dt.0;

    let mut base_bounds: [Option<Bounds>; 2] = [None, None];
    for (side, bounds) in bases.iter() {
        base_bounds[side.as_index() as usize] = Some(*bounds);
    }

    for (entity, id, side, mut bounds, mut state, stats, health) in units.iter_mut() {
        if !health.is_alive() || state.is_attacking() {
            continue;
        }

        // Nowhere to march without a target base.
        let target = match base_bounds[side.opponent().as_index() as usize] {
            Some(target) => target,
            None => continue,
        };

        // March along x toward the target's near edge.
        let (target_cx, _) = target.center();
        let (unit_cx, _) = bounds.center();
        let toward_right = target_cx > unit_cx;
        let gap = if toward_right {
            target.left() - bounds.right()
        } else {
            bounds.left() - target.right()
        };

        if gap <= 0.0 {
            *state = UnitState::Attacking;
            tracing::debug!(unit = id.0, side = side.as_str(), "unit reached base");
            continue;
        }

        let full_step = stats.speed * delta;
        let arrives = full_step >= gap;
        let step = full_step.min(gap);
        let dir = if toward_right { 1.0 } else { -1.0 };
        let proposed = bounds.translated(dir * step, 0.0);

        if grid.overlaps_any(&proposed, entity) {
            continue;
        }

        *bounds = proposed;
        grid.insert(entity, *id, proposed, *side);
        if arrives {
            *state = UnitState::Attacking;
            tracing::debug!(unit = id.0, side = side.as_str(), "unit reached base");
        }
    }
}
