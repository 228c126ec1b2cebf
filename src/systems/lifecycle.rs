//! Lifecycle system - prunes dead units at the end of each tick.

use crate::components::*;
use bevy_ecs::prelude::*;

/// System that despawns units whose health has reached zero. Bases are never
/// removed; a destroyed base simply stops accumulating damage.
pub fn cleanup_system(
    mut commands: Commands,
    query: Query<(Entity, &UnitId, &Side, &Health), With<Unit>>,
) {
    for (entity, id, side, health) in query.iter() {
        if health.is_destroyed() {
            tracing::debug!(unit = id.0, side = side.as_str(), "unit removed");
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_units_are_despawned() {
        let mut world = World::new();
        let dead = world
            .spawn(UnitBundle::new(
                UnitId(0),
                Side::Player,
                Bounds::new(100.0, 280.0, 20.0, 20.0),
                20.0,
                UnitStats::default(),
            ))
            .id();
        world.get_mut::<Health>(dead).unwrap().damage(20.0);

        let alive = world
            .spawn(UnitBundle::new(
                UnitId(1),
                Side::Player,
                Bounds::new(140.0, 280.0, 20.0, 20.0),
                20.0,
                UnitStats::default(),
            ))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(cleanup_system);
        schedule.run(&mut world);

        assert!(world.get::<UnitId>(dead).is_none());
        assert!(world.get::<UnitId>(alive).is_some());
    }

    #[test]
    fn test_destroyed_base_is_kept() {
        let mut world = World::new();
        let base = world
            .spawn(BaseBundle::new(
                Side::Enemy,
                Bounds::new(700.0, 300.0, 50.0, 100.0),
                10.0,
            ))
            .id();
        world.get_mut::<Health>(base).unwrap().damage(10.0);

        let mut schedule = Schedule::default();
        schedule.add_systems(cleanup_system);
        schedule.run(&mut world);

        let health = world.get::<Health>(base);
        assert!(health.is_some());
        assert!(health.unwrap().is_destroyed());
    }
}
