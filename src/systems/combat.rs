//! Combat systems - melee strikes against bases and tower fire against units.

use crate::components::*;
use crate::config::SimConfig;
use crate::spatial::SpatialGrid;
use crate::systems::movement::DeltaTime;
use bevy_ecs::prelude::*;

/// System that resolves melee damage from attacking units.
///
/// Each alive, attacking unit advances its strike clock by one tick; when the
/// clock reaches the ticks-per-strike threshold (one simulated second) the
/// unit deals its melee damage to the enemy base and the clock resets.
/// Damage to each base is accumulated first and applied once, clamped at
/// zero health.
pub fn melee_system(
    config: Res<SimConfig>,
    mut units: Query<
        (&Side, &UnitState, &UnitStats, &mut AttackClock, &Health),
        (With<Unit>, Without<Base>),
    >,
    mut bases: Query<(&Side, &mut Health), With<Base>>,
) {
    let ticks_per_strike = config.ticks_per_strike();
    let mut pending = [0.0f32; 2];

    for (side, state, stats, mut clock, health) in units.iter_mut() {
        if !health.is_alive() || !state.is_attacking() {
            continue;
        }
        if clock.advance(ticks_per_strike) {
            pending[side.opponent().as_index() as usize] += stats.melee_damage;
        }
    }

    for (side, mut health) in bases.iter_mut() {
        let damage = pending[side.as_index() as usize];
        if damage <= 0.0 {
            continue;
        }
        let was_alive = health.is_alive();
        health.damage(damage);
        if was_alive && health.is_destroyed() {
            tracing::info!(side = side.as_str(), "base destroyed");
        }
    }
}

/// System that resolves tower fire.
///
/// Each base with a tower scans enemy units whose center lies in range in
/// unit-list order (ascending unit id, i.e. spawn order) and damages at most
/// the first one per tick by `damage_per_second * dt`. Since units cannot
/// overtake each other, the oldest in-range unit is also the most advanced.
pub fn tower_system(
    dt: Res<DeltaTime>,
    grid: Res<SpatialGrid>,
    bases: Query<(&Side, &Bounds, &Tower), With<Base>>,
    mut units: Query<(&UnitId, &mut Health), (With<Unit>, Without<Base>)>,
) {
    let delta = dt.0;

    for (side, bounds, tower) in bases.iter() {
        let (cx, cy) = bounds.center();
        let mut in_range = grid.query_side_in_radius(cx, cy, tower.range, side.opponent());
        in_range.sort_by_key(|entry| entry.unit);

        for entry in in_range {
            if let Ok((id, mut health)) = units.get_mut(entry.entity) {
                if !health.is_alive() {
                    continue;
                }
                health.damage(tower.damage_per_second * delta);
                if health.is_destroyed() {
                    tracing::debug!(unit = id.0, "unit killed by tower");
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::spatial_index_system;

    fn attacking_unit(world: &mut World, id: u32, x: f32) -> Entity {
        let mut bundle = UnitBundle::new(
            UnitId(id),
            Side::Player,
            Bounds::new(x, 280.0, 20.0, 20.0),
            20.0,
            UnitStats {
                speed: 60.0,
                melee_damage: 10.0,
            },
        );
        bundle.state = UnitState::Attacking;
        world.spawn(bundle).id()
    }

    #[test]
    fn test_melee_strikes_once_per_second() {
        let mut world = World::new();
        world.insert_resource(SimConfig::default());
        let base = world
            .spawn(BaseBundle::new(
                Side::Enemy,
                Bounds::new(700.0, 300.0, 50.0, 100.0),
                100.0,
            ))
            .id();
        attacking_unit(&mut world, 0, 680.0);

        let mut schedule = Schedule::default();
        schedule.add_systems(melee_system);

        // 29 ticks at 30 Hz: no strike yet.
        for _ in 0..29 {
            schedule.run(&mut world);
        }
        assert_eq!(world.get::<Health>(base).unwrap().current, 100.0);

        // The 30th tick lands the strike.
        schedule.run(&mut world);
        assert_eq!(world.get::<Health>(base).unwrap().current, 90.0);

        // And the clock resets: the next strike is 30 ticks out again.
        schedule.run(&mut world);
        assert_eq!(world.get::<Health>(base).unwrap().current, 90.0);
    }

    #[test]
    fn test_marching_unit_does_not_strike() {
        let mut world = World::new();
        world.insert_resource(SimConfig::default());
        let base = world
            .spawn(BaseBundle::new(
                Side::Enemy,
                Bounds::new(700.0, 300.0, 50.0, 100.0),
                100.0,
            ))
            .id();
        world.spawn(UnitBundle::new(
            UnitId(0),
            Side::Player,
            Bounds::new(100.0, 280.0, 20.0, 20.0),
            20.0,
            UnitStats::default(),
        ));

        let mut schedule = Schedule::default();
        schedule.add_systems(melee_system);
        for _ in 0..60 {
            schedule.run(&mut world);
        }
        assert_eq!(world.get::<Health>(base).unwrap().current, 100.0);
    }

    #[test]
    fn test_base_health_never_negative() {
        let mut world = World::new();
        world.insert_resource(SimConfig::default());
        let base = world
            .spawn(BaseBundle::new(
                Side::Enemy,
                Bounds::new(700.0, 300.0, 50.0, 100.0),
                15.0,
            ))
            .id();
        // Two attackers at 10 damage per strike against 15 health.
        attacking_unit(&mut world, 0, 680.0);
        attacking_unit(&mut world, 1, 660.0);

        let mut schedule = Schedule::default();
        schedule.add_systems(melee_system);
        for _ in 0..120 {
            schedule.run(&mut world);
        }

        let health = world.get::<Health>(base).unwrap();
        assert_eq!(health.current, 0.0);
        assert!(health.is_destroyed());
    }

    fn tower_world() -> (World, Schedule) {
        let mut world = World::new();
        world.insert_resource(DeltaTime(0.1));
        world.insert_resource(SpatialGrid::new(40.0));
        world.spawn((
            BaseBundle::new(Side::Enemy, Bounds::new(700.0, 300.0, 50.0, 100.0), 100.0),
            Tower {
                range: 150.0,
                damage_per_second: 5.0,
            },
        ));

        let mut schedule = Schedule::default();
        schedule.add_systems((spatial_index_system, tower_system).chain());
        (world, schedule)
    }

    fn marching_unit(world: &mut World, id: u32, x: f32) -> Entity {
        world
            .spawn(UnitBundle::new(
                UnitId(id),
                Side::Player,
                Bounds::new(x, 280.0, 20.0, 20.0),
                20.0,
                UnitStats::default(),
            ))
            .id()
    }

    #[test]
    fn test_tower_damages_at_most_one_unit_per_tick() {
        let (mut world, mut schedule) = tower_world();
        let first = marching_unit(&mut world, 0, 650.0);
        let second = marching_unit(&mut world, 1, 600.0);

        schedule.run(&mut world);

        // Both are in range; only the first unit in spawn order takes the
        // tick's damage.
        let first_health = world.get::<Health>(first).unwrap();
        let second_health = world.get::<Health>(second).unwrap();
        assert!((first_health.current - 19.5).abs() < 0.001);
        assert_eq!(second_health.current, 20.0);
    }

    #[test]
    fn test_tower_ignores_out_of_range_units() {
        let (mut world, mut schedule) = tower_world();
        let distant = marching_unit(&mut world, 0, 100.0);

        for _ in 0..20 {
            schedule.run(&mut world);
        }
        assert_eq!(world.get::<Health>(distant).unwrap().current, 20.0);
    }

    #[test]
    fn test_tower_damage_scales_with_timestep() {
        let (mut world, mut schedule) = tower_world();
        let target = marching_unit(&mut world, 0, 650.0);

        // 10 ticks of 0.1 s at 5 damage per second: one full second of fire.
        for _ in 0..10 {
            schedule.run(&mut world);
        }
        let health = world.get::<Health>(target).unwrap();
        assert!((health.current - 15.0).abs() < 0.001);
    }
}
