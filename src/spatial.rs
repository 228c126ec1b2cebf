//! Spatial partitioning for efficient overlap queries.
//!
//! Divides the field into cells and tracks which unit rectangles touch each
//! cell, so a movement step only checks candidates from nearby cells instead
//! of every unit on the field.

use crate::components::{Bounds, Health, Side, Unit, UnitId};
use bevy_ecs::prelude::*;
use std::collections::{HashMap, HashSet};

/// Grid-based spatial index over unit bounding rectangles.
///
/// A rectangle is registered in every cell it touches. Entries are
/// re-inserted as units move, so queries always see live positions within a
/// tick.
#[derive(Resource, Debug)]
pub struct SpatialGrid {
    /// Cell size in world units.
    pub cell_size: f32,
    /// Map from cell coordinates to entries touching that cell.
    cells: HashMap<(i32, i32), Vec<SpatialEntry>>,
    /// Reverse lookup: entity to the cells it is registered in.
    entity_cells: HashMap<Entity, Vec<(i32, i32)>>,
}

/// Entry in a spatial cell.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub entity: Entity,
    pub unit: UnitId,
    pub bounds: Bounds,
    pub side: Side,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(40.0)
    }
}

impl SpatialGrid {
    /// Create a new spatial grid with the given cell size.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            entity_cells: HashMap::new(),
        }
    }

    /// Inclusive cell range covered by a rectangle.
    fn cell_span(&self, bounds: &Bounds) -> ((i32, i32), (i32, i32)) {
        let min = (
            (bounds.left() / self.cell_size).floor() as i32,
            (bounds.top() / self.cell_size).floor() as i32,
        );
        let max = (
            (bounds.right() / self.cell_size).floor() as i32,
            (bounds.bottom() / self.cell_size).floor() as i32,
        );
        (min, max)
    }

    /// Clear all entries (call before rebuilding each tick).
    pub fn clear(&mut self) {
        self.cells.clear();
        self.entity_cells.clear();
    }

    /// Insert or re-insert an entity. An existing registration is removed
    /// first, so this is also the "entity moved" update.
    pub fn insert(&mut self, entity: Entity, unit: UnitId, bounds: Bounds, side: Side) {
        self.remove(entity);

        let entry = SpatialEntry {
            entity,
            unit,
            bounds,
            side,
        };
        let ((min_x, min_y), (max_x, max_y)) = self.cell_span(&bounds);
        let mut touched = Vec::with_capacity(((max_x - min_x + 1) * (max_y - min_y + 1)) as usize);
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                self.cells.entry((cx, cy)).or_default().push(entry);
                touched.push((cx, cy));
            }
        }
        self.entity_cells.insert(entity, touched);
    }

    /// Remove an entity from the grid.
    pub fn remove(&mut self, entity: Entity) {
        if let Some(cells) = self.entity_cells.remove(&entity) {
            for cell in cells {
                if let Some(entries) = self.cells.get_mut(&cell) {
                    entries.retain(|e| e.entity != entity);
                }
            }
        }
    }

    /// True if any registered rectangle other than `exclude` intersects
    /// `bounds`.
    pub fn overlaps_any(&self, bounds: &Bounds, exclude: Entity) -> bool {
        let ((min_x, min_y), (max_x, max_y)) = self.cell_span(bounds);
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                if let Some(entries) = self.cells.get(&(cx, cy)) {
                    for entry in entries {
                        if entry.entity != exclude && entry.bounds.intersects(bounds) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// All entries of one side whose rectangle center lies within `radius`
    /// of the point. Each entity appears once.
    pub fn query_side_in_radius(
        &self,
        x: f32,
        y: f32,
        radius: f32,
        side: Side,
    ) -> Vec<SpatialEntry> {
        let probe = Bounds::new(x - radius, y - radius, radius * 2.0, radius * 2.0);
        let ((min_x, min_y), (max_x, max_y)) = self.cell_span(&probe);
        let radius_sq = radius * radius;

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for cx in min_x..=max_x {
            for cy in min_y..=max_y {
                if let Some(entries) = self.cells.get(&(cx, cy)) {
                    for entry in entries {
                        if entry.side != side || !seen.insert(entry.entity) {
                            continue;
                        }
                        let (ex, ey) = entry.bounds.center();
                        let dist_sq = (ex - x).powi(2) + (ey - y).powi(2);
                        if dist_sq <= radius_sq {
                            results.push(*entry);
                        }
                    }
                }
            }
        }
        results
    }

    /// Total registered entity count.
    pub fn total_count(&self) -> usize {
        self.entity_cells.len()
    }
}

/// System that rebuilds the spatial index from live units at the start of
/// each tick. Movement keeps entries current afterwards.
pub fn spatial_index_system(
    mut grid: ResMut<SpatialGrid>,
    query: Query<(Entity, &UnitId, &Bounds, &Side, &Health), With<Unit>>,
) {
    grid.clear();

    for (entity, unit, bounds, side, health) in query.iter() {
        if !health.is_alive() {
            continue;
        }
        grid.insert(entity, *unit, *bounds, *side);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_overlap_query() {
        let mut grid = SpatialGrid::new(40.0);

        let e1 = Entity::from_raw(1);
        let e2 = Entity::from_raw(2);

        grid.insert(e1, UnitId(0), Bounds::new(0.0, 0.0, 20.0, 20.0), Side::Player);
        grid.insert(e2, UnitId(1), Bounds::new(100.0, 0.0, 20.0, 20.0), Side::Player);

        // Overlapping e1, excluding e2
        assert!(grid.overlaps_any(&Bounds::new(10.0, 10.0, 20.0, 20.0), e2));
        // Excluding e1 itself leaves nothing in the way
        assert!(!grid.overlaps_any(&Bounds::new(10.0, 10.0, 20.0, 20.0), e1));
        // Flush contact is not an overlap
        assert!(!grid.overlaps_any(&Bounds::new(20.0, 0.0, 20.0, 20.0), e2));
    }

    #[test]
    fn test_rect_spans_multiple_cells() {
        let mut grid = SpatialGrid::new(10.0);
        let e1 = Entity::from_raw(1);

        // 25x25 rect starting at 5,5 touches cells (0..=3, 0..=3)
        grid.insert(e1, UnitId(0), Bounds::new(5.0, 5.0, 25.0, 25.0), Side::Enemy);

        let other = Entity::from_raw(99);
        assert!(grid.overlaps_any(&Bounds::new(28.0, 28.0, 4.0, 4.0), other));
        assert!(!grid.overlaps_any(&Bounds::new(40.0, 40.0, 4.0, 4.0), other));
    }

    #[test]
    fn test_reinsert_moves_entry() {
        let mut grid = SpatialGrid::new(40.0);
        let e1 = Entity::from_raw(1);
        let probe = Entity::from_raw(99);

        grid.insert(e1, UnitId(0), Bounds::new(0.0, 0.0, 20.0, 20.0), Side::Player);
        grid.insert(e1, UnitId(0), Bounds::new(200.0, 0.0, 20.0, 20.0), Side::Player);

        assert_eq!(grid.total_count(), 1);
        assert!(!grid.overlaps_any(&Bounds::new(5.0, 5.0, 5.0, 5.0), probe));
        assert!(grid.overlaps_any(&Bounds::new(205.0, 5.0, 5.0, 5.0), probe));
    }

    #[test]
    fn test_query_side_in_radius() {
        let mut grid = SpatialGrid::new(40.0);

        grid.insert(
            Entity::from_raw(1),
            UnitId(0),
            Bounds::new(0.0, 0.0, 20.0, 20.0),
            Side::Player,
        );
        grid.insert(
            Entity::from_raw(2),
            UnitId(1),
            Bounds::new(60.0, 0.0, 20.0, 20.0),
            Side::Player,
        );
        grid.insert(
            Entity::from_raw(3),
            UnitId(2),
            Bounds::new(30.0, 0.0, 20.0, 20.0),
            Side::Enemy,
        );

        // Around (10, 10): unit 1 center is at distance 0, unit 2 center at 60
        let hits = grid.query_side_in_radius(10.0, 10.0, 50.0, Side::Player);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, Entity::from_raw(1));

        let hits = grid.query_side_in_radius(10.0, 10.0, 100.0, Side::Player);
        assert_eq!(hits.len(), 2);

        let hits = grid.query_side_in_radius(10.0, 10.0, 100.0, Side::Enemy);
        assert_eq!(hits.len(), 1);
    }
}
