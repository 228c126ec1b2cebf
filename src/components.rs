//! ECS components for the Warpath simulation.
//!
//! Components are pure data containers attached to entities.
//! All game logic lives in systems that query these components.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// SPATIAL COMPONENTS
// ============================================================================

/// Axis-aligned bounding rectangle, top-left origin (x grows right, y grows
/// down, matching screen coordinates in the host renderer).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict rectangle intersection. Rectangles that merely touch along an
    /// edge do not intersect, so a unit standing flush against another is
    /// legal.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn distance_to_center(&self, other: &Bounds) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        let dx = ax - bx;
        let dy = ay - by;
        (dx * dx + dy * dy).sqrt()
    }
}

// ============================================================================
// IDENTITY COMPONENTS
// ============================================================================

/// Unique identifier for a unit, allocated in spawn order.
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

impl Default for UnitId {
    fn default() -> Self {
        Self(0)
    }
}

/// Which lane end an entity belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Enemy => "Enemy",
        }
    }

    /// Stable numeric id, used by the spatial grid and the frame bridge.
    pub fn as_index(&self) -> u8 {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

impl Default for Side {
    fn default() -> Self {
        Self::Player
    }
}

// ============================================================================
// COMBAT COMPONENTS
// ============================================================================

/// Health of a base or unit. Damage clamps at zero; there is no overheal.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn is_destroyed(&self) -> bool {
        !self.is_alive()
    }

    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Per-unit tuning values.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitStats {
    /// March speed in world units per second.
    pub speed: f32,
    /// Damage dealt to the target base per melee strike (one strike per
    /// simulated second).
    pub melee_damage: f32,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            speed: 60.0,
            melee_damage: 10.0,
        }
    }
}

/// March/attack state of a unit. The transition to `Attacking` happens once,
/// on reaching the target base, and is never reversed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    Marching,
    Attacking,
}

impl Default for UnitState {
    fn default() -> Self {
        Self::Marching
    }
}

impl UnitState {
    pub fn is_attacking(&self) -> bool {
        matches!(self, UnitState::Attacking)
    }
}

/// Tick accumulator driving melee strikes. A strike fires when the counter
/// reaches the configured ticks-per-strike threshold, then resets.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackClock {
    pub ticks: u32,
}

impl AttackClock {
    /// Advance one tick. Returns true when the strike fires.
    pub fn advance(&mut self, ticks_per_strike: u32) -> bool {
        self.ticks += 1;
        if self.ticks >= ticks_per_strike {
            self.ticks = 0;
            true
        } else {
            false
        }
    }
}

/// Ranged defense attached to a base. Damages at most one in-range unit per
/// tick, scaled by the timestep to approximate continuous damage per second.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    /// Targeting radius, measured center to center.
    pub range: f32,
    pub damage_per_second: f32,
}

impl Default for Tower {
    fn default() -> Self {
        Self {
            range: 150.0,
            damage_per_second: 5.0,
        }
    }
}

// ============================================================================
// MARKERS & BUNDLES
// ============================================================================

/// Marker for base entities.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Base;

/// Marker for unit entities.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Unit;

/// Bundle for spawning a base entity. Towers are added separately via the
/// `Tower` component.
#[derive(Bundle, Default)]
pub struct BaseBundle {
    pub marker: Base,
    pub side: Side,
    pub bounds: Bounds,
    pub health: Health,
}

impl BaseBundle {
    pub fn new(side: Side, bounds: Bounds, health: f32) -> Self {
        Self {
            marker: Base,
            side,
            bounds,
            health: Health::new(health),
        }
    }
}

/// Bundle for spawning a complete unit entity.
#[derive(Bundle, Default)]
pub struct UnitBundle {
    pub marker: Unit,
    pub id: UnitId,
    pub side: Side,
    pub bounds: Bounds,
    pub health: Health,
    pub stats: UnitStats,
    pub state: UnitState,
    pub clock: AttackClock,
}

impl UnitBundle {
    pub fn new(id: UnitId, side: Side, bounds: Bounds, health: f32, stats: UnitStats) -> Self {
        Self {
            marker: Unit,
            id,
            side,
            bounds,
            health: Health::new(health),
            stats,
            state: UnitState::Marching,
            clock: AttackClock::default(),
        }
    }
}
