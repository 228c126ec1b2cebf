//! ECS systems for the Warpath simulation.
//!
//! Systems contain the game logic that operates on components. One tick runs
//! them as a single sequential chain:
//!
//! 1. `spawn_system` - drains queued spawn requests through the cooldown gate
//! 2. `spatial_index_system` - rebuilds the spatial grid from live units
//! 3. `march_system` - advances units with collision avoidance
//! 4. `melee_system` - attacking units strike their target base
//! 5. `tower_system` - towers fire at one in-range unit each
//! 6. `cleanup_system` - despawns units that died this tick

pub mod combat;
pub mod lifecycle;
pub mod movement;
pub mod serialization;
pub mod spawn;

pub use combat::*;
pub use lifecycle::*;
pub use movement::*;
pub use serialization::*;
pub use spawn::*;
