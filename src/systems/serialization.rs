//! Serialization utilities for simulation state.

use crate::world::Snapshot;

/// Serialize a snapshot to JSON bytes.
pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(snapshot)
}

/// Serialize a snapshot to a JSON string.
pub fn snapshot_to_json_string(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}

/// Deserialize a snapshot from JSON bytes.
pub fn snapshot_from_json(data: &[u8]) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_slice(data)
}

/// Deserialize a snapshot from a JSON string.
pub fn snapshot_from_json_string(data: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BaseSnapshot, UnitSnapshot};

    #[test]
    fn test_snapshot_roundtrip() {
        let snapshot = Snapshot {
            tick: 42,
            time: 1.4,
            bases: vec![BaseSnapshot {
                side: "Enemy".to_string(),
                x: 700.0,
                y: 300.0,
                w: 50.0,
                h: 100.0,
                health: 80.0,
                health_max: 100.0,
                has_tower: true,
                tower_range: 150.0,
            }],
            units: vec![UnitSnapshot {
                id: 3,
                side: "Player".to_string(),
                x: 240.0,
                y: 280.0,
                w: 20.0,
                h: 20.0,
                health: 20.0,
                health_max: 20.0,
                attacking: false,
            }],
        };

        let json = snapshot_to_json_string(&snapshot).unwrap();
        let restored = snapshot_from_json_string(&json).unwrap();

        assert_eq!(restored.tick, 42);
        assert_eq!(restored.bases.len(), 1);
        assert!(restored.bases[0].has_tower);
        assert_eq!(restored.units.len(), 1);
        assert_eq!(restored.units[0].id, 3);
    }
}
