use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;

use edda_core::{ServerPositions, Timeline};

use crate::error::IoError;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let content = std::fs::read_to_string(path).map_err(|e| IoError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| IoError::json(path, e))
}

/// Load a frame timeline: a JSON object of time → frame.
pub fn load_timeline(path: impl AsRef<Path>) -> Result<Timeline, IoError> {
    let path = path.as_ref();
    let timeline: Timeline = read_json(path)?;
    info!("loaded {} frames from {}", timeline.len(), path.display());
    Ok(timeline)
}

/// Load server positions: a JSON object of server id → `{x, y}`.
pub fn load_positions(path: impl AsRef<Path>) -> Result<ServerPositions, IoError> {
    let path = path.as_ref();
    let positions: ServerPositions = read_json(path)?;
    info!("loaded {} server positions from {}", positions.len(), path.display());
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edda_core::{Point, RelationKind};

    #[test]
    fn test_load_timeline_and_positions() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames.json");
        let servers = dir.path().join("servers.json");
        std::fs::write(
            &frames,
            r#"{ "0": { "links": { "a": ["b"] } }, "1": { "syncs": { "b": ["a"] } } }"#,
        )
        .unwrap();
        std::fs::write(&servers, r#"{ "a": { "x": 1, "y": 2 }, "b": { "x": 3, "y": 4 } }"#)
            .unwrap();

        let timeline = load_timeline(&frames).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.frame_at(1).unwrap().edge_count(RelationKind::Sync), 1);

        let positions = load_positions(&servers).unwrap();
        assert_eq!(positions.get("b"), Some(Point::new(3.0, 4.0)));
        assert!(timeline.check_integrity(&positions).is_empty());
    }

    #[test]
    fn test_malformed_json_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("broken.json");
        std::fs::write(&frames, "{ \"0\": ").unwrap();

        let err = load_timeline(&frames).unwrap_err();
        assert!(matches!(err, IoError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
