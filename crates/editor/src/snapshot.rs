use jet_engine::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tool::RockType;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("parse level json: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("parse level json at {path}: {source}")]
    JsonAt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("validation failed at {path}: expected {expected}, got {actual}")]
    Invalid {
        path: String,
        expected: &'static str,
        actual: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedPoint {
    pub x: f32,
    pub y: f32,
}

impl SavedPoint {
    pub fn from_vec2(value: Vec2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedPlatform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedRock {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub rock_type: RockType,
    pub scale: f32,
    pub rotation: f32,
}

/// Serialized level as stored under `currentLevel`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSnapshot {
    pub platforms: Vec<SavedPlatform>,
    pub rocks: Vec<SavedRock>,
    pub start_point: Option<SavedPoint>,
    pub end_point: Option<SavedPoint>,
}

impl LevelSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses and validates a stored level. Any error rejects the whole
    /// snapshot.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let snapshot: LevelSnapshot = match serde_path_to_error::deserialize(&mut deserializer) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                let path = error.path().to_string();
                let source = error.into_inner();
                return if path.is_empty() || path == "." {
                    Err(SnapshotError::Json { source })
                } else {
                    Err(SnapshotError::JsonAt { path, source })
                };
            }
        };
        deserializer
            .end()
            .map_err(|source| SnapshotError::Json { source })?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        for (index, platform) in self.platforms.iter().enumerate() {
            let base = format!("platforms[{index}]");
            check_finite(&base, "x", platform.x)?;
            check_finite(&base, "y", platform.y)?;
            check_positive(&base, "width", platform.width)?;
            check_positive(&base, "height", platform.height)?;
            check_positive(&base, "scale", platform.scale)?;
            check_finite(&base, "rotation", platform.rotation)?;
        }
        for (index, rock) in self.rocks.iter().enumerate() {
            let base = format!("rocks[{index}]");
            check_finite(&base, "x", rock.x)?;
            check_finite(&base, "y", rock.y)?;
            check_positive(&base, "scale", rock.scale)?;
            check_finite(&base, "rotation", rock.rotation)?;
        }
        for (name, point) in [("startPoint", self.start_point), ("endPoint", self.end_point)] {
            if let Some(point) = point {
                check_finite(name, "x", point.x)?;
                check_finite(name, "y", point.y)?;
            }
        }
        Ok(())
    }
}

fn check_finite(base: &str, field: &str, value: f32) -> Result<(), SnapshotError> {
    if value.is_finite() {
        return Ok(());
    }
    Err(SnapshotError::Invalid {
        path: format!("{base}.{field}"),
        expected: "finite number",
        actual: value.to_string(),
    })
}

fn check_positive(base: &str, field: &str, value: f32) -> Result<(), SnapshotError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(SnapshotError::Invalid {
        path: format!("{base}.{field}"),
        expected: "positive finite number",
        actual: value.to_string(),
    })
}
