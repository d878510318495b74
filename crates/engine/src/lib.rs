use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod host;
pub mod storage;

pub use host::{
    Bounds, Color, HostError, PointerEvent, PointerPhase, SceneHost, SceneWorld, SpriteKey,
    SpriteKeyError, Vec2, Visual, VisualId, VisualShape, VisualTransform, DEFAULT_SPRITE_SIZE,
    SPRITE_KEY_MAX_LEN,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub const DATA_DIR_ENV_VAR: &str = "JET_LEVEL_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "levels";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("{var} is set but empty")]
    EmptyEnvVar { var: &'static str },
    #[error("data directory path exists but is not a directory: {path}")]
    NotADirectory { path: PathBuf },
    #[error("failed to create data directory at {path}: {source}")]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves where level files live: `JET_LEVEL_DATA_DIR` wins, then the
/// caller's explicit choice, then `./levels`. The directory is created if it
/// does not exist yet.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf, StartupError> {
    let dir = match env::var(DATA_DIR_ENV_VAR) {
        Ok(value) if value.trim().is_empty() => {
            return Err(StartupError::EmptyEnvVar {
                var: DATA_DIR_ENV_VAR,
            })
        }
        Ok(value) => PathBuf::from(value),
        Err(env::VarError::NotPresent) => explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        Err(source) => {
            return Err(StartupError::EnvVar {
                var: DATA_DIR_ENV_VAR,
                source,
            })
        }
    };
    ensure_data_dir(&dir)?;
    Ok(normalize_path(&dir))
}

fn ensure_data_dir(dir: &Path) -> Result<(), StartupError> {
    if dir.exists() && !dir.is_dir() {
        return Err(StartupError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    fs::create_dir_all(dir).map_err(|source| StartupError::CreateDataDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
