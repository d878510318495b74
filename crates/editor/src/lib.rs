//! Level editor core for the jet game: placement, selection, transform
//! gestures and save/load of platforms, rocks and start/end markers.
//!
//! Rendering and physics stay with the scene host ([`jet_engine::SceneHost`]);
//! persistence goes through a [`jet_engine::KeyValueStore`].

pub mod config;
mod editor;
pub mod error;
pub mod object;
pub mod selection;
pub mod snapshot;
pub mod tool;

pub use config::{EditorConfig, LEVEL_STORAGE_KEY};
pub use editor::{LevelEditor, UiCommand, UiSignal};
pub use error::{EditorError, LoadError, SaveError};
pub use object::{Marker, MarkerKind, ObjectId, ObjectKind, ObjectTag, ObjectTransform, PlacedObject};
pub use selection::{handle_positions, Gesture, HandlePositions, Selection, SelectionHandles};
pub use snapshot::{LevelSnapshot, SavedPlatform, SavedPoint, SavedRock, SnapshotError};
pub use tool::{ParseTokenError, RockType, Tool};
