use jet_engine::{KeyValueStore, SceneHost, Vec2};
use tracing::{info, warn};

use super::LevelEditor;
use crate::error::{EditorError, LoadError, SaveError};
use crate::object::{Marker, MarkerKind, ObjectKind, ObjectTransform, PlacedObject};
use crate::snapshot::{LevelSnapshot, SavedPlatform, SavedPoint, SavedRock};

/// Visuals built for an incoming level that has not been swapped in yet.
#[derive(Default)]
struct StagedLevel {
    objects: Vec<PlacedObject>,
    start_point: Option<Marker>,
    end_point: Option<Marker>,
}

impl StagedLevel {
    fn discard(self, host: &mut dyn SceneHost) {
        let markers = [self.start_point, self.end_point].into_iter().flatten();
        for visual in self
            .objects
            .iter()
            .map(|object| object.visual)
            .chain(markers.map(|marker| marker.visual))
        {
            host.destroy(visual);
        }
    }
}

impl LevelEditor {
    pub fn snapshot(&self) -> LevelSnapshot {
        let platforms = self
            .platforms()
            .filter_map(|object| match object.kind {
                ObjectKind::Platform { width, height } => Some(SavedPlatform {
                    x: object.transform.position.x,
                    y: object.transform.position.y,
                    width,
                    height,
                    scale: object.transform.scale,
                    rotation: object.transform.rotation,
                }),
                ObjectKind::Rock { .. } => None,
            })
            .collect();
        let rocks = self
            .rocks()
            .filter_map(|object| match object.kind {
                ObjectKind::Rock { rock_type } => Some(SavedRock {
                    x: object.transform.position.x,
                    y: object.transform.position.y,
                    rock_type,
                    scale: object.transform.scale,
                    rotation: object.transform.rotation,
                }),
                ObjectKind::Platform { .. } => None,
            })
            .collect();

        LevelSnapshot {
            platforms,
            rocks,
            start_point: self
                .start_point
                .map(|marker| SavedPoint::from_vec2(marker.position)),
            end_point: self
                .end_point
                .map(|marker| SavedPoint::from_vec2(marker.position)),
        }
    }

    /// Writes the current level under the configured key, replacing whatever
    /// was stored there. Editor state is never touched.
    pub fn save_level(&self, store: &mut dyn KeyValueStore) -> Result<(), SaveError> {
        let snapshot = self.snapshot();
        let key = &self.config.storage_key;
        let json = snapshot.to_json().map_err(SaveError::Encode)?;
        if let Err(source) = store.set(key, &json) {
            warn!(key = %key, error = %source, "save_failed");
            return Err(SaveError::Store {
                key: key.clone(),
                source,
            });
        }
        info!(
            key = %key,
            platforms = snapshot.platforms.len(),
            rocks = snapshot.rocks.len(),
            bytes = json.len(),
            "level_saved"
        );
        Ok(())
    }

    /// Reads the stored level and replaces the current one with it. On any
    /// error the current level is kept as it was.
    pub fn load_level(
        &mut self,
        host: &mut dyn SceneHost,
        store: &dyn KeyValueStore,
    ) -> Result<(), LoadError> {
        let key = self.config.storage_key.clone();
        let raw = match store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Err(LoadError::NotFound { key }),
            Err(source) => return Err(LoadError::Store { key, source }),
        };
        let snapshot = LevelSnapshot::from_json(&raw)?;
        self.apply_snapshot(host, &snapshot)
    }

    pub fn apply_snapshot(
        &mut self,
        host: &mut dyn SceneHost,
        snapshot: &LevelSnapshot,
    ) -> Result<(), LoadError> {
        snapshot.validate()?;
        let staged = self
            .stage_level(host, snapshot)
            .map_err(LoadError::Rebuild)?;

        self.teardown(host);
        self.objects = staged.objects;
        self.start_point = staged.start_point;
        self.end_point = staged.end_point;
        info!(
            platforms = snapshot.platforms.len(),
            rocks = snapshot.rocks.len(),
            has_start = self.start_point.is_some(),
            has_end = self.end_point.is_some(),
            "level_loaded"
        );
        Ok(())
    }

    fn stage_level(
        &mut self,
        host: &mut dyn SceneHost,
        snapshot: &LevelSnapshot,
    ) -> Result<StagedLevel, EditorError> {
        let mut staged = StagedLevel::default();
        if let Err(error) = self.stage_into(host, snapshot, &mut staged) {
            staged.discard(host);
            return Err(error);
        }
        Ok(staged)
    }

    fn stage_into(
        &mut self,
        host: &mut dyn SceneHost,
        snapshot: &LevelSnapshot,
        staged: &mut StagedLevel,
    ) -> Result<(), EditorError> {
        for platform in &snapshot.platforms {
            let kind = ObjectKind::Platform {
                width: platform.width,
                height: platform.height,
            };
            let transform = ObjectTransform {
                position: Vec2::new(platform.x, platform.y),
                rotation: platform.rotation,
                scale: platform.scale,
            };
            staged
                .objects
                .push(self.spawn_object(host, kind, transform)?);
        }
        for rock in &snapshot.rocks {
            let kind = ObjectKind::Rock {
                rock_type: rock.rock_type,
            };
            let transform = ObjectTransform {
                position: Vec2::new(rock.x, rock.y),
                rotation: rock.rotation,
                scale: rock.scale,
            };
            staged
                .objects
                .push(self.spawn_object(host, kind, transform)?);
        }
        if let Some(point) = snapshot.start_point {
            let position = point.to_vec2();
            let visual = self.spawn_marker_visual(host, MarkerKind::Start, position)?;
            staged.start_point = Some(Marker { visual, position });
        }
        if let Some(point) = snapshot.end_point {
            let position = point.to_vec2();
            let visual = self.spawn_marker_visual(host, MarkerKind::End, position)?;
            staged.end_point = Some(Marker { visual, position });
        }
        Ok(())
    }
}
