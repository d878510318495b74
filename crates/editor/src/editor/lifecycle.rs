use jet_engine::{SceneHost, Vec2, VisualId};
use tracing::{debug, info};

use super::LevelEditor;
use crate::error::EditorError;
use crate::object::{Marker, MarkerKind, ObjectId, ObjectKind, ObjectTransform, PlacedObject};

impl LevelEditor {
    pub fn add_platform(
        &mut self,
        host: &mut dyn SceneHost,
        position: Vec2,
    ) -> Result<ObjectId, EditorError> {
        let kind = ObjectKind::Platform {
            width: self.config.platform_width,
            height: self.config.platform_height,
        };
        let object = self.spawn_object(host, kind, ObjectTransform::at(position, 1.0))?;
        Ok(self.push_object(object))
    }

    pub fn add_rock(
        &mut self,
        host: &mut dyn SceneHost,
        position: Vec2,
    ) -> Result<ObjectId, EditorError> {
        let kind = ObjectKind::Rock {
            rock_type: self.rock_type,
        };
        let transform = ObjectTransform::at(position, self.config.rock_scale);
        let object = self.spawn_object(host, kind, transform)?;
        Ok(self.push_object(object))
    }

    pub fn set_start_point(
        &mut self,
        host: &mut dyn SceneHost,
        position: Vec2,
    ) -> Result<(), EditorError> {
        self.set_marker(host, MarkerKind::Start, position)
    }

    pub fn set_end_point(
        &mut self,
        host: &mut dyn SceneHost,
        position: Vec2,
    ) -> Result<(), EditorError> {
        self.set_marker(host, MarkerKind::End, position)
    }

    /// Removes the selected object together with its handles. Returns the
    /// removed id, or `None` when nothing was selected.
    pub fn delete_selected(&mut self, host: &mut dyn SceneHost) -> Option<ObjectId> {
        let selection = self.selection.take()?;
        host.destroy(selection.handles.resize);
        host.destroy(selection.handles.rotation);
        if let Some(index) = self.object_index(selection.object) {
            let object = self.objects.remove(index);
            host.destroy(object.visual);
            info!(
                object = object.id.0,
                kind = object.tag().as_token(),
                "object_deleted"
            );
        }
        Some(selection.object)
    }

    /// Destroys every visual the editor owns and forgets the level.
    pub fn teardown(&mut self, host: &mut dyn SceneHost) {
        self.deselect(host);
        for object in self.objects.drain(..) {
            host.destroy(object.visual);
        }
        for marker in [self.start_point.take(), self.end_point.take()]
            .into_iter()
            .flatten()
        {
            host.destroy(marker.visual);
        }
    }

    fn set_marker(
        &mut self,
        host: &mut dyn SceneHost,
        kind: MarkerKind,
        position: Vec2,
    ) -> Result<(), EditorError> {
        let visual = self.spawn_marker_visual(host, kind, position)?;
        let slot = match kind {
            MarkerKind::Start => &mut self.start_point,
            MarkerKind::End => &mut self.end_point,
        };
        if let Some(previous) = slot.replace(Marker { visual, position }) {
            host.destroy(previous.visual);
        }
        debug!(
            marker = kind.as_token(),
            x = position.x,
            y = position.y,
            "marker_set"
        );
        Ok(())
    }

    pub(super) fn spawn_marker_visual(
        &self,
        host: &mut dyn SceneHost,
        kind: MarkerKind,
        position: Vec2,
    ) -> Result<VisualId, EditorError> {
        let color = match kind {
            MarkerKind::Start => self.config.start_marker_color,
            MarkerKind::End => self.config.end_marker_color,
        };
        host.create_circle(position, self.config.marker_radius, color)
            .map_err(EditorError::host("create marker"))
    }

    /// Creates the visual for an object and registers it as a static body.
    /// On failure nothing created here is left behind in the host.
    pub(super) fn spawn_object(
        &mut self,
        host: &mut dyn SceneHost,
        kind: ObjectKind,
        transform: ObjectTransform,
    ) -> Result<PlacedObject, EditorError> {
        let visual = match kind {
            ObjectKind::Platform { width, height } => host
                .create_rectangle(
                    transform.position,
                    width,
                    height,
                    self.config.platform_color,
                )
                .map_err(EditorError::host("create platform"))?,
            ObjectKind::Rock { rock_type } => host
                .create_sprite(transform.position, rock_type.sprite_key())
                .map_err(EditorError::host("create rock"))?,
        };

        let finished = host
            .set_transform(visual, transform.to_visual())
            .map_err(EditorError::host("transform object"))
            .and_then(|()| {
                host.register_static_body(visual)
                    .map_err(EditorError::host("register static body"))
            });
        if let Err(error) = finished {
            host.destroy(visual);
            return Err(error);
        }

        Ok(PlacedObject {
            id: self.allocate_object_id(),
            visual,
            kind,
            transform,
        })
    }

    fn push_object(&mut self, object: PlacedObject) -> ObjectId {
        let id = object.id;
        debug!(
            object = id.0,
            kind = object.tag().as_token(),
            x = object.transform.position.x,
            y = object.transform.position.y,
            "object_added"
        );
        self.objects.push(object);
        id
    }
}
