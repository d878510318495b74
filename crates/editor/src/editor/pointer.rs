use jet_engine::{PointerEvent, PointerPhase, SceneHost, Vec2, VisualId, VisualTransform};
use tracing::{debug, warn};

use super::LevelEditor;
use crate::error::EditorError;
use crate::object::{ObjectId, ObjectTag, ObjectTransform};
use crate::selection::{handle_positions, Gesture, Selection, SelectionHandles};
use crate::tool::Tool;

fn hits(host: &dyn SceneHost, visual: VisualId, point: Vec2) -> bool {
    host.bounds(visual)
        .is_some_and(|bounds| bounds.contains(point))
}

impl LevelEditor {
    pub fn handle_pointer(
        &mut self,
        host: &mut dyn SceneHost,
        event: PointerEvent,
    ) -> Result<(), EditorError> {
        match event.phase {
            PointerPhase::Down => self.pointer_down(host, event.position),
            PointerPhase::Move => self.pointer_move(host, event.position),
            PointerPhase::Up => {
                self.pointer_up();
                Ok(())
            }
        }
    }

    pub fn pointer_down(
        &mut self,
        host: &mut dyn SceneHost,
        position: Vec2,
    ) -> Result<(), EditorError> {
        if !self.editing {
            return Ok(());
        }
        match self.tool {
            Tool::Select => self.select_at(host, position),
            Tool::Platform => self.add_platform(host, position).map(|_| ()),
            Tool::Rock => self.add_rock(host, position).map(|_| ()),
            Tool::Start => self.set_start_point(host, position),
            Tool::End => self.set_end_point(host, position),
        }
    }

    pub fn pointer_move(
        &mut self,
        host: &mut dyn SceneHost,
        position: Vec2,
    ) -> Result<(), EditorError> {
        if !self.editing {
            return Ok(());
        }
        let Some(selection) = self.selection else {
            return Ok(());
        };
        let Some(index) = self.object_index(selection.object) else {
            return Ok(());
        };

        let object = &self.objects[index];
        let mut transform = object.transform;
        match selection.gesture {
            Gesture::Idle => return Ok(()),
            Gesture::Dragging => transform.position = position,
            Gesture::Rotating => transform.rotation = transform.position.angle_to(position),
            Gesture::Resizing => {
                transform.scale = self
                    .config
                    .resize_scale(transform.position.distance(position))
            }
        }

        let previous = object.transform;
        let visual = object.visual;
        host.set_transform(visual, transform.to_visual())
            .map_err(EditorError::host("transform object"))?;
        if let Err(error) = self.place_handles(host, selection.handles, &transform) {
            self.restore_transform(host, visual, selection, &previous);
            return Err(error);
        }
        self.objects[index].transform = transform;
        Ok(())
    }

    /// Puts the object visual and its handles back after a partial update.
    fn restore_transform(
        &self,
        host: &mut dyn SceneHost,
        visual: VisualId,
        selection: Selection,
        previous: &ObjectTransform,
    ) {
        let restored = host
            .set_transform(visual, previous.to_visual())
            .map_err(EditorError::host("restore object"))
            .and_then(|()| self.place_handles(host, selection.handles, previous));
        if let Err(error) = restored {
            warn!(
                object = selection.object.0,
                error = %error,
                "transform_rollback_incomplete"
            );
        }
    }

    /// Ends any gesture. Not gated by edit mode.
    pub fn pointer_up(&mut self) {
        if let Some(selection) = self.selection.as_mut() {
            if selection.gesture != Gesture::Idle {
                debug!(
                    object = selection.object.0,
                    gesture = selection.gesture.as_token(),
                    "gesture_ended"
                );
            }
            selection.gesture = Gesture::Idle;
        }
    }

    /// Select-tool press: handles first, then platforms, then rocks; a miss
    /// clears the selection.
    fn select_at(&mut self, host: &mut dyn SceneHost, position: Vec2) -> Result<(), EditorError> {
        if let Some(selection) = self.selection.as_mut() {
            let gesture = if hits(host, selection.handles.resize, position) {
                Some(Gesture::Resizing)
            } else if hits(host, selection.handles.rotation, position) {
                Some(Gesture::Rotating)
            } else {
                None
            };
            if let Some(gesture) = gesture {
                selection.gesture = gesture;
                debug!(
                    object = selection.object.0,
                    gesture = gesture.as_token(),
                    "gesture_started"
                );
                return Ok(());
            }
        }

        match self.find_object_at(host, position) {
            Some(id) => {
                self.select_object(host, id)?;
                if let Some(selection) = self.selection.as_mut() {
                    selection.gesture = Gesture::Dragging;
                }
                Ok(())
            }
            None => {
                self.deselect(host);
                Ok(())
            }
        }
    }

    pub fn find_object_at(&self, host: &dyn SceneHost, position: Vec2) -> Option<ObjectId> {
        [ObjectTag::Platform, ObjectTag::Rock]
            .into_iter()
            .flat_map(|tag| self.objects_tagged(tag))
            .find(|object| hits(host, object.visual, position))
            .map(|object| object.id)
    }

    /// Replaces the selection with `id` and fresh handles. The new handles
    /// are built before the old selection is released.
    pub fn select_object(
        &mut self,
        host: &mut dyn SceneHost,
        id: ObjectId,
    ) -> Result<(), EditorError> {
        let Some(object) = self.object(id) else {
            return Ok(());
        };
        let transform = object.transform;
        let handles = self.spawn_handles(host, &transform)?;
        self.deselect(host);
        self.selection = Some(Selection {
            object: id,
            handles,
            gesture: Gesture::Idle,
        });
        debug!(object = id.0, "object_selected");
        Ok(())
    }

    fn spawn_handles(
        &self,
        host: &mut dyn SceneHost,
        transform: &ObjectTransform,
    ) -> Result<SelectionHandles, EditorError> {
        let positions = handle_positions(transform, self.config.handle_offset);
        let resize = host
            .create_circle(
                positions.resize,
                self.config.handle_radius,
                self.config.resize_handle_color,
            )
            .map_err(EditorError::host("create resize handle"))?;
        let rotation = match host.create_circle(
            positions.rotation,
            self.config.handle_radius,
            self.config.rotation_handle_color,
        ) {
            Ok(rotation) => rotation,
            Err(source) => {
                host.destroy(resize);
                return Err(EditorError::Host {
                    action: "create rotation handle",
                    source,
                });
            }
        };
        Ok(SelectionHandles { resize, rotation })
    }

    fn place_handles(
        &self,
        host: &mut dyn SceneHost,
        handles: SelectionHandles,
        transform: &ObjectTransform,
    ) -> Result<(), EditorError> {
        let positions = handle_positions(transform, self.config.handle_offset);
        host.set_transform(handles.resize, VisualTransform::at(positions.resize))
            .map_err(EditorError::host("move resize handle"))?;
        host.set_transform(handles.rotation, VisualTransform::at(positions.rotation))
            .map_err(EditorError::host("move rotation handle"))
    }
}
