//! The level editor instance owned by the hosting scene.
//!
//! Every operation that creates or destroys visuals takes the scene host
//! explicitly; the editor never holds on to it between calls.

use jet_engine::SceneHost;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::object::{Marker, ObjectId, ObjectTag, PlacedObject};
use crate::selection::{handle_positions, Gesture, HandlePositions, Selection};
use crate::tool::{RockType, Tool};

mod lifecycle;
mod persistence;
mod pointer;
mod ui;

pub use ui::{UiCommand, UiSignal};

#[derive(Debug)]
pub struct LevelEditor {
    config: EditorConfig,
    tool: Tool,
    rock_type: RockType,
    editing: bool,
    objects: Vec<PlacedObject>,
    start_point: Option<Marker>,
    end_point: Option<Marker>,
    selection: Option<Selection>,
    next_object_id: u64,
}

impl Default for LevelEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl LevelEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            tool: Tool::default(),
            rock_type: RockType::default(),
            editing: false,
            objects: Vec::new(),
            start_point: None,
            end_point: None,
            selection: None,
            next_object_id: 0,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn rock_type(&self) -> RockType {
        self.rock_type
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn toolbar_visible(&self) -> bool {
        self.editing
    }

    pub fn rock_picker_visible(&self) -> bool {
        self.tool == Tool::Rock
    }

    /// Switching tools always drops the current selection, even when the
    /// tool does not change.
    pub fn set_tool(&mut self, host: &mut dyn SceneHost, tool: Tool) {
        self.deselect(host);
        if self.tool != tool {
            debug!(from = %self.tool, to = %tool, "tool_changed");
        }
        self.tool = tool;
    }

    /// Applies a toolbar tool name. Unknown names leave the editor untouched.
    pub fn set_tool_named(&mut self, host: &mut dyn SceneHost, name: &str) -> bool {
        match name.parse::<Tool>() {
            Ok(tool) => {
                self.set_tool(host, tool);
                true
            }
            Err(error) => {
                warn!(error = %error, "tool_ignored");
                false
            }
        }
    }

    pub fn set_rock_type(&mut self, rock_type: RockType) {
        self.rock_type = rock_type;
    }

    pub fn set_rock_type_named(&mut self, name: &str) -> bool {
        match name.parse::<RockType>() {
            Ok(rock_type) => {
                self.set_rock_type(rock_type);
                true
            }
            Err(error) => {
                warn!(error = %error, "rock_type_ignored");
                false
            }
        }
    }

    pub fn toggle_edit_mode(&mut self, host: &mut dyn SceneHost) -> bool {
        self.editing = !self.editing;
        self.deselect(host);
        info!(editing = self.editing, "edit_mode_toggled");
        self.editing
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn platforms(&self) -> impl Iterator<Item = &PlacedObject> + '_ {
        self.objects_tagged(ObjectTag::Platform)
    }

    pub fn rocks(&self) -> impl Iterator<Item = &PlacedObject> + '_ {
        self.objects_tagged(ObjectTag::Rock)
    }

    pub fn object(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn start_point(&self) -> Option<&Marker> {
        self.start_point.as_ref()
    }

    pub fn end_point(&self) -> Option<&Marker> {
        self.end_point.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_object(&self) -> Option<&PlacedObject> {
        self.selection
            .as_ref()
            .and_then(|selection| self.object(selection.object))
    }

    /// Dispatcher state; always `Idle` without a selection.
    pub fn gesture(&self) -> Gesture {
        self.selection
            .map(|selection| selection.gesture)
            .unwrap_or_default()
    }

    /// Expected handle positions for the current selection.
    pub fn handle_positions(&self) -> Option<HandlePositions> {
        self.selected_object()
            .map(|object| handle_positions(&object.transform, self.config.handle_offset))
    }

    fn objects_tagged(&self, tag: ObjectTag) -> impl Iterator<Item = &PlacedObject> + '_ {
        self.objects.iter().filter(move |object| object.tag() == tag)
    }

    fn object_index(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|object| object.id == id)
    }

    fn allocate_object_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id = self.next_object_id.saturating_add(1);
        id
    }

    pub(crate) fn deselect(&mut self, host: &mut dyn SceneHost) {
        if let Some(selection) = self.selection.take() {
            host.destroy(selection.handles.resize);
            host.destroy(selection.handles.rotation);
            debug!(object = selection.object.0, "object_deselected");
        }
    }
}
