use jet_engine::{KeyValueStore, SceneHost};

use super::LevelEditor;
use crate::error::{LoadError, SaveError};

/// Toolbar intents delivered by the UI host. Names arrive as the raw button
/// tokens; validation happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetTool(String),
    SetRockType(String),
    DeleteSelected,
    SaveLevel,
    LoadLevel,
    ToggleEditMode,
}

/// What the UI host should show after a command.
#[derive(Debug)]
pub enum UiSignal {
    Applied,
    Ignored,
    Saved,
    SaveFailed(SaveError),
    Loaded,
    LoadFailed(LoadError),
}

impl LevelEditor {
    pub fn apply_ui_command(
        &mut self,
        host: &mut dyn SceneHost,
        store: &mut dyn KeyValueStore,
        command: UiCommand,
    ) -> UiSignal {
        match command {
            UiCommand::SetTool(name) => applied_if(self.set_tool_named(host, &name)),
            UiCommand::SetRockType(name) => applied_if(self.set_rock_type_named(&name)),
            UiCommand::DeleteSelected => applied_if(self.delete_selected(host).is_some()),
            UiCommand::SaveLevel => match self.save_level(store) {
                Ok(()) => UiSignal::Saved,
                Err(error) => UiSignal::SaveFailed(error),
            },
            UiCommand::LoadLevel => match self.load_level(host, store) {
                Ok(()) => UiSignal::Loaded,
                Err(error) => UiSignal::LoadFailed(error),
            },
            UiCommand::ToggleEditMode => {
                self.toggle_edit_mode(host);
                UiSignal::Applied
            }
        }
    }
}

fn applied_if(applied: bool) -> UiSignal {
    if applied {
        UiSignal::Applied
    } else {
        UiSignal::Ignored
    }
}
