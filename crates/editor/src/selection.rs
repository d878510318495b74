use jet_engine::{Vec2, VisualId};

use crate::object::{ObjectId, ObjectTransform};

/// Where the two handles of a selected object sit:
/// resize at `position + D·s·(cos θ, sin θ)`, rotation diametrically opposite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePositions {
    pub resize: Vec2,
    pub rotation: Vec2,
}

pub fn handle_positions(transform: &ObjectTransform, base_offset: f32) -> HandlePositions {
    let distance = base_offset * transform.scale;
    HandlePositions {
        resize: transform.position.offset_polar(transform.rotation, distance),
        rotation: transform
            .position
            .offset_polar(transform.rotation + std::f32::consts::PI, distance),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionHandles {
    pub resize: VisualId,
    pub rotation: VisualId,
}

/// Pointer gesture in progress on the selected object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging,
    Rotating,
    Resizing,
}

impl Gesture {
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Rotating => "rotating",
            Self::Resizing => "resizing",
        }
    }
}

/// The single selected object. Handles and gesture live here, so neither can
/// outlive the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub object: ObjectId,
    pub handles: SelectionHandles,
    pub gesture: Gesture,
}
