use jet_engine::{Vec2, VisualId, VisualTransform};

use crate::tool::RockType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectTag {
    Platform,
    Rock,
}

impl ObjectTag {
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Rock => "rock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectKind {
    Platform { width: f32, height: f32 },
    Rock { rock_type: RockType },
}

impl ObjectKind {
    pub fn tag(&self) -> ObjectTag {
        match self {
            Self::Platform { .. } => ObjectTag::Platform,
            Self::Rock { .. } => ObjectTag::Rock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

impl ObjectTransform {
    pub fn at(position: Vec2, scale: f32) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale,
        }
    }

    pub fn to_visual(self) -> VisualTransform {
        VisualTransform {
            position: self.position,
            rotation_radians: self.rotation,
            scale: self.scale,
        }
    }
}

/// A platform or rock owned by the editor, paired with the host visual that
/// draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub visual: VisualId,
    pub kind: ObjectKind,
    pub transform: ObjectTransform,
}

impl PlacedObject {
    pub fn tag(&self) -> ObjectTag {
        self.kind.tag()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub visual: VisualId,
    pub position: Vec2,
}
