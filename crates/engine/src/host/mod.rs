mod geometry;
mod input;
mod scene;
mod sprite_keys;

pub use geometry::{Bounds, Vec2};
pub use input::{PointerEvent, PointerPhase};
pub use scene::{
    Color, HostError, SceneHost, SceneWorld, Visual, VisualId, VisualShape, VisualTransform,
    DEFAULT_SPRITE_SIZE,
};
pub use sprite_keys::{SpriteKey, SpriteKeyError, SPRITE_KEY_MAX_LEN};
