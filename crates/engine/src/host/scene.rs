use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::geometry::{Bounds, Vec2};
use super::sprite_keys::{SpriteKey, SpriteKeyError};

pub const DEFAULT_SPRITE_SIZE: (f32, f32) = (64.0, 64.0);

/// Packed `0xRRGGBB` fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const GREEN: Color = Color(0x00ff00);
    pub const BLUE: Color = Color(0x0000ff);
    pub const RED: Color = Color(0xff0000);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    pub position: Vec2,
    pub rotation_radians: f32,
    pub scale: f32,
}

impl VisualTransform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation_radians: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisualShape {
    Rectangle { width: f32, height: f32 },
    Circle { radius: f32 },
    Sprite { key: SpriteKey },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    #[error("visual {0:?} does not exist")]
    UnknownVisual(VisualId),
    #[error("invalid sprite key '{key}': {source}")]
    InvalidSpriteKey {
        key: String,
        #[source]
        source: SpriteKeyError,
    },
    #[error("{what} must be a positive finite number, got {value}")]
    InvalidDimension { what: &'static str, value: f32 },
    #[error("transform for {id:?} is not finite")]
    NonFiniteTransform { id: VisualId },
    #[error("visual budget exhausted ({limit} live visuals)")]
    VisualBudgetExhausted { limit: usize },
}

/// Operations the editor issues to the rendering/physics host.
pub trait SceneHost {
    fn create_rectangle(
        &mut self,
        position: Vec2,
        width: f32,
        height: f32,
        color: Color,
    ) -> Result<VisualId, HostError>;
    fn create_circle(
        &mut self,
        position: Vec2,
        radius: f32,
        color: Color,
    ) -> Result<VisualId, HostError>;
    fn create_sprite(&mut self, position: Vec2, sprite_key: &str) -> Result<VisualId, HostError>;
    fn register_static_body(&mut self, id: VisualId) -> Result<(), HostError>;
    fn set_transform(&mut self, id: VisualId, transform: VisualTransform)
        -> Result<(), HostError>;
    fn destroy(&mut self, id: VisualId);
    fn bounds(&self, id: VisualId) -> Option<Bounds>;
}

#[derive(Debug, Clone)]
pub struct Visual {
    pub id: VisualId,
    pub shape: VisualShape,
    pub color: Option<Color>,
    pub transform: VisualTransform,
    pub static_body: bool,
}

#[derive(Debug, Default)]
struct VisualIdAllocator {
    next: u64,
}

impl VisualIdAllocator {
    fn allocate(&mut self) -> VisualId {
        let id = VisualId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// In-memory host: keeps every live visual, answers bounds queries and
/// records destroy calls so callers can check for leaks.
#[derive(Debug, Default)]
pub struct SceneWorld {
    allocator: VisualIdAllocator,
    visuals: Vec<Visual>,
    sprite_sizes: HashMap<SpriteKey, (f32, f32)>,
    destroy_calls: Vec<VisualId>,
    visual_budget: Option<usize>,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the unscaled pixel size of a sprite texture. Unregistered
    /// keys fall back to [`DEFAULT_SPRITE_SIZE`].
    pub fn with_sprite_size(mut self, key: &str, width: f32, height: f32) -> Self {
        match SpriteKey::parse(key) {
            Ok(key) => {
                self.sprite_sizes.insert(key, (width, height));
            }
            Err(error) => debug!(key, error = %error, "sprite_size_ignored"),
        }
        self
    }

    /// Caps the number of simultaneously live visuals; creation fails past it.
    pub fn set_visual_budget(&mut self, limit: Option<usize>) {
        self.visual_budget = limit;
    }

    pub fn visual(&self, id: VisualId) -> Option<&Visual> {
        self.visuals.iter().find(|visual| visual.id == id)
    }

    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }

    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn destroy_calls(&self) -> &[VisualId] {
        &self.destroy_calls
    }

    pub fn destroy_calls_for(&self, id: VisualId) -> usize {
        self.destroy_calls.iter().filter(|called| **called == id).count()
    }

    fn sprite_size(&self, key: &SpriteKey) -> (f32, f32) {
        self.sprite_sizes
            .get(key)
            .copied()
            .unwrap_or(DEFAULT_SPRITE_SIZE)
    }

    fn visual_mut(&mut self, id: VisualId) -> Option<&mut Visual> {
        self.visuals.iter_mut().find(|visual| visual.id == id)
    }

    fn insert(
        &mut self,
        position: Vec2,
        shape: VisualShape,
        color: Option<Color>,
    ) -> Result<VisualId, HostError> {
        if let Some(limit) = self.visual_budget {
            if self.visuals.len() >= limit {
                return Err(HostError::VisualBudgetExhausted { limit });
            }
        }
        let id = self.allocator.allocate();
        self.visuals.push(Visual {
            id,
            shape,
            color,
            transform: VisualTransform::at(position),
            static_body: false,
        });
        Ok(id)
    }
}

fn check_dimension(what: &'static str, value: f32) -> Result<f32, HostError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HostError::InvalidDimension { what, value })
    }
}

impl SceneHost for SceneWorld {
    fn create_rectangle(
        &mut self,
        position: Vec2,
        width: f32,
        height: f32,
        color: Color,
    ) -> Result<VisualId, HostError> {
        let width = check_dimension("width", width)?;
        let height = check_dimension("height", height)?;
        self.insert(
            position,
            VisualShape::Rectangle { width, height },
            Some(color),
        )
    }

    fn create_circle(
        &mut self,
        position: Vec2,
        radius: f32,
        color: Color,
    ) -> Result<VisualId, HostError> {
        let radius = check_dimension("radius", radius)?;
        self.insert(position, VisualShape::Circle { radius }, Some(color))
    }

    fn create_sprite(&mut self, position: Vec2, sprite_key: &str) -> Result<VisualId, HostError> {
        let key = SpriteKey::parse(sprite_key).map_err(|source| HostError::InvalidSpriteKey {
            key: sprite_key.to_string(),
            source,
        })?;
        self.insert(position, VisualShape::Sprite { key }, None)
    }

    fn register_static_body(&mut self, id: VisualId) -> Result<(), HostError> {
        let visual = self.visual_mut(id).ok_or(HostError::UnknownVisual(id))?;
        visual.static_body = true;
        Ok(())
    }

    fn set_transform(
        &mut self,
        id: VisualId,
        transform: VisualTransform,
    ) -> Result<(), HostError> {
        if !transform.position.is_finite()
            || !transform.rotation_radians.is_finite()
            || !transform.scale.is_finite()
        {
            return Err(HostError::NonFiniteTransform { id });
        }
        let visual = self.visual_mut(id).ok_or(HostError::UnknownVisual(id))?;
        visual.transform = transform;
        Ok(())
    }

    fn destroy(&mut self, id: VisualId) {
        self.destroy_calls.push(id);
        let before = self.visuals.len();
        self.visuals.retain(|visual| visual.id != id);
        if self.visuals.len() == before {
            debug!(visual = id.0, "destroy_unknown_visual");
        }
    }

    fn bounds(&self, id: VisualId) -> Option<Bounds> {
        let visual = self.visual(id)?;
        let transform = visual.transform;
        let scale = transform.scale.abs();
        let bounds = match &visual.shape {
            VisualShape::Rectangle { width, height } => Bounds::around_rotated_box(
                transform.position,
                width * scale * 0.5,
                height * scale * 0.5,
                transform.rotation_radians,
            ),
            VisualShape::Sprite { key } => {
                let (width, height) = self.sprite_size(key);
                Bounds::around_rotated_box(
                    transform.position,
                    width * scale * 0.5,
                    height * scale * 0.5,
                    transform.rotation_radians,
                )
            }
            VisualShape::Circle { radius } => {
                Bounds::from_center_half_extents(transform.position, radius * scale, radius * scale)
            }
        };
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn ids_are_allocated_monotonically_and_never_reused() {
        let mut world = SceneWorld::new();
        let a = world
            .create_circle(Vec2::new(0.0, 0.0), 10.0, Color::BLUE)
            .expect("circle");
        world.destroy(a);
        let b = world
            .create_circle(Vec2::new(0.0, 0.0), 10.0, Color::BLUE)
            .expect("circle");
        assert!(b > a);
        assert_eq!(world.visual_count(), 1);
    }

    #[test]
    fn rectangle_bounds_follow_scale_and_rotation() {
        let mut world = SceneWorld::new();
        let id = world
            .create_rectangle(Vec2::new(300.0, 250.0), 100.0, 20.0, Color::GREEN)
            .expect("rect");
        let bounds = world.bounds(id).expect("bounds");
        assert!((bounds.width() - 100.0).abs() <= EPSILON);
        assert!((bounds.height() - 20.0).abs() <= EPSILON);

        world
            .set_transform(
                id,
                VisualTransform {
                    position: Vec2::new(300.0, 250.0),
                    rotation_radians: std::f32::consts::FRAC_PI_2,
                    scale: 2.0,
                },
            )
            .expect("transform");
        let bounds = world.bounds(id).expect("bounds");
        assert!((bounds.width() - 40.0).abs() <= EPSILON);
        assert!((bounds.height() - 200.0).abs() <= EPSILON);
    }

    #[test]
    fn sprite_bounds_use_registered_size() {
        let mut world = SceneWorld::new().with_sprite_size("rock3", 200.0, 100.0);
        let id = world
            .create_sprite(Vec2::new(150.0, 150.0), "rock3")
            .expect("sprite");
        world
            .set_transform(
                id,
                VisualTransform {
                    position: Vec2::new(150.0, 150.0),
                    rotation_radians: 0.0,
                    scale: 0.2,
                },
            )
            .expect("transform");
        let bounds = world.bounds(id).expect("bounds");
        assert!((bounds.width() - 40.0).abs() <= EPSILON);
        assert!((bounds.height() - 20.0).abs() <= EPSILON);

        let fallback = world
            .create_sprite(Vec2::new(0.0, 0.0), "rock1")
            .expect("sprite");
        let bounds = world.bounds(fallback).expect("bounds");
        assert!((bounds.width() - DEFAULT_SPRITE_SIZE.0).abs() <= EPSILON);
    }

    #[test]
    fn invalid_inputs_are_rejected_without_allocating() {
        let mut world = SceneWorld::new();
        assert!(matches!(
            world.create_sprite(Vec2::ZERO, "Rock.png"),
            Err(HostError::InvalidSpriteKey { .. })
        ));
        assert!(matches!(
            world.create_rectangle(Vec2::ZERO, 0.0, 20.0, Color::GREEN),
            Err(HostError::InvalidDimension { what: "width", .. })
        ));
        assert_eq!(world.visual_count(), 0);
    }

    #[test]
    fn static_body_registration_requires_live_visual() {
        let mut world = SceneWorld::new();
        let id = world
            .create_rectangle(Vec2::ZERO, 100.0, 20.0, Color::GREEN)
            .expect("rect");
        world.register_static_body(id).expect("register");
        assert!(world.visual(id).expect("visual").static_body);

        world.destroy(id);
        assert_eq!(
            world.register_static_body(id),
            Err(HostError::UnknownVisual(id))
        );
        assert!(world.bounds(id).is_none());
    }

    #[test]
    fn destroy_calls_are_recorded_even_for_unknown_ids() {
        let mut world = SceneWorld::new();
        let id = world
            .create_circle(Vec2::ZERO, 10.0, Color::RED)
            .expect("circle");
        world.destroy(id);
        world.destroy(id);
        assert_eq!(world.destroy_calls_for(id), 2);
        assert_eq!(world.visual_count(), 0);
    }

    #[test]
    fn visual_budget_caps_live_visuals() {
        let mut world = SceneWorld::new();
        world.set_visual_budget(Some(1));
        let first = world
            .create_circle(Vec2::ZERO, 10.0, Color::RED)
            .expect("first");
        assert_eq!(
            world.create_circle(Vec2::ZERO, 10.0, Color::RED),
            Err(HostError::VisualBudgetExhausted { limit: 1 })
        );
        world.destroy(first);
        assert!(world.create_circle(Vec2::ZERO, 10.0, Color::RED).is_ok());
    }
}
