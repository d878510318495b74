use jet_engine::Color;

pub const LEVEL_STORAGE_KEY: &str = "currentLevel";

pub const PLATFORM_WIDTH: f32 = 100.0;
pub const PLATFORM_HEIGHT: f32 = 20.0;
pub const ROCK_DEFAULT_SCALE: f32 = 0.2;
pub const MARKER_RADIUS: f32 = 10.0;
pub const HANDLE_RADIUS: f32 = 10.0;
pub const HANDLE_OFFSET: f32 = 50.0;
/// Pointer distance from the object that maps to scale 1.0 while resizing.
pub const RESIZE_REFERENCE_RADIUS: f32 = 100.0;
pub const MIN_OBJECT_SCALE: f32 = 0.01;
pub const MAX_OBJECT_SCALE: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_color: Color,
    pub rock_scale: f32,
    pub marker_radius: f32,
    pub start_marker_color: Color,
    pub end_marker_color: Color,
    pub handle_radius: f32,
    pub resize_handle_color: Color,
    pub rotation_handle_color: Color,
    pub handle_offset: f32,
    pub resize_reference_radius: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub storage_key: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_color: Color::GREEN,
            rock_scale: ROCK_DEFAULT_SCALE,
            marker_radius: MARKER_RADIUS,
            start_marker_color: Color::BLUE,
            end_marker_color: Color::RED,
            handle_radius: HANDLE_RADIUS,
            resize_handle_color: Color::GREEN,
            rotation_handle_color: Color::BLUE,
            handle_offset: HANDLE_OFFSET,
            resize_reference_radius: RESIZE_REFERENCE_RADIUS,
            min_scale: MIN_OBJECT_SCALE,
            max_scale: MAX_OBJECT_SCALE,
            storage_key: LEVEL_STORAGE_KEY.to_string(),
        }
    }
}

impl EditorConfig {
    /// Scale for a resize gesture whose pointer sits `distance` away from the
    /// object, kept within `min_scale..=max_scale`. NaN maps to `min_scale`;
    /// an unbounded distance maps to `max_scale`.
    pub fn resize_scale(&self, distance: f32) -> f32 {
        let scale = distance / self.resize_reference_radius;
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_scale_maps_reference_radius_to_one() {
        let config = EditorConfig::default();
        assert_eq!(config.resize_scale(100.0), 1.0);
        assert_eq!(config.resize_scale(250.0), 2.5);
    }

    #[test]
    fn resize_scale_clamps_degenerate_distances() {
        let config = EditorConfig::default();
        assert_eq!(config.resize_scale(0.0), MIN_OBJECT_SCALE);
        assert_eq!(config.resize_scale(0.5), MIN_OBJECT_SCALE);
        assert_eq!(config.resize_scale(f32::NAN), MIN_OBJECT_SCALE);
        assert_eq!(config.resize_scale(f32::NEG_INFINITY), MIN_OBJECT_SCALE);
    }

    #[test]
    fn resize_scale_caps_far_pointers_at_max() {
        let config = EditorConfig::default();
        assert_eq!(config.resize_scale(f32::INFINITY), MAX_OBJECT_SCALE);
        assert_eq!(config.resize_scale(2.0e19), MAX_OBJECT_SCALE);
        assert_eq!(config.resize_scale(9_000.0), 90.0);
    }
}
