#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Bearing from `self` towards `other`, in radians, as `atan2(dy, dx)`.
    pub fn angle_to(self, other: Vec2) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn offset_polar(self, angle_radians: f32, distance: f32) -> Vec2 {
        Vec2 {
            x: self.x + angle_radians.cos() * distance,
            y: self.y + angle_radians.sin() * distance,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned bounds in scene units. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_center_half_extents(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            min: Vec2::new(center.x - half_width, center.y - half_height),
            max: Vec2::new(center.x + half_width, center.y + half_height),
        }
    }

    /// Smallest axis-aligned box enclosing a box of the given half extents
    /// rotated about `center`.
    pub fn around_rotated_box(
        center: Vec2,
        half_width: f32,
        half_height: f32,
        rotation_radians: f32,
    ) -> Self {
        let (sin, cos) = rotation_radians.sin_cos();
        let extent_x = (half_width * cos).abs() + (half_height * sin).abs();
        let extent_y = (half_width * sin).abs() + (half_height * cos).abs();
        Self::from_center_half_extents(center, extent_x, extent_y)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn distance_and_bearing_follow_screen_axes() {
        let origin = Vec2::new(10.0, 10.0);
        let target = Vec2::new(10.0, 30.0);
        assert!((origin.distance(target) - 20.0).abs() <= EPSILON);
        assert!((origin.angle_to(target) - std::f32::consts::FRAC_PI_2).abs() <= EPSILON);
    }

    #[test]
    fn distance_stays_finite_for_far_points() {
        let distance = Vec2::ZERO.distance(Vec2::new(2.0e19, 0.0));
        assert!(distance.is_finite());
        assert!((distance / 2.0e19 - 1.0).abs() <= EPSILON);
    }

    #[test]
    fn coincident_points_have_zero_bearing() {
        let point = Vec2::new(4.0, -2.0);
        assert_eq!(point.distance(point), 0.0);
        assert_eq!(point.angle_to(point), 0.0);
    }

    #[test]
    fn rotated_box_bounds_swap_extents_at_quarter_turn() {
        let bounds = Bounds::around_rotated_box(
            Vec2::new(0.0, 0.0),
            50.0,
            10.0,
            std::f32::consts::FRAC_PI_2,
        );
        assert!((bounds.width() - 20.0).abs() <= EPSILON);
        assert!((bounds.height() - 100.0).abs() <= EPSILON);
        assert!(bounds.contains(Vec2::new(0.0, 45.0)));
        assert!(!bounds.contains(Vec2::new(45.0, 0.0)));
    }

    #[test]
    fn bounds_edges_are_inclusive() {
        let bounds = Bounds::from_center_half_extents(Vec2::new(300.0, 250.0), 50.0, 10.0);
        assert!(bounds.contains(Vec2::new(250.0, 240.0)));
        assert!(bounds.contains(Vec2::new(350.0, 260.0)));
        assert!(!bounds.contains(Vec2::new(350.5, 260.0)));
        assert_eq!(bounds.center(), Vec2::new(300.0, 250.0));
    }
}
