//! Axis-Aligned Bounding Box

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Axis-Aligned Bounding Box used as a conservative collision proxy
///
/// `min <= max` holds componentwise. A zero-size box is legal and represents
/// a point collider; nodes without source geometry carry one at their origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create a degenerate zero-size box, a point collider
    pub fn point(at: Vec3) -> Self {
        Self { min: at, max: at }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB intersects another
    ///
    /// Three independent 1-D interval overlaps; all three must hold.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
            && self.min.y <= other.max.y && self.max.y >= other.min.y
            && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Transform this box into another space, staying axis-aligned
    ///
    /// Transforms all 8 corners and re-takes the componentwise min/max, which
    /// over-approximates rotated boxes without needing an oriented-box test.
    pub fn transformed_by(&self, matrix: &Mat4) -> Aabb {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut min = Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = -min;
        for corner in corners {
            let transformed = matrix.transform_point(&Point3::from(corner)).coords;
            min = min.inf(&transformed);
            max = max.sup(&transformed);
        }
        Aabb { min, max }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::point(Vec3::zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::HALF_PI, Quat};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_intersects() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));
        let c = Aabb::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(7.0, 7.0, 7.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let boxes = [
            Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)),
            Aabb::new(Vec3::new(0.5, 0.0, 0.0), Vec3::new(2.5, 2.0, 2.0)),
            Aabb::point(Vec3::new(0.0, 0.5, 0.0)),
            Aabb::new(Vec3::new(4.0, 4.0, 4.0), Vec3::new(5.0, 5.0, 5.0)),
        ];

        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a));
            }
        }
    }

    #[test]
    fn test_touching_boxes_intersect() {
        let a = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_point_collider_inside_box() {
        let point = Aabb::point(Vec3::new(0.5, 0.5, 0.5));
        let cube = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        assert!(point.intersects(&cube));
    }

    #[test]
    fn test_transformed_by_translation() {
        let cube = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let moved = cube.transformed_by(&Mat4::new_translation(&Vec3::new(3.0, 0.0, -1.0)));

        assert_relative_eq!(moved.min, Vec3::new(2.0, -1.0, -2.0), epsilon = EPSILON);
        assert_relative_eq!(moved.max, Vec3::new(4.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_transformed_by_rotation_is_conservative() {
        // A unit cube rotated 90 degrees around Y maps back onto itself
        let cube = Aabb::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI).to_homogeneous();
        let rotated = cube.transformed_by(&rotation);

        assert_relative_eq!(rotated.min, cube.min, epsilon = EPSILON);
        assert_relative_eq!(rotated.max, cube.max, epsilon = EPSILON);

        // A 45 degree rotation grows the box; it must still contain the cube
        let eighth = Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI / 2.0).to_homogeneous();
        let grown = cube.transformed_by(&eighth);
        assert!(grown.min.x <= cube.min.x && grown.max.x >= cube.max.x);
    }
}
