//! Transform node with a lazily synchronized dual representation
//!
//! A node stores its local transform twice: as translation/rotation/scale
//! components and as a 4x4 matrix. Exactly one side is authoritative at any
//! time; writing one side marks the other stale, and reading a stale side
//! recomputes it first. [`TransformRepr`] makes the forbidden "both stale"
//! state unrepresentable.

use crate::foundation::math::{Mat4, Quat, Transform, Vec3};
use crate::physics::Aabb;

use super::payload::NodePayload;

/// Semantic classification driving collision meaning
///
/// Geometry decides whether two nodes overlap; the kind decides what the
/// overlap means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColliderKind {
    /// Solid obstacle resolved geometrically
    #[default]
    Plain,
    /// The player craft; overlap with anything solid is fatal
    Player,
    /// Non-physical pickup; overlap with the player is consumed, not resolved
    Pickup,
    /// Scenery that never takes part in collision
    Decorative,
}

/// Which side of the dual transform representation is authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransformRepr {
    /// Components and matrix agree
    BothValid,
    /// Components were written since the matrix was last composed
    MatrixStale,
    /// The matrix was written since the components were last decomposed
    ComponentsStale,
}

/// A scene-tree node: local transform, collider data, renderable payload
///
/// Parent/child links live in [`super::SceneGraph`]; the node itself only
/// carries per-node state.
#[derive(Debug, Clone)]
pub struct Node {
    components: Transform,
    matrix: Mat4,
    repr: TransformRepr,

    pub(crate) parent: Option<super::NodeId>,
    pub(crate) children: Vec<super::NodeId>,

    /// What this node contributes to rendering
    pub payload: NodePayload,

    /// Local-space bounding box; the zero box at the origin means
    /// "no geometry" and still collides as a point
    pub aabb: Aabb,

    /// Whether this node takes part in collision scans at all
    pub collidable: bool,

    /// Semantic collision classification
    pub kind: ColliderKind,

    /// World-space velocity in units per second; `Some(zero)` is a valid
    /// moving body, `None` opts out of integration entirely
    pub velocity: Option<Vec3>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Create a standalone node with an identity transform
    pub fn new() -> Self {
        Self {
            components: Transform::identity(),
            matrix: Mat4::identity(),
            repr: TransformRepr::BothValid,
            parent: None,
            children: Vec::new(),
            payload: NodePayload::Empty,
            aabb: Aabb::point(Vec3::zeros()),
            collidable: true,
            kind: ColliderKind::Plain,
            velocity: None,
        }
    }

    /// Builder pattern: set the renderable payload
    pub fn with_payload(mut self, payload: NodePayload) -> Self {
        self.payload = payload;
        self
    }

    /// Builder pattern: set the local-space bounding box
    pub fn with_aabb(mut self, aabb: Aabb) -> Self {
        self.aabb = aabb;
        self
    }

    /// Builder pattern: set the semantic collision kind
    pub fn with_kind(mut self, kind: ColliderKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder pattern: set collidability
    pub fn with_collidable(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }

    /// Builder pattern: set the initial velocity, making this a moving body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Builder pattern: set the initial translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.set_translation(translation);
        self
    }

    /// Builder pattern: set the initial rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Builder pattern: set the initial scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    /// Decompose the matrix into components if the components are stale
    pub(crate) fn sync_components(&mut self) {
        if self.repr == TransformRepr::ComponentsStale {
            self.components = Transform::from_matrix(self.matrix);
            self.repr = TransformRepr::BothValid;
        }
    }

    /// The component transform as last synchronized, without forcing a sync
    ///
    /// May lag behind a pending matrix write; contexts that hand out `&Node`
    /// (traversal callbacks, sort comparators) sync first where freshness
    /// matters, e.g. [`super::SceneGraph::sort_children_by`] refreshes the
    /// children it is about to compare. For guaranteed-fresh reads use the
    /// `&mut` getters.
    pub fn components(&self) -> &Transform {
        &self.components
    }

    /// Get the local translation
    pub fn translation(&mut self) -> Vec3 {
        self.sync_components();
        self.components.position
    }

    /// Get the local rotation
    pub fn rotation(&mut self) -> Quat {
        self.sync_components();
        self.components.rotation
    }

    /// Get the local scale
    pub fn scale(&mut self) -> Vec3 {
        self.sync_components();
        self.components.scale
    }

    /// Set the local translation, marking the matrix stale
    ///
    /// Syncs components first so a pending matrix write cannot clobber the
    /// rotation and scale being kept.
    pub fn set_translation(&mut self, translation: Vec3) {
        self.sync_components();
        self.components.position = translation;
        self.repr = TransformRepr::MatrixStale;
    }

    /// Set the local rotation, marking the matrix stale
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.sync_components();
        self.components.rotation = rotation;
        self.repr = TransformRepr::MatrixStale;
    }

    /// Set the local scale, marking the matrix stale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.sync_components();
        self.components.scale = scale;
        self.repr = TransformRepr::MatrixStale;
    }

    /// Get the local matrix, recomposing it from components if stale
    pub fn local_matrix(&mut self) -> Mat4 {
        if self.repr == TransformRepr::MatrixStale {
            self.matrix = self.components.to_matrix();
            self.repr = TransformRepr::BothValid;
        }
        self.matrix
    }

    /// Replace the local matrix wholesale, marking the components stale
    pub fn set_local_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
        self.repr = TransformRepr::ComponentsStale;
    }

    /// Translate by a delta (used by integration and push-out correction)
    pub fn translate(&mut self, delta: Vec3) {
        let translation = self.translation();
        self.set_translation(translation + delta);
    }

    /// The node's parent, if attached
    pub fn parent(&self) -> Option<super::NodeId> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[super::NodeId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_component_roundtrip_through_matrix() {
        let mut node = Node::new();
        node.set_translation(Vec3::new(1.0, 2.0, 3.0));
        node.set_rotation(Quat::from_axis_angle(&Vec3::y_axis(), 0.4));
        node.set_scale(Vec3::new(2.0, 1.5, 0.8));

        // Read the composed matrix, push it back in, and re-read components
        let matrix = node.local_matrix();
        node.set_local_matrix(matrix);

        assert_relative_eq!(node.translation(), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(node.scale(), Vec3::new(2.0, 1.5, 0.8), epsilon = EPSILON);
        let dot = node
            .rotation()
            .coords
            .dot(&Quat::from_axis_angle(&Vec3::y_axis(), 0.4).coords);
        assert!(dot.abs() > 0.999);
    }

    #[test]
    fn test_matrix_write_invalidates_components() {
        let mut node = Node::new();
        node.set_local_matrix(Mat4::new_translation(&Vec3::new(5.0, 0.0, 0.0)));

        assert_relative_eq!(node.translation(), Vec3::new(5.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(node.scale(), Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_component_write_preserves_unrelated_fields() {
        let mut node = Node::new();
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), HALF_PI);
        node.set_local_matrix(
            Mat4::new_translation(&Vec3::new(1.0, 1.0, 1.0)) * rotation.to_homogeneous(),
        );

        // Writing translation while components are stale must not clobber the
        // rotation carried by the matrix
        node.set_translation(Vec3::new(9.0, 9.0, 9.0));

        let dot = node.rotation().coords.dot(&rotation.coords);
        assert!(dot.abs() > 0.999);
        assert_relative_eq!(node.translation(), Vec3::new(9.0, 9.0, 9.0), epsilon = EPSILON);
    }

    #[test]
    fn test_translate_accumulates() {
        let mut node = Node::new().with_translation(Vec3::new(1.0, 0.0, 0.0));
        node.translate(Vec3::new(0.5, 0.0, -1.0));

        assert_relative_eq!(node.translation(), Vec3::new(1.5, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_zero_velocity_is_still_a_mover() {
        let node = Node::new().with_velocity(Vec3::zeros());
        assert!(node.velocity.is_some());
        assert!(Node::new().velocity.is_none());
    }
}
