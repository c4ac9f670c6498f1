//! Per-frame integration and collision resolution
//!
//! Runs in two stages with a hard ordering guarantee: every moving body is
//! integrated before any overlap test, so collision always sees post-move
//! positions. Overlaps are classified by semantic kind before any geometry is
//! touched; only plain-vs-plain pairs get the minimal-translation push-out.

use crate::foundation::math::Vec3;
use crate::game::events::GameEvents;
use crate::scene::{ColliderKind, NodeId, SceneGraph};

use super::aabb::Aabb;

/// What a single pair test concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairOutcome {
    /// No overlap, nothing to do
    Clear,
    /// Non-physical pickup reported; neither node moved
    Pickup,
    /// Fatal for the player; the frame's resolution stops here
    Fatal,
    /// Geometric overlap corrected by displacing the first body
    Resolved,
}

/// Discrete AABB collision resolver
///
/// The caller gates this on the game state and a positive `dt`; a `dt` of
/// zero short-circuits the whole pass.
#[derive(Debug, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Create a resolver
    pub fn new() -> Self {
        Self
    }

    /// Integrate all moving bodies, then resolve every overlapping pair
    ///
    /// Resolution is asymmetric by design: the moving body of a pair is the
    /// one displaced, so the outcome depends on traversal order. This matches
    /// the game's original physics feel and is kept deliberately.
    pub fn update(&self, graph: &mut SceneGraph, dt: f32, events: &mut dyn GameEvents) {
        if dt <= 0.0 {
            return;
        }

        let nodes = graph.collect_descendants(graph.root());

        // Integrate every moving body first; collision tests must only ever
        // see post-move positions
        let mut movers = Vec::new();
        for &id in &nodes {
            let Some(velocity) = graph.get(id).and_then(|node| node.velocity) else {
                continue;
            };
            if let Some(node) = graph.get_mut(id) {
                node.translate(velocity * dt);
                // Recompose now so this frame's scans see the moved box
                let _ = node.local_matrix();
            }
            movers.push(id);
        }

        for &id in &movers {
            if !Self::scans_collisions(graph, id) {
                continue;
            }

            for &other in &nodes {
                if other == id || !Self::scans_collisions(graph, other) {
                    continue;
                }
                match Self::resolve_pair(graph, id, other, events) {
                    PairOutcome::Fatal => return,
                    PairOutcome::Clear | PairOutcome::Pickup | PairOutcome::Resolved => {}
                }
            }
        }
    }

    /// Whether a node takes part in the pairwise scan at all
    fn scans_collisions(graph: &SceneGraph, id: NodeId) -> bool {
        graph
            .get(id)
            .is_some_and(|node| node.collidable && node.kind != ColliderKind::Decorative)
    }

    /// World-space AABB of a node
    ///
    /// A node without geometry carries the degenerate zero box at its origin,
    /// so it still participates as a point collider.
    fn world_aabb(graph: &mut SceneGraph, id: NodeId) -> Aabb {
        let local = graph.get(id).map_or_else(Aabb::default, |node| node.aabb);
        let world = graph.world_matrix(id);
        local.transformed_by(&world)
    }

    /// Test one ordered pair and act on the overlap, if any
    ///
    /// A pickup needs an actual `Pickup`-kind node in the pair; two
    /// overlapping `Player`-kind nodes therefore classify as fatal, not as a
    /// pickup. Scenes in this game carry a single player, so the case only
    /// arises if a caller builds one with more.
    fn resolve_pair(
        graph: &mut SceneGraph,
        a: NodeId,
        b: NodeId,
        events: &mut dyn GameEvents,
    ) -> PairOutcome {
        let box_a = Self::world_aabb(graph, a);
        let box_b = Self::world_aabb(graph, b);
        if !box_a.intersects(&box_b) {
            return PairOutcome::Clear;
        }

        let kind_a = graph.get(a).map_or(ColliderKind::Plain, |node| node.kind);
        let kind_b = graph.get(b).map_or(ColliderKind::Plain, |node| node.kind);

        let in_pickup_set =
            |kind: ColliderKind| matches!(kind, ColliderKind::Player | ColliderKind::Pickup);

        if in_pickup_set(kind_a) && in_pickup_set(kind_b)
            && (kind_a == ColliderKind::Pickup || kind_b == ColliderKind::Pickup)
        {
            let picked = if kind_b == ColliderKind::Pickup { b } else { a };
            log::debug!("pickup: {picked:?}");
            events.on_pickup(picked);
            return PairOutcome::Pickup;
        }

        if kind_a == ColliderKind::Player || kind_b == ColliderKind::Player {
            log::info!("fatal collision between {a:?} and {b:?}");
            events.on_fatal_collision();
            return PairOutcome::Fatal;
        }

        if let Some(correction) = minimal_correction(&box_a, &box_b) {
            if let Some(node) = graph.get_mut(a) {
                // set_translation re-marks the matrix stale, so later pairs in
                // this frame see the corrected position
                node.translate(correction);
            }
        }
        PairOutcome::Resolved
    }
}

/// The cheapest translation that moves box `a` out of box `b`
///
/// Six candidates: for each axis, the depth pushing `a` past `b`'s max side
/// and the depth pushing it past `b`'s min side. A negative depth means no
/// overlap in that direction and disqualifies the candidate. Ties keep the
/// earlier candidate in scan order (positive X, Y, Z, then negative X, Y, Z).
pub(crate) fn minimal_correction(a: &Aabb, b: &Aabb) -> Option<Vec3> {
    let push_positive = b.max - a.min;
    let push_negative = a.max - b.min;

    let candidates = [
        (push_positive.x, Vec3::new(push_positive.x, 0.0, 0.0)),
        (push_positive.y, Vec3::new(0.0, push_positive.y, 0.0)),
        (push_positive.z, Vec3::new(0.0, 0.0, push_positive.z)),
        (push_negative.x, Vec3::new(-push_negative.x, 0.0, 0.0)),
        (push_negative.y, Vec3::new(0.0, -push_negative.y, 0.0)),
        (push_negative.z, Vec3::new(0.0, 0.0, -push_negative.z)),
    ];

    let mut best: Option<(f32, Vec3)> = None;
    for (depth, direction) in candidates {
        if depth >= 0.0 && best.map_or(true, |(best_depth, _)| depth < best_depth) {
            best = Some((depth, direction));
        }
    }
    best.map(|(_, direction)| direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::{EventQueue, GameEvent};
    use crate::scene::Node;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn unit_cube() -> Aabb {
        Aabb::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }

    fn advance(graph: &mut SceneGraph, dt: f32) -> EventQueue {
        let mut events = EventQueue::new();
        CollisionResolver::new().update(graph, dt, &mut events);
        events
    }

    #[test]
    fn test_integration_moves_by_velocity_times_dt() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mover = graph
            .spawn(
                root,
                Node::new()
                    .with_collidable(false)
                    .with_velocity(Vec3::new(2.0, 0.0, -4.0)),
            )
            .unwrap();

        advance(&mut graph, 0.5);

        assert_relative_eq!(
            graph.get_mut(mover).unwrap().translation(),
            Vec3::new(1.0, 0.0, -2.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_zero_dt_freezes_everything() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mover = graph
            .spawn(
                root,
                Node::new().with_velocity(Vec3::new(100.0, -50.0, 25.0)),
            )
            .unwrap();

        let events = advance(&mut graph, 0.0);

        assert!(events.is_empty());
        assert_relative_eq!(
            graph.get_mut(mover).unwrap().translation(),
            Vec3::zeros(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_pickup_reports_without_moving_either_node() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let player = graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(unit_cube())
                    .with_kind(ColliderKind::Player)
                    .with_velocity(Vec3::zeros()),
            )
            .unwrap();
        let pickup = graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(unit_cube())
                    .with_kind(ColliderKind::Pickup)
                    .with_translation(Vec3::new(0.5, 0.0, 0.0)),
            )
            .unwrap();

        let mut events = advance(&mut graph, 0.016);

        assert_eq!(events.drain(), vec![GameEvent::Pickup(pickup)]);
        assert_relative_eq!(
            graph.get_mut(player).unwrap().translation(),
            Vec3::zeros(),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            graph.get_mut(pickup).unwrap().translation(),
            Vec3::new(0.5, 0.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_player_obstacle_overlap_is_fatal() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(unit_cube())
                    .with_kind(ColliderKind::Player)
                    .with_velocity(Vec3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();
        graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(unit_cube())
                    .with_translation(Vec3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();

        let mut events = advance(&mut graph, 0.016);

        assert_eq!(events.drain(), vec![GameEvent::FatalCollision]);
    }

    #[test]
    fn test_geometric_push_out_picks_smallest_axis() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        // A [0,2]^3 moving, B [1,3]x[0,2]x[0,2] static, both plain
        let a = graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(Aabb::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0)))
                    .with_velocity(Vec3::zeros()),
            )
            .unwrap();
        let b = graph
            .spawn(
                root,
                Node::new().with_aabb(Aabb::new(
                    Vec3::new(1.0, 0.0, 0.0),
                    Vec3::new(3.0, 2.0, 2.0),
                )),
            )
            .unwrap();

        advance(&mut graph, 0.016);

        assert_relative_eq!(
            graph.get_mut(a).unwrap().translation(),
            Vec3::new(-1.0, 0.0, 0.0),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            graph.get_mut(b).unwrap().translation(),
            Vec3::zeros(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_two_players_overlapping_is_fatal_not_pickup() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(unit_cube())
                    .with_kind(ColliderKind::Player)
                    .with_velocity(Vec3::zeros()),
            )
            .unwrap();
        graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(unit_cube())
                    .with_kind(ColliderKind::Player)
                    .with_translation(Vec3::new(0.5, 0.0, 0.0)),
            )
            .unwrap();

        let mut events = advance(&mut graph, 0.016);

        assert_eq!(events.drain(), vec![GameEvent::FatalCollision]);
    }

    #[test]
    fn test_applied_correction_is_minimal() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Vec3::new(1.0, 0.5, -0.5), Vec3::new(3.0, 2.5, 1.5));
        let applied = minimal_correction(&a, &b).unwrap();

        let push_positive = b.max - a.min;
        let push_negative = a.max - b.min;
        for depth in [
            push_positive.x,
            push_positive.y,
            push_positive.z,
            push_negative.x,
            push_negative.y,
            push_negative.z,
        ] {
            if depth >= 0.0 {
                assert!(applied.magnitude() <= depth + 1e-6);
            }
        }
    }

    #[test]
    fn test_coincident_duplicates_are_not_self_collisions() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        // Two distinct nodes with identical geometry at the same place; the
        // identity check must be by node id, so they do collide with each
        // other but never with themselves
        let a = graph
            .spawn(
                root,
                Node::new().with_aabb(unit_cube()).with_velocity(Vec3::zeros()),
            )
            .unwrap();
        graph.spawn(root, Node::new().with_aabb(unit_cube())).unwrap();

        advance(&mut graph, 0.016);

        // A was displaced out of its duplicate
        let moved = graph.get_mut(a).unwrap().translation();
        assert!(moved.magnitude() > 1.0);
    }

    #[test]
    fn test_missing_geometry_collides_as_point() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        // Default AABB is the zero box at the origin
        graph
            .spawn(
                root,
                Node::new()
                    .with_kind(ColliderKind::Player)
                    .with_velocity(Vec3::zeros()),
            )
            .unwrap();
        graph.spawn(root, Node::new().with_aabb(unit_cube())).unwrap();

        let mut events = advance(&mut graph, 0.016);

        assert_eq!(events.drain(), vec![GameEvent::FatalCollision]);
    }

    #[test]
    fn test_decorative_nodes_are_ignored() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(unit_cube())
                    .with_kind(ColliderKind::Player)
                    .with_velocity(Vec3::zeros()),
            )
            .unwrap();
        graph
            .spawn(
                root,
                Node::new()
                    .with_aabb(unit_cube())
                    .with_kind(ColliderKind::Decorative),
            )
            .unwrap();

        let events = advance(&mut graph, 0.016);

        assert!(events.is_empty());
    }
}
