//! World population
//!
//! Keeps a fixed roster of fuel pickups and drifting cloud obstacles alive in
//! the scene graph, recycling them as they are collected or drift out of
//! bounds.

use rand::Rng;

use crate::config::{CloudConfig, FuelConfig};
use crate::foundation::math::{Quat, Vec3};
use crate::physics::Aabb;
use crate::scene::{ColliderKind, Node, NodeId, NodePayload, SceneGraph};

/// Insert a node under the scene root
///
/// The root always exists, so attachment cannot actually fail here; a
/// structural error would mean the arena itself is corrupt.
pub(crate) fn spawn_under_root(graph: &mut SceneGraph, node: Node) -> NodeId {
    let root = graph.root();
    let id = graph.insert(node);
    if let Err(err) = graph.attach(root, id) {
        log::error!("failed to attach spawned node to root: {err}");
    }
    id
}

/// Keeps a fixed number of fuel pickups in the world
#[derive(Debug)]
pub struct FuelSpawner {
    config: FuelConfig,
    payload: NodePayload,
    active: Vec<NodeId>,
}

impl FuelSpawner {
    /// Create a spawner; call [`populate`](Self::populate) to fill the world
    #[must_use]
    pub fn new(config: &FuelConfig, payload: NodePayload) -> Self {
        Self {
            config: config.clone(),
            payload,
            active: Vec::with_capacity(config.spawn_count),
        }
    }

    /// Node ids of all live pickups
    #[must_use]
    pub fn active(&self) -> &[NodeId] {
        &self.active
    }

    /// Spawn pickups until the configured count is reached
    pub fn populate(&mut self, graph: &mut SceneGraph) {
        while self.active.len() < self.config.spawn_count {
            let id = self.spawn_one(graph);
            self.active.push(id);
        }
        log::debug!("fuel spawner populated, {} pickups live", self.active.len());
    }

    /// Replace a collected pickup with a fresh one elsewhere
    pub fn on_picked(&mut self, graph: &mut SceneGraph, picked: NodeId) {
        if let Some(index) = self.active.iter().position(|&id| id == picked) {
            self.active.swap_remove(index);
            graph.remove(picked);

            let replacement = self.spawn_one(graph);
            self.active.push(replacement);
        }
    }

    /// Idle animation: spin every live pickup about the vertical axis
    pub fn update(&mut self, graph: &mut SceneGraph, dt: f32) {
        let spin = Quat::from_axis_angle(&Vec3::y_axis(), self.config.spin_rate * dt);
        for &id in &self.active {
            if let Some(node) = graph.get_mut(id) {
                let rotation = node.rotation();
                node.set_rotation(spin * rotation);
            }
        }
    }

    fn spawn_one(&self, graph: &mut SceneGraph) -> NodeId {
        let mut rng = rand::thread_rng();
        let [ex, ey, ez] = self.config.spawn_extents;
        let position = Vec3::new(
            rng.gen_range(-ex..=ex),
            rng.gen_range(-ey..=ey),
            rng.gen_range(-ez..=ez),
        );

        let node = Node::new()
            .with_payload(self.payload.clone())
            .with_translation(position)
            .with_scale(Vec3::repeat(self.config.pickup_scale))
            .with_aabb(Aabb::from_center_extents(
                Vec3::zeros(),
                Vec3::repeat(0.5),
            ))
            .with_kind(ColliderKind::Pickup);

        spawn_under_root(graph, node)
    }
}

/// Keeps a fixed number of slowly drifting cloud obstacles in the world
#[derive(Debug)]
pub struct CloudField {
    config: CloudConfig,
    payload: NodePayload,
    active: Vec<NodeId>,
}

impl CloudField {
    /// Create a field; call [`populate`](Self::populate) to fill the world
    #[must_use]
    pub fn new(config: &CloudConfig, payload: NodePayload) -> Self {
        Self {
            config: config.clone(),
            payload,
            active: Vec::with_capacity(config.count),
        }
    }

    /// Node ids of all live clouds
    #[must_use]
    pub fn active(&self) -> &[NodeId] {
        &self.active
    }

    /// Spawn clouds until the configured count is reached
    pub fn populate(&mut self, graph: &mut SceneGraph) {
        while self.active.len() < self.config.count {
            let id = self.spawn_one(graph);
            self.active.push(id);
        }
    }

    /// Recycle clouds that have drifted past the horizontal bound
    ///
    /// Runs after physics so positions are up to date for the frame.
    pub fn update(&mut self, graph: &mut SceneGraph) {
        let bound = self.config.bound;
        for &id in &self.active {
            let Some(node) = graph.get_mut(id) else {
                continue;
            };
            let position = node.translation();
            if position.x.abs() > bound || position.z.abs() > bound {
                Self::respawn(&self.config, node);
            }
        }
    }

    fn spawn_one(&self, graph: &mut SceneGraph) -> NodeId {
        let mut node = Node::new()
            .with_payload(self.payload.clone())
            .with_aabb(Aabb::from_center_extents(
                Vec3::zeros(),
                Vec3::new(2.0, 0.75, 2.0),
            ));
        Self::respawn(&self.config, &mut node);
        spawn_under_root(graph, node)
    }

    fn respawn(config: &CloudConfig, node: &mut Node) {
        let mut rng = rand::thread_rng();
        let bound = config.bound;
        // Inclusive ranges: a zero span is a valid flat cloud layer, not an
        // empty range to panic on
        let span = config.altitude_span.max(0.0);

        node.set_translation(Vec3::new(
            rng.gen_range(-bound..=bound),
            config.min_altitude + rng.gen_range(0.0..=span),
            rng.gen_range(-bound..=bound),
        ));
        node.set_scale(Vec3::repeat(rng.gen_range(1.0..4.0)));
        node.velocity = Some(Vec3::new(
            rng.gen_range(-config.max_drift..=config.max_drift),
            0.0,
            rng.gen_range(-config.max_drift..=config.max_drift),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_reaches_configured_count() {
        let mut graph = SceneGraph::new();
        let config = FuelConfig::default();
        let mut spawner = FuelSpawner::new(&config, NodePayload::Empty);
        spawner.populate(&mut graph);

        assert_eq!(spawner.active().len(), config.spawn_count);
        // Root plus one node per pickup.
        assert_eq!(graph.len(), config.spawn_count + 1);
    }

    #[test]
    fn test_pickups_spawn_inside_the_volume() {
        let mut graph = SceneGraph::new();
        let config = FuelConfig::default();
        let mut spawner = FuelSpawner::new(&config, NodePayload::Empty);
        spawner.populate(&mut graph);

        let [ex, ey, ez] = config.spawn_extents;
        for &id in spawner.active() {
            let position = graph.get_mut(id).unwrap().translation();
            assert!(position.x.abs() <= ex);
            assert!(position.y.abs() <= ey);
            assert!(position.z.abs() <= ez);
        }
    }

    #[test]
    fn test_collected_pickup_is_replaced() {
        let mut graph = SceneGraph::new();
        let config = FuelConfig::default();
        let mut spawner = FuelSpawner::new(&config, NodePayload::Empty);
        spawner.populate(&mut graph);

        let picked = spawner.active()[0];
        spawner.on_picked(&mut graph, picked);

        assert_eq!(spawner.active().len(), config.spawn_count);
        assert!(!graph.contains(picked));
        assert!(!spawner.active().contains(&picked));
    }

    #[test]
    fn test_unknown_pickup_is_ignored() {
        let mut graph = SceneGraph::new();
        let config = FuelConfig::default();
        let mut spawner = FuelSpawner::new(&config, NodePayload::Empty);
        spawner.populate(&mut graph);

        let root = graph.root();
        let stranger = graph.spawn(root, Node::new()).unwrap();
        spawner.on_picked(&mut graph, stranger);

        assert_eq!(spawner.active().len(), config.spawn_count);
    }

    #[test]
    fn test_out_of_bounds_cloud_is_recycled() {
        let mut graph = SceneGraph::new();
        let config = CloudConfig::default();
        let mut field = CloudField::new(&config, NodePayload::Empty);
        field.populate(&mut graph);

        let wanderer = field.active()[0];
        graph
            .get_mut(wanderer)
            .unwrap()
            .set_translation(Vec3::new(config.bound + 10.0, 55.0, 0.0));
        field.update(&mut graph);

        let position = graph.get_mut(wanderer).unwrap().translation();
        assert!(position.x.abs() <= config.bound);
        assert!(position.z.abs() <= config.bound);
    }

    #[test]
    fn test_flat_cloud_layer_spawns_at_min_altitude() {
        let mut graph = SceneGraph::new();
        let mut config = CloudConfig::default();
        config.altitude_span = 0.0;
        let mut field = CloudField::new(&config, NodePayload::Empty);
        field.populate(&mut graph);

        assert_eq!(field.active().len(), config.count);
        for &id in field.active() {
            let altitude = graph.get_mut(id).unwrap().translation().y;
            assert_eq!(altitude, config.min_altitude);
        }
    }

    #[test]
    fn test_clouds_drift() {
        let mut graph = SceneGraph::new();
        let config = CloudConfig::default();
        let mut field = CloudField::new(&config, NodePayload::Empty);
        field.populate(&mut graph);

        for &id in field.active() {
            let node = graph.get_mut(id).unwrap();
            assert!(node.velocity.is_some());
            assert_eq!(node.velocity.unwrap().y, 0.0);
        }
    }
}
