//! Session orchestration
//!
//! [`Simulation`] owns the scene graph, flight controller, physics resolver,
//! spawners and game flow, and advances them all in a fixed per-frame order:
//! steer, integrate and resolve, recycle the world, follow with the camera,
//! drain fuel, then react to the frame's events.

use crate::config::GameConfig;
use crate::foundation::math::Vec3;
use crate::game::events::{EventQueue, GameEvent};
use crate::game::fuel::FuelGauge;
use crate::game::player::{PlayerController, SteerIntent};
use crate::game::spawn::{spawn_under_root, CloudField, FuelSpawner};
use crate::game::state::GameFlow;
use crate::physics::{Aabb, CollisionResolver};
use crate::scene::{ColliderKind, Node, NodeId, NodePayload, SceneGraph};

/// Payloads to hang on the nodes the session creates
///
/// All default to [`NodePayload::Empty`], which keeps headless runs and tests
/// free of any asset plumbing.
#[derive(Debug, Clone, Default)]
pub struct ScenePayloads {
    /// Payload for the player craft node
    pub player: NodePayload,

    /// Payload cloned onto every fuel pickup
    pub pickup: NodePayload,

    /// Payload cloned onto every cloud obstacle
    pub cloud: NodePayload,
}

/// A complete running game session
pub struct Simulation {
    graph: SceneGraph,
    resolver: CollisionResolver,
    flow: GameFlow,
    gauge: FuelGauge,
    controller: PlayerController,
    fuel_spawner: FuelSpawner,
    cloud_field: CloudField,
    queue: EventQueue,
    player: NodeId,
    camera: NodeId,
    camera_offset: Vec3,
    score: u32,
    playtime: f32,
}

impl Simulation {
    /// Build a session with empty payloads
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_payloads(config, ScenePayloads::default())
    }

    /// Build a session, populating the world from configuration
    ///
    /// The session starts in [`GameState::Start`](crate::game::state::GameState);
    /// call [`flow_mut`](Self::flow_mut) and signal focus to begin play.
    #[must_use]
    pub fn with_payloads(config: &GameConfig, payloads: ScenePayloads) -> Self {
        let mut graph = SceneGraph::new();

        let extent = config.player.hitbox_extent;
        let player = spawn_under_root(
            &mut graph,
            Node::new()
                .with_payload(payloads.player)
                .with_aabb(Aabb::from_center_extents(
                    Vec3::zeros(),
                    Vec3::repeat(extent),
                ))
                .with_kind(ColliderKind::Player)
                .with_velocity(Vec3::zeros()),
        );

        let camera_offset = Vec3::from(config.player.camera_offset);
        let camera = spawn_under_root(
            &mut graph,
            Node::new()
                .with_kind(ColliderKind::Decorative)
                .with_collidable(false)
                .with_translation(camera_offset),
        );

        let mut fuel_spawner = FuelSpawner::new(&config.fuel, payloads.pickup);
        fuel_spawner.populate(&mut graph);
        let mut cloud_field = CloudField::new(&config.clouds, payloads.cloud);
        cloud_field.populate(&mut graph);

        log::info!("session ready, {} nodes in scene", graph.len());

        Self {
            graph,
            resolver: CollisionResolver::new(),
            flow: GameFlow::new(),
            gauge: FuelGauge::new(&config.fuel),
            controller: PlayerController::new(&config.player),
            fuel_spawner,
            cloud_field,
            queue: EventQueue::new(),
            player,
            camera,
            camera_offset,
            score: 0,
            playtime: 0.0,
        }
    }

    /// Advance the session by one frame
    ///
    /// Outside the playing state this is a no-op returning no events. The
    /// first frame after a resume runs with a forced zero `dt`, so nothing
    /// moves while the frame still settles event and camera state.
    pub fn advance(&mut self, dt: f32, intent: &SteerIntent) -> Vec<GameEvent> {
        let dt = self.flow.effective_dt(dt);
        if !self.flow.is_playing() {
            return Vec::new();
        }
        self.playtime += dt;

        if let Some(node) = self.graph.get_mut(self.player) {
            self.controller.update(node, intent, dt);
        }

        self.resolver.update(&mut self.graph, dt, &mut self.queue);

        self.fuel_spawner.update(&mut self.graph, dt);
        self.cloud_field.update(&mut self.graph);
        self.follow_camera();

        let speed = self
            .graph
            .get(self.player)
            .and_then(|node| node.velocity)
            .map_or(0.0, |velocity| velocity.norm());
        self.gauge.drain(speed, dt);

        let mut frame_events = Vec::new();
        for event in self.queue.drain() {
            match event {
                GameEvent::Pickup(id) => {
                    self.gauge.refill();
                    self.score += 1;
                    self.fuel_spawner.on_picked(&mut self.graph, id);
                }
                GameEvent::FatalCollision => self.flow.game_over(),
                GameEvent::FuelDepleted => {}
            }
            frame_events.push(event);
        }

        if self.flow.is_playing() && self.gauge.is_depleted() {
            log::info!("out of fuel after {:.1}s", self.playtime);
            self.flow.game_over();
            frame_events.push(GameEvent::FuelDepleted);
        }

        frame_events
    }

    /// Pin the chase camera behind the player craft
    fn follow_camera(&mut self) {
        let Some(player) = self.graph.get_mut(self.player) else {
            return;
        };
        let anchor = player.translation();
        let rotation = player.rotation();
        let offset = rotation * self.camera_offset;

        if let Some(camera) = self.graph.get_mut(self.camera) {
            camera.set_translation(anchor + offset);
            camera.set_rotation(rotation);
        }
    }

    /// Game flow state machine
    #[must_use]
    pub fn flow(&self) -> &GameFlow {
        &self.flow
    }

    /// Mutable game flow, for focus and game-over signals
    pub fn flow_mut(&mut self) -> &mut GameFlow {
        &mut self.flow
    }

    /// The scene graph
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable scene graph access, e.g. to attach extra scenery
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Pickups collected this session
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current fuel level in `[0, 1]`
    #[must_use]
    pub fn fuel_level(&self) -> f32 {
        self.gauge.level()
    }

    /// True while the low-fuel warning should show
    #[must_use]
    pub fn fuel_low(&self) -> bool {
        self.gauge.is_low()
    }

    /// Seconds of active play so far
    #[must_use]
    pub fn playtime(&self) -> f32 {
        self.playtime
    }

    /// The player craft node id
    #[must_use]
    pub fn player(&self) -> NodeId {
        self.player
    }

    /// The chase camera node id
    #[must_use]
    pub fn camera(&self) -> NodeId {
        self.camera
    }
}
