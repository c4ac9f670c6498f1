//! # Airborne Core
//!
//! Runtime core of the Airborne flight game: a hierarchical scene graph with
//! lazily synchronized transforms, an axis-aligned collision pass, and the
//! game-flow state machine that ties collision outcomes to gameplay.
//!
//! The crate deliberately stops at the simulation boundary. Asset loading,
//! rendering, input capture, HUD updates, and audio are external
//! collaborators: the renderer reads world matrices and material parameters
//! through traversal, the input layer writes a [`game::player::SteerIntent`]
//! per frame, and gameplay spawners attach and detach nodes through
//! [`scene::SceneGraph`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use airborne_core::prelude::*;
//!
//! let config = GameConfig::default();
//! let mut sim = Simulation::new(&config);
//! sim.flow_mut().focus_gained();
//!
//! // one discrete update per display refresh
//! let events = sim.advance(1.0 / 60.0, &SteerIntent::default());
//! for event in events {
//!     println!("{event:?}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod game;
pub mod physics;
pub mod scene;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, GameConfig},
        foundation::{
            math::{Mat4, Quat, Transform, Vec3},
            time::Timer,
        },
        game::{
            events::{GameEvent, GameEvents},
            player::SteerIntent,
            session::{ScenePayloads, Simulation},
            state::{GameFlow, GameState},
        },
        physics::{Aabb, CollisionResolver},
        scene::{ColliderKind, Node, NodeId, NodePayload, SceneGraph},
    };
}
