//! Game flow and gameplay controllers
//!
//! The state machine gating the whole simulation, the event plumbing that
//! routes collision outcomes, and the controllers that turn those outcomes
//! into gameplay: fuel, steering, spawning.

pub mod events;
pub mod fuel;
pub mod player;
pub mod session;
pub mod spawn;
pub mod state;
