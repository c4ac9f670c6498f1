//! Collision detection and response
//!
//! Discrete, post-move AABB checks only: every moving body is integrated,
//! then tested against every other collidable node. No swept shapes, no
//! broad-phase structure; object counts in this game stay small enough for
//! the full pairwise scan.

mod aabb;
mod resolver;

pub use aabb::Aabb;
pub use resolver::CollisionResolver;
