//! Scene graph: transform nodes, tree ownership, traversal
//!
//! A [`SceneGraph`] owns every [`Node`] in a slotmap arena; [`NodeId`] keys
//! are the only way collaborators refer to nodes, so parent back-references
//! stay non-owning and the tree remains a single-owner hierarchy.

mod graph;
mod node;
mod payload;

pub use graph::{NodeId, SceneError, SceneGraph};
pub use node::{ColliderKind, Node};
pub use payload::{MaterialParams, MeshHandle, ModelInstance, NodePayload};
