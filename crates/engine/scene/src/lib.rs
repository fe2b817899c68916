//! Scene graph for Glance
//!
//! A [`SceneGraph`] owns every [`Object3D`] node in an arena and hands out
//! [`NodeId`] handles. Nodes form a strict tree: each has at most one parent
//! (a non-owning handle) and children keyed by their string id.
//!
//! Transforms are cached per node. Any pose or hierarchy change marks the node
//! and its whole subtree stale at once; [`SceneGraph::update`] then revalidates
//! in a single top-down walk, typically once per frame before rendering reads
//! [`Object3D::world_model`].

mod error;
mod graph;
mod object;
mod target;

pub use error::{Result, SceneError};
pub use graph::{NodeId, SceneGraph};
pub use object::Object3D;
pub use target::SceneNodeTarget;
