//! Scene graph node

use crate::NodeId;
use glam::{Mat4, Quat, Vec3};
use std::collections::BTreeMap;

/// A node in a [`crate::SceneGraph`].
///
/// Holds the local pose, the hierarchy links and the cached transforms. All
/// mutation goes through the graph so that invalidation cannot be skipped;
/// this type only exposes reads.
///
/// While [`Object3D::is_model_valid`] is true, `local_model` and `world_model`
/// match the current pose and parent chain. Otherwise they are stale until
/// the next [`crate::SceneGraph::update`] that reaches this node.
#[derive(Debug, Clone)]
pub struct Object3D {
    pub(crate) id: String,
    pub(crate) origin: Vec3,
    pub(crate) orientation: Quat,
    pub(crate) scale: Vec3,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: BTreeMap<String, NodeId>,
    pub(crate) local_model: Mat4,
    pub(crate) world_model: Mat4,
    pub(crate) is_model_valid: bool,
}

impl Object3D {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            origin: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
            children: BTreeMap::new(),
            local_model: Mat4::IDENTITY,
            world_model: Mat4::IDENTITY,
            is_model_valid: false,
        }
    }

    /// Unique id within the owning graph
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position relative to the parent
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Rotation relative to the parent
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Per-axis scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Child handles, ordered by child id
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    /// Look up a direct child by its string id
    pub fn child(&self, id: &str) -> Option<NodeId> {
        self.children.get(id).copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Cached local transform. Not revalidated on read.
    pub fn local_model(&self) -> Mat4 {
        self.local_model
    }

    /// Cached world transform. Not revalidated on read.
    pub fn world_model(&self) -> Mat4 {
        self.world_model
    }

    pub fn is_model_valid(&self) -> bool {
        self.is_model_valid
    }

    /// World-space position from the cached world transform
    pub fn world_position(&self) -> Vec3 {
        self.world_model.w_axis.truncate()
    }
}
