//! Scene nodes as controller targets

use crate::{NodeId, SceneGraph};
use glam::{Quat, Vec3};
use glance_core::camera::PoseTarget;
use std::cell::RefCell;
use std::rc::Rc;

/// A scene node driven by a controller such as [`glance_core::camera::OrbitControl`].
///
/// The graph is shared with the rest of the frame loop through
/// `Rc<RefCell<_>>`, so the borrow is only held for the duration of one call.
/// Poses are in the node's parent space. Writes to a destroyed node are logged
/// and dropped.
#[derive(Debug, Clone)]
pub struct SceneNodeTarget {
    graph: Rc<RefCell<SceneGraph>>,
    node: NodeId,
}

impl SceneNodeTarget {
    pub fn new(graph: Rc<RefCell<SceneGraph>>, node: NodeId) -> Self {
        Self { graph, node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn graph(&self) -> &Rc<RefCell<SceneGraph>> {
        &self.graph
    }
}

impl PoseTarget for SceneNodeTarget {
    fn position(&self) -> Vec3 {
        self.graph
            .borrow()
            .get(self.node)
            .map(|object| object.origin())
            .unwrap_or(Vec3::ZERO)
    }

    fn orientation(&self) -> Quat {
        self.graph
            .borrow()
            .get(self.node)
            .map(|object| object.orientation())
            .unwrap_or(Quat::IDENTITY)
    }

    fn set_pose(&mut self, position: Vec3, orientation: Quat) {
        if let Err(e) = self
            .graph
            .borrow_mut()
            .set_pose(self.node, position, orientation)
        {
            tracing::warn!("Dropping pose for scene node: {}", e);
        }
    }
}
