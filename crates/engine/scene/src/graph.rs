//! Arena-backed scene graph with lazily revalidated transforms

use crate::{Object3D, Result, SceneError};
use glam::{Quat, Vec3};
use glance_core::math::{axis_angle, compose_rotation, local_model};
use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;

new_key_type! {
    /// Handle to a node in a [`SceneGraph`]
    pub struct NodeId;
}

/// Registry and owner of scene nodes
///
/// Replaces a process-wide id table: every graph has its own string-id index,
/// so several independent scenes can coexist.
///
/// # Example
///
/// ```
/// use glance_scene::SceneGraph;
/// use glam::Vec3;
///
/// let mut scene = SceneGraph::new();
/// let root = scene.create("root").unwrap();
/// let child = scene.create("child").unwrap();
/// scene.add_child(root, child).unwrap();
/// scene.set_origin(child, Vec3::X).unwrap();
///
/// scene.update(root).unwrap();
/// assert_eq!(scene.get(child).unwrap().world_position(), Vec3::X);
/// ```
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Object3D>,
    ids: HashMap<String, NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Register a new root node under `id`
    pub fn create(&mut self, id: impl Into<String>) -> Result<NodeId> {
        let id = id.into();
        if self.ids.contains_key(&id) {
            return Err(SceneError::DuplicateId(id));
        }
        let node = self.nodes.insert(Object3D::new(id.clone()));
        tracing::debug!("Created node '{}' ({:?})", id, node);
        self.ids.insert(id, node);
        Ok(node)
    }

    /// Unregister a node.
    ///
    /// The node is detached from its parent. Its children are not destroyed:
    /// they become roots and are invalidated.
    pub fn destroy(&mut self, node: NodeId) -> Result<()> {
        let removed = self
            .nodes
            .remove(node)
            .ok_or(SceneError::UnknownNode(node))?;
        self.ids.remove(&removed.id);

        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.remove(&removed.id);
        }
        for child in removed.children.values().copied() {
            if let Some(object) = self.nodes.get_mut(child) {
                object.parent = None;
            }
            self.invalidate(child)?;
        }

        tracing::debug!(
            "Destroyed node '{}', orphaned {} children",
            removed.id,
            removed.children.len()
        );
        Ok(())
    }

    /// Find a node by its string id
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn get(&self, node: NodeId) -> Option<&Object3D> {
        self.nodes.get(node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Object3D)> {
        self.nodes.iter()
    }

    /// Nodes without a parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, object)| object.parent.is_none())
            .map(|(node, _)| node)
    }

    /// `node` and everything below it, parents before children
    pub fn descendants(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.object(node)?;
        let mut order = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            order.push(current);
            if let Some(object) = self.nodes.get(current) {
                // Reverse so children come out in id order
                stack.extend(object.children.values().rev().copied());
            }
        }
        Ok(order)
    }

    fn object(&self, node: NodeId) -> Result<&Object3D> {
        self.nodes.get(node).ok_or(SceneError::UnknownNode(node))
    }

    fn object_mut(&mut self, node: NodeId) -> Result<&mut Object3D> {
        self.nodes.get_mut(node).ok_or(SceneError::UnknownNode(node))
    }

    // ========================================================================
    // Pose
    // ========================================================================

    pub fn set_origin(&mut self, node: NodeId, origin: Vec3) -> Result<()> {
        self.object_mut(node)?.origin = origin;
        self.invalidate(node)
    }

    pub fn set_orientation(&mut self, node: NodeId, orientation: Quat) -> Result<()> {
        self.object_mut(node)?.orientation = orientation;
        self.invalidate(node)
    }

    pub fn set_scale(&mut self, node: NodeId, scale: Vec3) -> Result<()> {
        self.object_mut(node)?.scale = scale;
        self.invalidate(node)
    }

    /// Set origin and orientation with a single invalidation
    pub fn set_pose(&mut self, node: NodeId, origin: Vec3, orientation: Quat) -> Result<()> {
        let object = self.object_mut(node)?;
        object.origin = origin;
        object.orientation = orientation;
        self.invalidate(node)
    }

    /// Move the origin by `delta` in parent space
    pub fn translate(&mut self, node: NodeId, delta: Vec3) -> Result<()> {
        self.object_mut(node)?.origin += delta;
        self.invalidate(node)
    }

    /// Apply `rotation` on top of the current orientation, renormalising
    pub fn rotate(&mut self, node: NodeId, rotation: Quat) -> Result<()> {
        let object = self.object_mut(node)?;
        object.orientation = compose_rotation(rotation, object.orientation);
        self.invalidate(node)
    }

    /// Rotate by `angle` radians around `axis`; a zero-length axis is an error
    pub fn rotate_about(&mut self, node: NodeId, axis: Vec3, angle: f32) -> Result<()> {
        self.object(node)?;
        let rotation = axis_angle(axis, angle).ok_or(SceneError::DegenerateAxis)?;
        self.rotate(node, rotation)
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Attach `child` under `parent`.
    ///
    /// Fails if `child` already has a parent, or if it is `parent` itself or
    /// one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.object(parent)?;
        let child_object = self.object(child)?;
        if let Some(existing) = child_object.parent {
            return Err(SceneError::AlreadyParented {
                child,
                parent: existing,
            });
        }

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(SceneError::CycleDetected { parent, child });
            }
            ancestor = self.nodes.get(current).and_then(|object| object.parent);
        }

        let key = child_object.id.clone();
        self.object_mut(child)?.parent = Some(parent);
        self.object_mut(parent)?.children.insert(key, child);
        tracing::debug!("Attached {:?} under {:?}", child, parent);
        self.invalidate(child)
    }

    /// Detach `child` from `parent`; returns false if it was not a child
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let key = match self.nodes.get(child) {
            Some(object) if object.parent == Some(parent) => object.id.clone(),
            _ => return false,
        };
        if let Some(object) = self.nodes.get_mut(parent) {
            object.children.remove(&key);
        }
        if let Some(object) = self.nodes.get_mut(child) {
            object.parent = None;
        }
        tracing::debug!("Detached {:?} from {:?}", child, parent);
        // child exists, checked above
        self.invalidate(child).is_ok()
    }

    // ========================================================================
    // Transform cache
    // ========================================================================

    /// Mark `node` and every descendant stale
    pub fn invalidate(&mut self, node: NodeId) -> Result<()> {
        self.object(node)?;
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(object) = self.nodes.get_mut(current) {
                object.is_model_valid = false;
                stack.extend(object.children.values().copied());
            }
        }
        Ok(())
    }

    /// Revalidate the subtree under `node` in one top-down walk.
    ///
    /// A node is recomputed when it is stale or its parent was recomputed in
    /// this walk; every child is visited either way. The parent's cached
    /// world transform is used as-is for `node` itself, so call this on a root
    /// (or after the ancestors are valid). Returns the number of nodes
    /// recomputed.
    pub fn update(&mut self, node: NodeId) -> Result<usize> {
        self.object(node)?;
        let mut recomputed = 0;
        let mut stack = vec![(node, false)];
        while let Some((current, parent_changed)) = stack.pop() {
            let parent_world = self
                .nodes
                .get(current)
                .and_then(|object| object.parent)
                .and_then(|parent| self.nodes.get(parent))
                .map(|parent| parent.world_model);
            let Some(object) = self.nodes.get_mut(current) else {
                continue;
            };

            let changed = !object.is_model_valid || parent_changed;
            if changed {
                object.local_model = local_model(object.origin, object.orientation, object.scale);
                object.world_model = match parent_world {
                    Some(parent_world) => parent_world * object.local_model,
                    None => object.local_model,
                };
                object.is_model_valid = true;
                recomputed += 1;
            }
            stack.extend(object.children.values().map(|&child| (child, changed)));
        }
        tracing::trace!("Updated subtree {:?}: {} nodes recomputed", node, recomputed);
        Ok(recomputed)
    }

    /// Revalidate every tree in the graph
    pub fn update_all(&mut self) -> usize {
        let roots: Vec<NodeId> = self.roots().collect();
        roots
            .into_iter()
            .filter_map(|root| self.update(root).ok())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn test_create_and_lookup() {
        let mut scene = SceneGraph::new();
        let a = scene.create("a").expect("create a");
        let b = scene.create(String::from("b")).expect("create b");

        assert_eq!(scene.lookup("a"), Some(a));
        assert_eq!(scene.lookup("b"), Some(b));
        assert_eq!(scene.lookup("c"), None);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(a).map(|o| o.id()), Some("a"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut scene = SceneGraph::new();
        scene.create("camera").expect("first create");
        assert_eq!(
            scene.create("camera"),
            Err(SceneError::DuplicateId("camera".to_string()))
        );
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_graphs_are_independent() {
        let mut first = SceneGraph::new();
        let mut second = SceneGraph::new();
        first.create("shared").expect("create in first");
        second.create("shared").expect("same id in another graph");
    }

    #[test]
    fn test_new_node_is_invalid_until_update() {
        let mut scene = SceneGraph::new();
        let node = scene.create("n").expect("create");
        assert!(!scene.get(node).unwrap().is_model_valid());
        assert_eq!(scene.update(node), Ok(1));
        assert!(scene.get(node).unwrap().is_model_valid());
    }

    #[test]
    fn test_setters_invalidate_subtree() {
        let mut scene = SceneGraph::new();
        let root = scene.create("root").unwrap();
        let mid = scene.create("mid").unwrap();
        let leaf = scene.create("leaf").unwrap();
        scene.add_child(root, mid).unwrap();
        scene.add_child(mid, leaf).unwrap();
        scene.update(root).unwrap();

        scene.set_scale(root, Vec3::splat(2.0)).unwrap();
        for node in [root, mid, leaf] {
            assert!(!scene.get(node).unwrap().is_model_valid());
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut scene = SceneGraph::new();
        let root = scene.create("root").unwrap();
        let child = scene.create("child").unwrap();
        scene.add_child(root, child).unwrap();
        scene.set_origin(child, Vec3::new(1.0, 2.0, 3.0)).unwrap();

        assert_eq!(scene.update(root), Ok(2));
        let first = scene.get(child).unwrap().world_model();
        assert_eq!(scene.update(root), Ok(0));
        assert_eq!(scene.get(child).unwrap().world_model(), first);
    }

    #[test]
    fn test_update_visits_valid_parent_with_stale_child() {
        let mut scene = SceneGraph::new();
        let root = scene.create("root").unwrap();
        let child = scene.create("child").unwrap();
        scene.add_child(root, child).unwrap();
        scene.update(root).unwrap();

        scene.set_origin(child, Vec3::Y).unwrap();
        assert!(scene.get(root).unwrap().is_model_valid());
        assert_eq!(scene.update(root), Ok(1));
        assert_eq!(scene.get(child).unwrap().world_position(), Vec3::Y);
    }

    #[test]
    fn test_recomputed_parent_forces_valid_child() {
        let mut scene = SceneGraph::new();
        let root = scene.create("root").unwrap();
        let child = scene.create("child").unwrap();
        scene.add_child(root, child).unwrap();

        // Child validated against a stale parent, then the parent updates
        scene.update(child).unwrap();
        scene.set_origin(root, Vec3::Z).unwrap();
        scene.update(child).unwrap();
        scene.update(root).unwrap();

        assert_eq!(scene.get(child).unwrap().world_position(), Vec3::Z);
    }

    #[test]
    fn test_rotate_about_zero_axis() {
        let mut scene = SceneGraph::new();
        let node = scene.create("n").unwrap();
        assert_eq!(
            scene.rotate_about(node, Vec3::ZERO, 1.0),
            Err(SceneError::DegenerateAxis)
        );
        assert_eq!(scene.get(node).unwrap().orientation(), Quat::IDENTITY);
    }

    #[test]
    fn test_rotate_renormalises() {
        let mut scene = SceneGraph::new();
        let node = scene.create("spinner").unwrap();
        let step = Quat::from_euler(glam::EulerRot::XYZ, 0.011, -0.023, 0.031);
        for _ in 0..10_000 {
            scene.rotate(node, step).unwrap();
        }
        let length = scene.get(node).unwrap().orientation().length();
        assert!((length - 1.0).abs() < 1e-5, "orientation length {}", length);
    }

    #[test]
    fn test_translate_accumulates() {
        let mut scene = SceneGraph::new();
        let node = scene.create("n").unwrap();
        scene.translate(node, Vec3::X).unwrap();
        scene.translate(node, Vec3::Y).unwrap();
        scene.update(node).unwrap();
        assert_eq!(
            scene.get(node).unwrap().world_model(),
            Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0))
        );
    }

    #[test]
    fn test_unknown_node() {
        let mut scene = SceneGraph::new();
        let node = scene.create("gone").unwrap();
        scene.destroy(node).unwrap();

        assert_eq!(scene.update(node), Err(SceneError::UnknownNode(node)));
        assert_eq!(
            scene.set_origin(node, Vec3::ONE),
            Err(SceneError::UnknownNode(node))
        );
        assert_eq!(scene.destroy(node), Err(SceneError::UnknownNode(node)));
        assert_eq!(scene.lookup("gone"), None);
        assert!(!scene.contains(node));
    }

    #[test]
    fn test_iter_visits_live_nodes() {
        let mut scene = SceneGraph::new();
        let keep = scene.create("keep").unwrap();
        let gone = scene.create("gone").unwrap();
        scene.destroy(gone).unwrap();

        assert!(scene.contains(keep));
        assert!(!scene.contains(gone));
        let ids: Vec<_> = scene.iter().map(|(node, object)| (node, object.id())).collect();
        assert_eq!(ids, vec![(keep, "keep")]);
    }

    #[test]
    fn test_descendants_order() {
        let mut scene = SceneGraph::new();
        let root = scene.create("root").unwrap();
        let b = scene.create("b").unwrap();
        let a = scene.create("a").unwrap();
        let a1 = scene.create("a1").unwrap();
        scene.add_child(root, b).unwrap();
        scene.add_child(root, a).unwrap();
        scene.add_child(a, a1).unwrap();

        assert_eq!(scene.descendants(root).unwrap(), vec![root, a, a1, b]);
    }
}
