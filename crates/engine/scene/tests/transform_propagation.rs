//! Transform cache validation tests
//!
//! Verifies that world transforms follow the hierarchy after invalidation and
//! update, and that stale caches stay stale until the next update.

use glam::{Mat4, Quat, Vec3};
use glance_core::math::local_model;
use glance_scene::{NodeId, SceneGraph};

/// Helper: build a tree of `depth` levels with `fanout` children per node,
/// giving every node a distinct pose
fn build_tree(scene: &mut SceneGraph, depth: usize, fanout: usize) -> NodeId {
    let root = scene.create("n").unwrap();
    let mut frontier = vec![(root, String::from("n"))];
    let mut counter = 0.0f32;

    for _ in 0..depth {
        let mut next = Vec::new();
        for (parent, name) in frontier {
            for i in 0..fanout {
                counter += 1.0;
                let child_name = format!("{}.{}", name, i);
                let child = scene.create(child_name.clone()).unwrap();
                scene.add_child(parent, child).unwrap();
                scene
                    .set_origin(child, Vec3::new(counter, -0.5 * counter, 0.25))
                    .unwrap();
                scene
                    .set_orientation(child, Quat::from_rotation_y(0.1 * counter))
                    .unwrap();
                scene
                    .set_scale(child, Vec3::new(1.0, 1.0 + 0.01 * counter, 1.0))
                    .unwrap();
                next.push((child, child_name));
            }
        }
        frontier = next;
    }
    root
}

/// Helper: check world = parent.world * local for every node under `root`
fn assert_consistent(scene: &SceneGraph, root: NodeId) {
    for node in scene.descendants(root).unwrap() {
        let object = scene.get(node).unwrap();
        assert!(object.is_model_valid(), "{} should be valid", object.id());

        let local = local_model(object.origin(), object.orientation(), object.scale());
        assert!(object.local_model().abs_diff_eq(local, 1e-5));

        let expected = match object.parent() {
            Some(parent) => scene.get(parent).unwrap().world_model() * local,
            None => local,
        };
        assert!(
            object.world_model().abs_diff_eq(expected, 1e-4),
            "world model of {} does not follow its parent",
            object.id()
        );
    }
}

#[test]
fn test_world_follows_parent_after_update() {
    let mut scene = SceneGraph::new();
    let root = build_tree(&mut scene, 3, 3);
    scene.set_origin(root, Vec3::new(0.0, 2.0, -1.0)).unwrap();

    scene.update(root).unwrap();
    assert_consistent(&scene, root);
}

#[test]
fn test_invalidate_any_node_then_update_root() {
    let mut scene = SceneGraph::new();
    let root = build_tree(&mut scene, 3, 2);
    scene.update(root).unwrap();

    let all = scene.descendants(root).unwrap();
    for (i, &node) in all.iter().enumerate() {
        scene.invalidate(node).unwrap();
        scene
            .rotate(node, Quat::from_rotation_x(0.05 * i as f32))
            .unwrap();
        scene.update(root).unwrap();
        assert_consistent(&scene, root);
    }
}

#[test]
fn test_second_update_is_noop() {
    let mut scene = SceneGraph::new();
    let root = build_tree(&mut scene, 2, 4);

    let first = scene.update(root).unwrap();
    assert_eq!(first, scene.len());
    let before: Vec<Mat4> = scene
        .descendants(root)
        .unwrap()
        .into_iter()
        .map(|node| scene.get(node).unwrap().world_model())
        .collect();

    assert_eq!(scene.update(root).unwrap(), 0);
    let after: Vec<Mat4> = scene
        .descendants(root)
        .unwrap()
        .into_iter()
        .map(|node| scene.get(node).unwrap().world_model())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_child_stale_until_root_update() {
    let mut scene = SceneGraph::new();
    let root = scene.create("R").unwrap();
    let child = scene.create("C").unwrap();
    scene.add_child(root, child).unwrap();
    scene.set_origin(child, Vec3::new(1.0, 0.0, 0.0)).unwrap();

    scene.update(root).unwrap();
    let translated_once = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(scene.get(child).unwrap().world_model(), translated_once);

    scene.set_origin(root, Vec3::new(0.0, 5.0, 0.0)).unwrap();
    let stale = scene.get(child).unwrap();
    assert!(!stale.is_model_valid());
    assert_eq!(stale.world_model(), translated_once);

    scene.update(root).unwrap();
    assert_eq!(
        scene.get(child).unwrap().world_model(),
        Mat4::from_translation(Vec3::new(1.0, 5.0, 0.0))
    );
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let mut scene = SceneGraph::new();
    let root = scene.create("link0").unwrap();
    let mut parent = root;
    for i in 1..5_000 {
        let link = scene.create(format!("link{}", i)).unwrap();
        scene.add_child(parent, link).unwrap();
        scene.set_origin(link, Vec3::X).unwrap();
        parent = link;
    }

    assert_eq!(scene.update(root).unwrap(), 5_000);
    let tip = scene.get(parent).unwrap().world_position();
    assert!((tip.x - 4_999.0).abs() < 1e-2);
}

#[test]
fn test_update_all_covers_every_root() {
    let mut scene = SceneGraph::new();
    let a = scene.create("a").unwrap();
    let b = scene.create("b").unwrap();
    let b1 = scene.create("b1").unwrap();
    scene.add_child(b, b1).unwrap();

    assert_eq!(scene.update_all(), 3);
    for node in [a, b, b1] {
        assert!(scene.get(node).unwrap().is_model_valid());
    }
    assert_eq!(scene.update_all(), 0);
}
