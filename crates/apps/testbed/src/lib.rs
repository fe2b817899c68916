//! Headless scene testbed
//!
//! Wires a [`SceneGraph`] and an [`OrbitControl`] together the way a render
//! loop would: input events first, then one `update_all` walk, then reads of
//! the cached world transforms.

pub mod cli;
pub mod script;

use glam::{Mat4, Quat, Vec3};
use glance_core::camera::{Camera, OrbitControl, OrbitControlConfig, PoseTarget, WheelBinding};
use glance_scene::{NodeId, SceneGraph, SceneNodeTarget};
use script::{input_for_frame, ScriptedInput};
use std::cell::RefCell;
use std::rc::Rc;

/// Turntable spin per frame, in radians
const SPIN_PER_FRAME: f32 = 0.01;

/// Orbit target that moves a scene node and carries the lens settings
pub struct CameraNode {
    node: SceneNodeTarget,
    lens: Camera,
}

impl CameraNode {
    pub fn new(node: SceneNodeTarget) -> Self {
        Self {
            node,
            lens: Camera::default(),
        }
    }

    pub fn lens(&self) -> &Camera {
        &self.lens
    }
}

impl PoseTarget for CameraNode {
    fn position(&self) -> Vec3 {
        self.node.position()
    }

    fn orientation(&self) -> Quat {
        self.node.orientation()
    }

    fn set_pose(&mut self, position: Vec3, orientation: Quat) {
        self.lens.set_pose(position, orientation);
        self.node.set_pose(position, orientation);
    }

    fn field_of_view(&self) -> Option<f32> {
        Some(self.lens.vfov)
    }

    fn set_field_of_view(&mut self, vfov: f32) {
        self.lens.vfov = vfov;
    }
}

/// Summary of one simulated frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Nodes recomputed by this frame's update walk
    pub recomputed: usize,
    pub camera_position: Vec3,
    /// World position of the deepest satellite
    pub tip_position: Vec3,
    pub radius: f32,
    pub vfov: f32,
    /// Projection times the camera node's inverse world transform
    pub view_projection: Mat4,
}

/// Scene with a spinning turntable, a satellite chain and an orbiting camera node
pub struct SceneTestbed {
    graph: Rc<RefCell<SceneGraph>>,
    orbit: OrbitControl<CameraNode>,
    binding: WheelBinding,
    turntable: NodeId,
    tip: NodeId,
    camera: NodeId,
    frame: u64,
}

impl SceneTestbed {
    /// Build the scene with a satellite chain of `depth` links
    pub fn new(config: OrbitControlConfig, depth: usize) -> anyhow::Result<Self> {
        let graph = Rc::new(RefCell::new(SceneGraph::new()));

        let (turntable, tip, camera) = {
            let mut scene = graph.borrow_mut();
            let world = scene.create("world")?;
            let turntable = scene.create("turntable")?;
            scene.add_child(world, turntable)?;

            let mut tip = turntable;
            for i in 0..depth {
                let satellite = scene.create(format!("satellite{}", i))?;
                scene.add_child(tip, satellite)?;
                scene.set_origin(satellite, Vec3::new(1.5, 0.0, 0.0))?;
                scene.set_scale(satellite, Vec3::splat(0.8))?;
                tip = satellite;
            }

            let camera = scene.create("camera")?;
            (turntable, tip, camera)
        };

        let target = CameraNode::new(SceneNodeTarget::new(graph.clone(), camera));
        let orbit = OrbitControl::new(target, config);
        tracing::info!(
            "Scene ready: {} nodes, satellite depth {}",
            graph.borrow().len(),
            depth
        );

        Ok(Self {
            graph,
            orbit,
            binding: WheelBinding::default(),
            turntable,
            tip,
            camera,
            frame: 0,
        })
    }

    pub fn graph(&self) -> &Rc<RefCell<SceneGraph>> {
        &self.graph
    }

    pub fn orbit(&self) -> &OrbitControl<CameraNode> {
        &self.orbit
    }

    /// Apply this frame's input, spin the turntable and revalidate the scene
    pub fn step(&mut self) -> anyhow::Result<FrameReport> {
        for input in input_for_frame(self.frame) {
            match input {
                ScriptedInput::Pointer(event) => {
                    self.orbit.handle_pointer(&event);
                }
                ScriptedInput::Wheel(event) => self.binding.dispatch(&event, &mut self.orbit),
            }
        }

        let mut scene = self.graph.borrow_mut();
        scene.rotate_about(self.turntable, Vec3::Y, SPIN_PER_FRAME)?;
        let recomputed = scene.update_all();

        let world_model = |node: NodeId| {
            scene
                .get(node)
                .map(|object| object.world_model())
                .ok_or_else(|| anyhow::anyhow!("node {:?} vanished from the scene", node))
        };
        let camera_model = world_model(self.camera)?;
        let lens = self.orbit.target().lens();
        let report = FrameReport {
            frame: self.frame,
            recomputed,
            camera_position: camera_model.w_axis.truncate(),
            tip_position: world_model(self.tip)?.w_axis.truncate(),
            radius: self.orbit.radius(),
            vfov: lens.vfov,
            view_projection: lens.projection() * camera_model.inverse(),
        };
        drop(scene);

        self.frame += 1;
        Ok(report)
    }

    /// Run `frames` frames, logging a report every `report_every` frames
    pub fn run(&mut self, frames: u64, report_every: u64) -> anyhow::Result<Option<FrameReport>> {
        let mut last = None;
        for _ in 0..frames {
            let report = self.step()?;
            if report_every > 0 && report.frame % report_every == 0 {
                tracing::info!(
                    "frame {:>5}: recomputed {:>3} nodes, camera {:?}, radius {:.3}, vfov {:.3}, tip {:?}",
                    report.frame,
                    report.recomputed,
                    report.camera_position,
                    report.radius,
                    report.vfov,
                    report.tip_position
                );
            }
            last = Some(report);
        }
        Ok(last)
    }
}
