//! Headless Scene Testbed
//!
//! Runs the scene graph and orbit camera through a scripted input loop.
//!
//! Orbit control settings can be loaded from a RON file.
//! Use `--config <path>` to specify a config file.

use anyhow::Context;
use clap::Parser;
use glance_core::camera::OrbitControlConfig;
use testbed::cli::Args;
use testbed::SceneTestbed;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => OrbitControlConfig::load(path)
            .with_context(|| format!("Failed to load orbit config {}", path.display()))?,
        None => OrbitControlConfig::default(),
    };

    let mut testbed = SceneTestbed::new(config, args.depth)?;
    let last = testbed.run(args.frames, args.report_every)?;

    match last {
        Some(report) => tracing::info!(
            "Finished {} frames: camera at {:?}, radius {:.3}, offset {:?}",
            report.frame + 1,
            report.camera_position,
            report.radius,
            testbed.orbit().offset()
        ),
        None => tracing::info!("No frames requested"),
    }

    Ok(())
}
