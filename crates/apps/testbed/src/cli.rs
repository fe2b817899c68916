//! Command line arguments for the testbed

use clap::Parser;
use std::path::PathBuf;

/// Headless scene testbed
///
/// Builds a small scene, drives an orbit camera with scripted pointer and
/// wheel input, and logs the resulting world transforms.
#[derive(Parser, Debug, Clone)]
#[command(name = "testbed")]
#[command(about = "Headless scene graph and orbit camera testbed")]
pub struct Args {
    /// Number of frames to simulate
    #[arg(long, short = 'f', value_name = "FRAMES", default_value_t = 240)]
    pub frames: u64,

    /// Length of the satellite chain under the turntable
    #[arg(long, short = 'd', value_name = "DEPTH", default_value_t = 3)]
    pub depth: usize,

    /// Load orbit control configuration from a RON file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log a frame report every N frames
    #[arg(long, value_name = "N", default_value_t = 30)]
    pub report_every: u64,
}
