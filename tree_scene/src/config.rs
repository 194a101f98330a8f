//! Command line and application configuration.

use std::path::PathBuf;

use clap::Parser;
use hand_gesture::ClassifierConfig;
use tree_motion::TreeMode;

use crate::sim::SimConfig;

pub const DEFAULT_FOLIAGE: usize = 4000;

#[derive(Parser, Debug)]
#[command(name = "tree_scene")]
#[command(about = "Gesture-controlled Christmas tree", long_about = None)]
pub struct Cli {
    /// Directory of photos to hang on the tree
    #[arg(short, long)]
    pub photos: Option<PathBuf>,

    /// Number of foliage particles
    #[arg(long, default_value_t = DEFAULT_FOLIAGE)]
    pub foliage: usize,

    /// Drive gestures from a JSON-lines landmark recording
    #[arg(long, conflicts_with = "no_gesture")]
    pub replay: Option<PathBuf>,

    /// Save detected landmarks to a JSON-lines recording on exit
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Keyboard toggle only; no hand tracking
    #[arg(long)]
    pub no_gesture: bool,

    /// Seed for scatter positions (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames a gesture must be held beyond before it commits
    #[arg(long, default_value_t = 5)]
    pub threshold: u32,
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Where landmark frames come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GestureInput {
    /// Keyboard hand simulator.
    Simulated,
    Replay(PathBuf),
    Disabled,
}

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub photos_dir:    Option<PathBuf>,
    pub foliage_count: usize,
    pub gesture:       GestureInput,
    pub record:        Option<PathBuf>,
    pub seed:          Option<u64>,
    pub initial_mode:  TreeMode,
    pub classifier:    ClassifierConfig,
    pub sim:           SimConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            photos_dir:    None,
            foliage_count: DEFAULT_FOLIAGE,
            gesture:       GestureInput::Simulated,
            record:        None,
            seed:          None,
            initial_mode:  TreeMode::Formed,
            classifier:    ClassifierConfig::default(),
            sim:           SimConfig::default(),
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let gesture = match (cli.no_gesture, cli.replay) {
            (true, _)          => GestureInput::Disabled,
            (false, Some(p))   => GestureInput::Replay(p),
            (false, None)      => GestureInput::Simulated,
        };
        AppConfig {
            photos_dir:    cli.photos,
            foliage_count: cli.foliage,
            gesture,
            record:        cli.record,
            seed:          cli.seed,
            classifier:    ClassifierConfig {
                confidence_threshold: cli.threshold,
                ..ClassifierConfig::default()
            },
            ..AppConfig::default()
        }
    }
}
