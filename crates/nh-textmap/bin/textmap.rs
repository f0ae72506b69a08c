//! Replay recorded observations through the dungeon map
//!
//! Reads a JSON array of frames and prints the map description produced
//! after each one.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use tracing::{debug, info};

use nh_textmap::{DungeonMap, Entity, Grid, MapConfig, NetHackGlyphs, Observation, PlayerStatus};

/// Replay recorded NetHack observations and print map descriptions
#[derive(Parser, Debug)]
#[command(name = "textmap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of frames
    replay: PathBuf,

    /// JSON map configuration (defaults to the 80x21 NetHack map)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Only print the description of the last frame
    #[arg(short = 'l', long = "last")]
    last: bool,
}

/// One recorded turn
#[derive(Debug, Deserialize)]
struct Frame {
    glyphs: Vec<Vec<u16>>,
    status: PlayerStatus,
    #[serde(default)]
    message: String,
    #[serde(default)]
    entities: Vec<Entity>,
    /// Dungeon overview text shown this turn, if any
    #[serde(default)]
    overview: Option<String>,
}

fn load_config(path: Option<&PathBuf>) -> Result<MapConfig> {
    let Some(path) = path else {
        return Ok(MapConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    MapConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
}

/// Fold one frame into the map and return the level description
///
/// A due terrain recall is taken after the turn's update, from the same
/// glyphs.
fn play_frame(map: &mut DungeonMap<NetHackGlyphs>, frame: Frame) -> Result<String> {
    let Some(glyphs) = Grid::from_rows(frame.glyphs) else {
        bail!("glyph rows have different lengths");
    };
    let status = frame.status;

    if let Some(text) = frame.overview {
        if map.overview_due(&status) {
            map.record_overview(text, &status);
        }
    } else if map.overview_due(&status) {
        debug!(time = status.time, "no dungeon overview for this depth");
    }

    let description = map
        .update(&Observation {
            glyphs: &glyphs,
            status,
            message: &frame.message,
            entities: &frame.entities,
        })
        .context("update")?
        .to_string();

    if map.recall_due(&status) {
        map.recall(&glyphs, &status).context("recall")?;
    }
    Ok(description)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let replay = fs::read_to_string(&args.replay)
        .with_context(|| format!("reading replay {}", args.replay.display()))?;
    let frames: Vec<Frame> = serde_json::from_str(&replay)
        .with_context(|| format!("parsing replay {}", args.replay.display()))?;
    info!(frames = frames.len(), "replay loaded");

    let mut map = DungeonMap::new(NetHackGlyphs, config);
    let mut last = String::new();

    for (index, frame) in frames.into_iter().enumerate() {
        let status = frame.status;
        let description =
            play_frame(&mut map, frame).with_context(|| format!("frame {index}"))?;

        if args.last {
            last = description;
        } else {
            println!("=== t={} {} ===", status.time, status.level_key());
            println!("{description}");
        }
    }

    if args.last {
        println!("{last}");
    }
    Ok(())
}
