//! # Eldoria Main Entry Point
//!
//! Parses the command line, sets up logging and hands control to the scene loop.

use clap::Parser;
use eldoria::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use eldoria::scenes::SceneManager;
use eldoria::{EldoriaResult, FileStore, GameConfig, GameState, InputHandler};
use log::{error, info};
use macroquad::prelude::Conf;
use std::path::PathBuf;

/// Command line arguments for Eldoria.
#[derive(Parser, Debug)]
#[command(name = "eldoria")]
#[command(about = "A small turn-based creature-collection game")]
#[command(version)]
struct Args {
    /// Random seed for encounters and captures
    #[arg(short, long)]
    seed: Option<u64>,

    /// Save file location
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Chance per tick of a wild encounter (0.0 to 1.0)
    #[arg(long)]
    encounter_chance: Option<f64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Eldoria: The Lost Artifacts".to_string(),
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Eldoria v{}", eldoria::VERSION);

    if let Err(e) = run_game(&args).await {
        error!("Game exited with an error: {}", e);
        std::process::exit(1);
    }
}

/// Runs the menu and game loop until the player quits.
async fn run_game(args: &Args) -> EldoriaResult<()> {
    let config = build_config(args);
    info!("Using seed {} and save file {:?}", config.seed, config.save_path);

    let store = FileStore::new(config.save_path.clone());
    let game_state = GameState::new(config);

    let mut scenes = SceneManager::new(game_state, InputHandler::new(), store);
    scenes.run().await?;

    info!("Game loop ended");
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .format_target(false)
        .init();
}

/// Builds the session configuration from the command line.
fn build_config(args: &Args) -> GameConfig {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut config = GameConfig::new(seed);

    if let Some(path) = &args.save_file {
        config.save_path = path.clone();
    }
    if let Some(chance) = args.encounter_chance {
        config.encounter_chance = chance.clamp(0.0, 1.0);
    }
    config
}
