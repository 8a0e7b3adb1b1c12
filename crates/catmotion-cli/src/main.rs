//! catmotion CLI - simulate, render and validate procedural cat animation
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see state
//! transitions and wander events.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use catmotion_cli::commands;
use catmotion_cli::commands::render::{RenderFormat, RenderOptions};

/// catmotion - procedural cat animation
#[derive(Parser)]
#[command(name = "catmotion")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene and write its snapshot stream as JSON lines
    Simulate {
        /// Path to the scene file (JSON)
        #[arg(short, long)]
        scene: String,

        /// Override the scene's frame count
        #[arg(short, long)]
        frames: Option<u32>,

        /// Output file for the JSON-lines stream (`-` for stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Output a machine-readable JSON summary (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a scene to PNG frames or an animated GIF
    Render {
        /// Path to the scene file (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output directory (png) or file (gif)
        #[arg(short, long)]
        out: String,

        /// Image width in pixels
        #[arg(long, default_value_t = 500)]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = 350)]
        height: u32,

        /// Output format (png, gif)
        #[arg(long, default_value = "png", value_parser = ["png", "gif"])]
        format: String,

        /// Keep every n-th frame
        #[arg(long, default_value_t = 1)]
        every: u32,
    },

    /// Validate a scene file without running it
    Validate {
        /// Path to the scene file (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Live demo of the background tick loop
    Run {
        /// How long to run, in seconds
        #[arg(long, default_value_t = 5.0)]
        seconds: f64,

        /// Tick rate
        #[arg(long, default_value_t = 60.0)]
        hz: f64,

        /// RNG seed
        #[arg(long, default_value_t = catmotion_core::DEFAULT_SEED)]
        seed: u32,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scene,
            frames,
            output,
            json,
        } => commands::simulate::run(&scene, frames, output.as_deref(), json),
        Commands::Render {
            scene,
            out,
            width,
            height,
            format,
            every,
        } => format.parse::<RenderFormat>().and_then(|format| {
            commands::render::run(&RenderOptions {
                scene_path: &scene,
                out: &out,
                width,
                height,
                format,
                every,
            })
        }),
        Commands::Validate { scene, json } => commands::validate::run(&scene, json),
        Commands::Run { seconds, hz, seed } => commands::run::run(seconds, hz, seed),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
