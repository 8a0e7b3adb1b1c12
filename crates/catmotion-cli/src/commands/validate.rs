//! Validate command implementation
//!
//! Parses a scene file and checks every parameter without simulating.

use anyhow::Result;
use catmotion_core::SceneSpec;
use colored::Colorize;
use std::process::ExitCode;

use super::json_output::{print_json, JsonError, ValidateOutput};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(scene_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        Ok(run_json(scene_path))
    } else {
        Ok(run_human(scene_path))
    }
}

fn run_human(scene_path: &str) -> ExitCode {
    println!("{} {}", "Validating:".cyan().bold(), scene_path);

    let scene = match SceneSpec::load(scene_path) {
        Ok(scene) => scene,
        Err(e) => {
            println!("  {} [{}] {}", "x".red(), e.code(), e);
            println!("\n{} Scene could not be loaded", "FAILED".red().bold());
            return ExitCode::from(1);
        }
    };

    println!(
        "{} seed {}, {} frames at {} fps ({:.2}s), {} cue(s)",
        "Scene:".dimmed(),
        scene.seed,
        scene.frames,
        scene.fps,
        scene.duration_seconds(),
        scene.cues.len()
    );

    match scene.validate() {
        Ok(()) => {
            println!("\n{} Scene is valid", "SUCCESS".green().bold());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("  {} [{}] {}", "x".red(), e.code(), e);
            println!("\n{} Scene is invalid", "FAILED".red().bold());
            ExitCode::from(1)
        }
    }
}

fn run_json(scene_path: &str) -> ExitCode {
    let scene = match SceneSpec::load(scene_path) {
        Ok(scene) => scene,
        Err(e) => {
            let output = ValidateOutput::failure(vec![JsonError::from_config(&e, scene_path)], None);
            print_json(&output);
            return ExitCode::from(1);
        }
    };

    match scene.validate() {
        Ok(()) => {
            print_json(&ValidateOutput::success(&scene));
            ExitCode::SUCCESS
        }
        Err(e) => {
            let output =
                ValidateOutput::failure(vec![JsonError::from_config(&e, scene_path)], Some(&scene));
            print_json(&output);
            ExitCode::from(1)
        }
    }
}
