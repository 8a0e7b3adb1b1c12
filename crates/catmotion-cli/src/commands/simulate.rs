//! Simulate command implementation
//!
//! Records a scene into a snapshot timeline, optionally writes it as JSON
//! lines, and reports the BLAKE3 fingerprint.

use anyhow::{Context, Result};
use catmotion_core::{ConfigError, Timeline};
use colored::Colorize;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{error_codes, print_json, JsonError, SimulateOutput, SimulateResult};
use super::scene_input::load_valid_scene;

/// Run the simulate command
///
/// # Arguments
/// * `scene_path` - Path to the scene JSON
/// * `frames` - Override for the scene's frame count
/// * `output` - Where to write the JSON-lines stream (`-` for stdout)
/// * `json_output` - Print a machine-readable summary instead of colored text
pub fn run(
    scene_path: &str,
    frames: Option<u32>,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let scene = match load_valid_scene(scene_path) {
        Ok(scene) => scene,
        Err(e) if json_output => {
            let code = e
                .downcast_ref::<ConfigError>()
                .map(ConfigError::code)
                .unwrap_or(error_codes::SCENE_LOAD);
            print_json(&SimulateOutput {
                success: false,
                errors: vec![JsonError::new(code, format!("{:#}", e)).with_file(scene_path)],
                result: None,
            });
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };

    let start = Instant::now();
    let timeline = Timeline::record_frames(&scene, frames.unwrap_or(scene.frames))
        .with_context(|| format!("Failed to simulate scene: {}", scene_path))?;
    let duration_ms = start.elapsed().as_millis() as u64;

    match output {
        Some("-") => timeline.write_json_lines(std::io::stdout().lock())?,
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
            timeline.write_json_lines(BufWriter::new(file))?;
        }
        None => {}
    }

    if json_output {
        print_json(&SimulateOutput {
            success: true,
            errors: Vec::new(),
            result: Some(SimulateResult::of(&timeline, output)),
        });
        return Ok(ExitCode::SUCCESS);
    }

    // Keep stdout clean when it carries the stream.
    if output == Some("-") {
        eprintln!("{} {}", "Fingerprint:".dimmed(), timeline.fingerprint);
        return Ok(ExitCode::SUCCESS);
    }

    let summary = SimulateResult::of(&timeline, output);
    println!("{} {}", "Simulating:".cyan().bold(), scene_path);
    println!(
        "{} {} frames, {} walking, {} state change(s)",
        "Frames:".dimmed(),
        summary.frames,
        summary.walking_frames,
        summary.transitions
    );
    println!(
        "{} ({:.2}, {:.2})",
        "Final position:".dimmed(),
        summary.final_position[0],
        summary.final_position[1]
    );
    if let Some(path) = output {
        println!("{} {}", "Output:".dimmed(), path);
    }
    println!("{} {}", "Fingerprint:".dimmed(), timeline.fingerprint);
    println!(
        "\n{} Simulated {} frames ({}ms)",
        "SUCCESS".green().bold(),
        summary.frames,
        duration_ms
    );
    Ok(ExitCode::SUCCESS)
}
