//! Run command implementation
//!
//! Live demo of the threaded driver: the cat wanders for a while, picking a
//! new random target every couple of seconds, and state changes are logged.

use anyhow::{bail, Result};
use catmotion_core::driver::{self, DriverCommand, DriverConfig};
use catmotion_core::{BehaviorState, BodyParams, CatBody, Point};
use colored::Colorize;
use log::info;
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Seconds between random retargets.
const RETARGET_INTERVAL: f64 = 2.0;

/// Run the run command
///
/// # Arguments
/// * `seconds` - Wall-clock duration of the demo
/// * `hz` - Driver tick rate
/// * `seed` - RNG seed for the body
pub fn run(seconds: f64, hz: f64, seed: u32) -> Result<ExitCode> {
    if !(seconds.is_finite() && seconds > 0.0) {
        bail!("--seconds must be positive, got {}", seconds);
    }
    let Ok(limit) = Duration::try_from_secs_f64(seconds) else {
        bail!("--seconds is too large, got {}", seconds);
    };

    let params = BodyParams::default();
    let body = CatBody::with_params(params.home, params, seed);
    let config = DriverConfig {
        hz,
        ..DriverConfig::default()
    };
    let handle = driver::spawn(body, config)?;

    println!(
        "{} {:.1}s at {} Hz (seed {})",
        "Running:".cyan().bold(),
        seconds,
        hz,
        seed
    );

    let started = Instant::now();
    let mut next_retarget = 0.0;
    let mut last_state: Option<BehaviorState> = None;
    let mut received = 0u64;

    while started.elapsed() < limit {
        let elapsed = started.elapsed().as_secs_f64();
        if elapsed >= next_retarget {
            handle.send(DriverCommand::RandomTarget);
            next_retarget += RETARGET_INTERVAL;
        }

        let Some(pose) = handle.recv_timeout(Duration::from_millis(100)) else {
            continue;
        };
        received += 1;
        if last_state != Some(pose.state) {
            info!(
                "{:>6.2}s {} at ({:.1}, {:.1})",
                elapsed, pose.state, pose.body.position.x, pose.body.position.y
            );
            println!(
                "  {} {:>6.2}s {:<8} at ({:.1}, {:.1})",
                "-".dimmed(),
                elapsed,
                pose.state.as_str(),
                pose.body.position.x,
                pose.body.position.y
            );
            last_state = Some(pose.state);
        }
    }

    let Some(summary) = handle.stop() else {
        bail!("driver thread panicked");
    };
    let end: Point = summary.body.position();
    println!(
        "{} {} ticks, {} received, {} dropped",
        "Frames:".dimmed(),
        summary.ticks,
        received,
        summary.dropped_frames
    );
    println!("{} ({:.1}, {:.1})", "Final position:".dimmed(), end.x, end.y);
    println!("\n{} Driver stopped cleanly", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}
