//! Render command implementation
//!
//! Simulates a scene and rasterizes the frames, either as numbered PNGs in a
//! directory or as one looping GIF.

use anyhow::{bail, Context, Result};
use catmotion_core::Timeline;
use catmotion_render::{delay_for_fps, GifWriter, PngConfig, Renderer};
use colored::Colorize;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use super::scene_input::load_valid_scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Png,
    Gif,
}

impl FromStr for RenderFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(RenderFormat::Png),
            "gif" => Ok(RenderFormat::Gif),
            other => bail!("unknown render format: {} (expected png or gif)", other),
        }
    }
}

/// Options for the render command.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub scene_path: &'a str,
    pub out: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: RenderFormat,
    /// Keep every n-th frame.
    pub every: u32,
}

/// Run the render command
pub fn run(options: &RenderOptions<'_>) -> Result<ExitCode> {
    if options.width == 0 || options.height == 0 {
        bail!("image size must be positive, got {}x{}", options.width, options.height);
    }
    let every = options.every.max(1);
    let scene = load_valid_scene(options.scene_path)?;

    println!("{} {}", "Rendering:".cyan().bold(), options.scene_path);
    let start = Instant::now();
    let timeline = Timeline::record(&scene)
        .with_context(|| format!("Failed to simulate scene: {}", options.scene_path))?;

    let renderer = Renderer::new(options.width, options.height);
    let picked = timeline.frames.iter().filter(|f| f.index % every == 0);

    let written = match options.format {
        RenderFormat::Png => {
            let dir = Path::new(options.out);
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", options.out))?;
            let config = PngConfig::default();
            let mut count = 0usize;
            for frame in picked {
                let path = dir.join(format!("frame_{:05}.png", frame.index));
                let canvas = renderer.render(&frame.pose);
                catmotion_render::write_rgba(&canvas, &path, &config)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                debug!("wrote {}", path.display());
                count += 1;
            }
            count
        }
        RenderFormat::Gif => {
            let file = File::create(options.out)
                .with_context(|| format!("Failed to create output file: {}", options.out))?;
            let delay = delay_for_fps(f64::from(scene.fps) / f64::from(every));
            let mut gif = GifWriter::new(BufWriter::new(file), options.width, options.height, delay)?;
            for frame in picked {
                gif.push(&renderer.render(&frame.pose))?;
            }
            let count = gif.frames();
            gif.finish()?.flush()?;
            count
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    println!(
        "{} {}x{}, {} of {} frames",
        "Frames:".dimmed(),
        options.width,
        options.height,
        written,
        timeline.len()
    );
    println!("{} {}", "Output:".dimmed(), options.out);
    println!("{} {}", "Fingerprint:".dimmed(), timeline.fingerprint);
    println!(
        "\n{} Rendered {} frame(s) ({}ms)",
        "SUCCESS".green().bold(),
        written,
        duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_file(dir: &Path) -> String {
        let path = dir.join("scene.json");
        std::fs::write(
            &path,
            r#"{"fps": 20, "frames": 6, "cues": [{"frame": 0, "action": {"type": "target", "x": 700.0, "y": 300.0}}]}"#,
        )
        .unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("png".parse::<RenderFormat>().unwrap(), RenderFormat::Png);
        assert_eq!("GIF".parse::<RenderFormat>().unwrap(), RenderFormat::Gif);
        assert!("bmp".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_render_png_frames() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_file(dir.path());
        let out = dir.path().join("frames");
        let options = RenderOptions {
            scene_path: &scene,
            out: out.to_str().unwrap(),
            width: 100,
            height: 70,
            format: RenderFormat::Png,
            every: 2,
        };
        assert_eq!(run(&options).unwrap(), ExitCode::SUCCESS);
        assert!(out.join("frame_00000.png").exists());
        assert!(out.join("frame_00004.png").exists());
        assert!(!out.join("frame_00001.png").exists());
    }

    #[test]
    fn test_render_gif() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_file(dir.path());
        let out = dir.path().join("cat.gif");
        let options = RenderOptions {
            scene_path: &scene,
            out: out.to_str().unwrap(),
            width: 50,
            height: 35,
            format: RenderFormat::Gif,
            every: 1,
        };
        run(&options).unwrap();
        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[..6], b"GIF89a");
    }

    #[test]
    fn test_zero_size_rejected() {
        let options = RenderOptions {
            scene_path: "unused.json",
            out: "unused",
            width: 0,
            height: 10,
            format: RenderFormat::Png,
            every: 1,
        };
        assert!(run(&options).is_err());
    }
}
