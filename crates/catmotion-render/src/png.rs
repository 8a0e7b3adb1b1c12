//! Deterministic PNG writer.
//!
//! Fixed compression and filter settings, and no timestamps or other
//! variable chunks, so the same canvas always encodes to the same bytes.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use crate::canvas::Canvas;
use crate::error::RenderError;

/// PNG export configuration.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

fn check_dimensions(canvas: &Canvas) -> Result<(), RenderError> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(RenderError::InvalidDimensions(format!(
            "{}x{} canvas",
            canvas.width, canvas.height
        )));
    }
    Ok(())
}

/// Write a canvas to a PNG file.
pub fn write_rgba(canvas: &Canvas, path: &Path, config: &PngConfig) -> Result<(), RenderError> {
    check_dimensions(canvas)?;
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    write_rgba_to_writer(canvas, writer, config)
}

/// Write a canvas to any writer.
pub fn write_rgba_to_writer<W: Write>(
    canvas: &Canvas,
    writer: W,
    config: &PngConfig,
) -> Result<(), RenderError> {
    check_dimensions(canvas)?;
    let mut encoder = Encoder::new(writer, canvas.width, canvas.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&canvas.to_rgba8())?;
    Ok(())
}

/// Compute the BLAKE3 hash of encoded PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encode to memory and return the bytes with their hash.
pub fn write_rgba_to_vec_with_hash(
    canvas: &Canvas,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), RenderError> {
    let mut data = Vec::new();
    write_rgba_to_writer(canvas, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}
