//! Animated GIF writer.

use std::io::Write;
use std::path::Path;

use gif::{Encoder, Frame, Repeat};
use log::debug;

use crate::canvas::Canvas;
use crate::error::RenderError;

/// Quantizer speed passed to the encoder (1 = best quality, 30 = fastest).
const QUANTIZE_SPEED: i32 = 10;

/// Encodes canvases as the frames of one looping GIF.
pub struct GifWriter<W: Write> {
    encoder: Encoder<W>,
    width: u16,
    height: u16,
    /// Per-frame delay in hundredths of a second.
    delay: u16,
    frames: usize,
}

fn gif_dimension(value: u32, name: &str) -> Result<u16, RenderError> {
    match u16::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(RenderError::InvalidDimensions(format!(
            "GIF {} must be within 1..=65535, got {}",
            name, value
        ))),
    }
}

/// Frame delay in centiseconds for `fps`, at least 1.
pub fn delay_for_fps(fps: f64) -> u16 {
    if !(fps > 0.0) {
        return 1;
    }
    (100.0 / fps).round().clamp(1.0, u16::MAX as f64) as u16
}

impl<W: Write> GifWriter<W> {
    pub fn new(writer: W, width: u32, height: u32, delay: u16) -> Result<Self, RenderError> {
        let width = gif_dimension(width, "width")?;
        let height = gif_dimension(height, "height")?;
        let mut encoder = Encoder::new(writer, width, height, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;
        Ok(Self {
            encoder,
            width,
            height,
            delay,
            frames: 0,
        })
    }

    pub fn push(&mut self, canvas: &Canvas) -> Result<(), RenderError> {
        if canvas.width != u32::from(self.width) || canvas.height != u32::from(self.height) {
            return Err(RenderError::InvalidDimensions(format!(
                "frame is {}x{}, animation is {}x{}",
                canvas.width, canvas.height, self.width, self.height
            )));
        }
        let mut rgba = canvas.to_rgba8();
        let mut frame = Frame::from_rgba_speed(self.width, self.height, &mut rgba, QUANTIZE_SPEED);
        frame.delay = self.delay;
        self.encoder.write_frame(&frame)?;
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Finish the stream and hand back the writer.
    pub fn finish(self) -> Result<W, RenderError> {
        if self.frames == 0 {
            return Err(RenderError::NoFrames);
        }
        debug!("gif finished with {} frames", self.frames);
        Ok(self.encoder.into_inner()?)
    }
}

/// Write all `frames` to a GIF file.
pub fn write_gif(frames: &[Canvas], path: &Path, delay: u16) -> Result<(), RenderError> {
    let first = frames.first().ok_or(RenderError::NoFrames)?;
    let file = std::fs::File::create(path)?;
    let mut writer = GifWriter::new(std::io::BufWriter::new(file), first.width, first.height, delay)?;
    for canvas in frames {
        writer.push(canvas)?;
    }
    writer.finish()?.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use catmotion_core::geometry::Point;

    fn frame(x: f64) -> Canvas {
        let mut canvas = Canvas::new(32, 24, Color::from_hex(0x34495E));
        canvas.fill_ellipse(Point::new(x, 12.0), 6.0, 6.0, 0.0, Color::from_hex(0xFFD700));
        canvas
    }

    fn encode(frames: &[Canvas]) -> Vec<u8> {
        let mut writer = GifWriter::new(Vec::new(), 32, 24, 2).unwrap();
        for f in frames {
            writer.push(f).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_gif_header_and_determinism() {
        let frames = [frame(8.0), frame(16.0), frame(24.0)];
        let a = encode(&frames);
        let b = encode(&frames);
        assert_eq!(&a[..6], b"GIF89a");
        assert_eq!(a, b);
    }

    #[test]
    fn test_gif_frame_count_decodes() {
        let bytes = encode(&[frame(8.0), frame(20.0)]);
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::RGBA);
        let mut decoder = options.read_info(std::io::Cursor::new(bytes)).unwrap();
        let mut count = 0;
        while let Some(f) = decoder.read_next_frame().unwrap() {
            assert_eq!(f.delay, 2);
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_mismatched_frame_rejected() {
        let mut writer = GifWriter::new(Vec::new(), 32, 24, 2).unwrap();
        let wrong = Canvas::new(16, 16, Color::black());
        assert_eq!(writer.push(&wrong).unwrap_err().code(), "RENDER_004");
    }

    #[test]
    fn test_no_frames() {
        let writer = GifWriter::new(Vec::new(), 32, 24, 2).unwrap();
        assert!(matches!(writer.finish(), Err(RenderError::NoFrames)));
        assert!(matches!(
            write_gif(&[], Path::new("unused.gif"), 2),
            Err(RenderError::NoFrames)
        ));
    }

    #[test]
    fn test_delay_for_fps() {
        assert_eq!(delay_for_fps(50.0), 2);
        assert_eq!(delay_for_fps(60.0), 2);
        assert_eq!(delay_for_fps(10.0), 10);
        assert_eq!(delay_for_fps(0.0), 1);
    }

    #[test]
    fn test_oversized_rejected() {
        assert!(GifWriter::new(Vec::new(), 70_000, 10, 2).is_err());
    }
}
