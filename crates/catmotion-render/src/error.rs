use thiserror::Error;

/// Errors from encoding or writing frames.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("GIF encoding error: {0}")]
    Gif(#[from] gif::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("No frames to encode")]
    NoFrames,
}

impl RenderError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RenderError::Io(_) => "RENDER_001",
            RenderError::Png(_) => "RENDER_002",
            RenderError::Gif(_) => "RENDER_003",
            RenderError::InvalidDimensions(_) => "RENDER_004",
            RenderError::NoFrames => "RENDER_005",
        }
    }
}
