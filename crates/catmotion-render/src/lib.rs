//! catmotion renderer
//!
//! Turns [`catmotion_core::PoseSnapshot`]s into pictures. The core never
//! knows about this crate; it only hands over snapshots.
//!
//! - **Draw lists**: every frame becomes an ordered map from part name
//!   (`body`, `limb_front_left`, `left_eye`, ...) to a colored shape
//! - **Canvas**: a small deterministic rasterizer for ellipses, polygons
//!   and thick polylines
//! - **Output**: byte-stable PNG frames and looping animated GIFs
//!
//! ```
//! use catmotion_core::CatBody;
//! use catmotion_render::Renderer;
//!
//! let pose = CatBody::new(400.0, 250.0).export_pose();
//! let canvas = Renderer::new(200, 140).render(&pose);
//! assert_eq!(canvas.data.len(), 200 * 140);
//! ```

pub mod canvas;
pub mod color;
pub mod draw;
pub mod error;
pub mod gif;
pub mod png;
pub mod renderer;

pub use canvas::{Canvas, Viewport};
pub use color::{Color, Palette};
pub use draw::{DrawDiff, DrawList, Part, Shape, Stroke};
pub use error::RenderError;
pub use gif::{delay_for_fps, write_gif, GifWriter};
pub use png::{write_rgba, write_rgba_to_vec_with_hash, PngConfig};
pub use renderer::{Renderer, DEFAULT_WORLD};
