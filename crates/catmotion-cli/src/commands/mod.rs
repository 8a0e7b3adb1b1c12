//! CLI command implementations

pub mod json_output;
pub mod render;
pub mod run;
pub mod simulate;
pub mod validate;

mod scene_input;
