//! WebGPU rendering module
//!
//! The scene is rebuilt on the CPU every frame as colored triangles and drawn
//! in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, screen_to_ndc};
pub use scene::{SceneOptions, build_scene};
pub use vertex::Vertex;
