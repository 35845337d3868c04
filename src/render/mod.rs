pub mod camera;
pub mod context;
pub mod geometry;
pub mod shader;

pub use camera::Camera2d;
pub use context::RenderContext;
pub use geometry::TriangleMesh;
pub use shader::{compile_stage, ShaderError, ShaderProgram, ShaderSource, ShaderStage};
