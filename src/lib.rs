pub mod config;
pub mod render;

// Re-export commonly used types
pub use config::{AppConfig, ShaderConfig, WindowConfig};
pub use render::camera::Camera2d;
pub use render::context::RenderContext;
pub use render::geometry::TriangleMesh;
pub use render::shader::{ShaderError, ShaderProgram, ShaderSource, ShaderStage};
