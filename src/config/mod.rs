pub mod core;

pub use core::{AppConfig, ShaderConfig, WindowConfig};
