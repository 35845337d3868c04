use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            width: 640,
            height: 480,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    pub vertex_path: PathBuf,
    pub fragment_path: PathBuf,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            vertex_path: PathBuf::from("assets/shaders/basic.vert"),
            fragment_path: PathBuf::from("assets/shaders/basic.frag"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub shaders: ShaderConfig,
}

impl AppConfig {
    /// Reads the config file if it exists; a missing file means defaults,
    /// while an unreadable or malformed file is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_the_demo_window() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert!(config.window.vsync);
        assert_eq!(
            config.shaders.vertex_path,
            PathBuf::from("assets/shaders/basic.vert")
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.window.title, "trigon");
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trigon.toml");
        fs::write(&path, "[window]\nwidth = 1280\nheight = 720\n").unwrap();

        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.window.title, "trigon");
        assert_eq!(
            config.shaders.fragment_path,
            PathBuf::from("assets/shaders/basic.frag")
        );
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[window\nwidth = ").unwrap();

        assert!(AppConfig::load_or_default(&path).is_err());
    }
}
