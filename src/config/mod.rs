use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LogoError;

const DEFAULT_CONFIG: &str = include_str!("../../config/default.yaml");
const CONFIG_FILE_NAME: &str = "logo.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_side")]
    pub width: u32,

    #[serde(default = "default_side")]
    pub height: u32,

    #[serde(default = "default_background")]
    pub background: [u8; 3],

    #[serde(default)]
    pub text_color: [u8; 3],

    #[serde(default = "default_labels")]
    pub labels: Vec<Label>,

    /// Font files probed in order; the first one that exists wins
    #[serde(default = "default_font_paths")]
    pub font_paths: Vec<PathBuf>,

    /// System family tried when no font path exists
    #[serde(default)]
    pub font_family: Option<String>,

    #[serde(default = "default_logo_file")]
    pub logo_file: String,

    #[serde(default = "default_favicon_file")]
    pub favicon_file: String,

    #[serde(default = "default_favicon_size")]
    pub favicon_size: u32,

    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,

    /// Font size in pixels
    pub size: f32,

    /// Top of the ascender line
    pub y: i32,
}

/// Public asset directory of one consuming application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub dir: PathBuf,
}

impl Target {
    pub fn logo_path(&self, config: &LogoConfig) -> PathBuf {
        self.dir.join(&config.logo_file)
    }

    pub fn favicon_path(&self, config: &LogoConfig) -> PathBuf {
        self.dir.join(&config.favicon_file)
    }
}

fn default_name() -> String {
    "locknload".to_string()
}

fn default_side() -> u32 {
    500
}

fn default_background() -> [u8; 3] {
    [233, 78, 36]
}

fn default_labels() -> Vec<Label> {
    vec![
        Label {
            text: "LOCK".to_string(),
            size: 80.0,
            y: 100,
        },
        Label {
            text: "N".to_string(),
            size: 50.0,
            y: 200,
        },
        Label {
            text: "LOAD".to_string(),
            size: 80.0,
            y: 270,
        },
    ]
}

fn default_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/google-noto/NotoSans-Bold.ttf",
        "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

fn default_logo_file() -> String {
    "logo.png".to_string()
}

fn default_favicon_file() -> String {
    "favicon.ico".to_string()
}

fn default_favicon_size() -> u32 {
    64
}

fn default_targets() -> Vec<Target> {
    vec![
        Target {
            name: "customer-app".to_string(),
            dir: PathBuf::from("campus-bites/customer-app/public"),
        },
        Target {
            name: "admin-app".to_string(),
            dir: PathBuf::from("campus-bites/admin-app/public"),
        },
    ]
}

impl LogoConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: LogoConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config YAML: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Configuration compiled into the binary
    pub fn builtin() -> Result<Self> {
        let config: LogoConfig = serde_yaml::from_str(DEFAULT_CONFIG)
            .context("Failed to parse embedded default config")?;
        Ok(config)
    }

    /// Resolve the effective configuration: explicit path, then search
    /// paths, then the embedded default
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        for path in Self::search_paths() {
            if path.is_file() {
                return Ok((Self::load(&path)?, Some(path)));
            }
        }

        Ok((Self::builtin()?, None))
    }

    /// Config file locations in order of priority
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "locknload-logo") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        paths
    }

    pub fn validate(&self) -> std::result::Result<(), LogoError> {
        if self.width == 0 || self.height == 0 {
            return Err(LogoError::Config(format!(
                "canvas must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.favicon_size == 0 || self.favicon_size > 256 {
            // ICO directory entries cannot describe anything larger
            return Err(LogoError::Config(format!(
                "favicon_size must be within 1..=256, got {}",
                self.favicon_size
            )));
        }
        if let Some(label) = self.labels.iter().find(|l| !(l.size > 0.0)) {
            return Err(LogoError::Config(format!(
                "label '{}' has non-positive size {}",
                label.text, label.size
            )));
        }
        // glyphs taller than the canvas cannot land on it anyway
        if let Some(label) = self.labels.iter().find(|l| l.size > self.height as f32) {
            return Err(LogoError::Config(format!(
                "label '{}' size {} exceeds canvas height {}",
                label.text, label.size, self.height
            )));
        }
        Ok(())
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        LogoConfig {
            name: default_name(),
            width: default_side(),
            height: default_side(),
            background: default_background(),
            text_color: [0, 0, 0],
            labels: default_labels(),
            font_paths: default_font_paths(),
            font_family: None,
            logo_file: default_logo_file(),
            favicon_file: default_favicon_file(),
            favicon_size: default_favicon_size(),
            targets: default_targets(),
        }
    }
}
