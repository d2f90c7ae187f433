use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Failed to read font file '{}': {source}", .path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse font '{name}': {reason}")]
    FontParse { name: String, reason: String },

    #[error("Failed to find system font '{family}': {reason}")]
    SystemFont { family: String, reason: String },

    #[error("No usable font found (checked {checked} candidate paths) and --strict-font is set")]
    NoFont { checked: usize },

    #[error("Unsupported output format for '{}' (expected .png or .ico)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to write image '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LogoError>;
