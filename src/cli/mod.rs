use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{LogoConfig, Target};
use crate::generate::GenerateOptions;

#[derive(Parser, Debug)]
#[command(name = "locknload-logo")]
#[command(version)]
#[command(
    about = "Generate the Lock N Load logo and favicon for the campus-bites apps",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (defaults to ./logo.yaml, then the user config dir, then built-in)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output directory; repeat for several apps (replaces configured targets)
    #[arg(short = 'o', long = "output-dir", global = true)]
    pub output_dirs: Vec<PathBuf>,

    /// Font file to try before the configured candidates
    #[arg(short = 'f', long, global = true)]
    pub font: Option<PathBuf>,

    /// Fail when no candidate font exists instead of using the built-in font
    #[arg(long, global = true)]
    pub strict_font: bool,

    /// Create missing output directories
    #[arg(long, global = true)]
    pub create_dirs: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render the logo and favicon (default)
    Generate,

    /// List system font families
    ListFonts,

    /// Print the effective configuration as YAML
    ShowConfig,
}

impl Args {
    /// Fold command line overrides into the loaded configuration
    pub fn apply(&self, config: &mut LogoConfig) {
        if let Some(ref font) = self.font {
            config.font_paths.insert(0, font.clone());
        }

        if !self.output_dirs.is_empty() {
            config.targets = self
                .output_dirs
                .iter()
                .map(|dir| Target {
                    name: dir
                        .parent()
                        .and_then(|p| p.file_name())
                        .or_else(|| dir.file_name())
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| dir.display().to_string()),
                    dir: dir.clone(),
                })
                .collect();
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            strict_font: self.strict_font,
            create_dirs: self.create_dirs,
        }
    }
}
