use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::LogoConfig;
use crate::encoder;
use crate::renderer::{Font, FontChoice, LogoRenderer, Placement};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Fail instead of falling back to the built-in bitmap font
    pub strict_font: bool,
    /// Create missing target directories instead of failing
    pub create_dirs: bool,
}

/// What a generation run produced
#[derive(Debug)]
pub struct Report {
    pub font: FontChoice,
    pub layout: Vec<Placement>,
    pub logos: Vec<PathBuf>,
    pub favicons: Vec<PathBuf>,
}

pub fn generate(config: &LogoConfig, options: &GenerateOptions) -> Result<Report> {
    config.validate()?;

    let (font, choice) = Font::select(
        &config.font_paths,
        config.font_family.as_deref(),
        options.strict_font,
    )?;
    eprintln!("Using font: {} ({})", font.name(), choice);

    let renderer = LogoRenderer::new(config, &font);
    let layout = renderer.layout();
    let logo = renderer.render().into_image();

    if options.create_dirs {
        for target in &config.targets {
            encoder::ensure_dir(&target.dir)?;
        }
    }

    let mut logos = Vec::with_capacity(config.targets.len());
    for target in &config.targets {
        let path = target.logo_path(config);
        encoder::save(&logo, &path)
            .with_context(|| format!("Failed to save logo for {}", target.name))?;
        logos.push(path);
    }

    let mut favicons = Vec::with_capacity(config.targets.len());
    for target in &config.targets {
        let path = target.favicon_path(config);
        encoder::save_favicon(&logo, config.favicon_size, &path)
            .with_context(|| format!("Failed to save favicon for {}", target.name))?;
        favicons.push(path);
    }

    Ok(Report {
        font: choice,
        layout,
        logos,
        favicons,
    })
}
