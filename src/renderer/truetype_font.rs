use fontdue::{Font as FontdueFont, FontSettings};
use font_kit::family_name::FamilyName;
use font_kit::properties::{Properties, Weight};
use font_kit::source::SystemSource;
use std::fs;
use std::path::Path;

use super::{Canvas, TextBounds};
use crate::error::{LogoError, Result};

/// TrueType font wrapper using fontdue for rendering
pub struct TrueTypeFont {
    font: FontdueFont,
    name: String,
}

/// A rasterized glyph positioned relative to the text origin
struct PlacedGlyph {
    x: i32,
    y: i32,
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

impl TrueTypeFont {
    /// Load a TrueType font from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        eprintln!("Loading font from file: {}", path.display());
        let font_data = fs::read(path).map_err(|source| LogoError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&font_data, &path.display().to_string())
    }

    /// Load the bold face of a system font family
    pub fn from_system(family: &str) -> Result<Self> {
        eprintln!("Looking for system font: {} (bold)", family);
        let source = SystemSource::new();

        let mut properties = Properties::new();
        properties.weight(Weight::BOLD);

        let handle = source
            .select_best_match(&[FamilyName::Title(family.to_string())], &properties)
            .map_err(|e| LogoError::SystemFont {
                family: family.to_string(),
                reason: e.to_string(),
            })?;

        let font_data = handle
            .load()
            .map_err(|e| LogoError::SystemFont {
                family: family.to_string(),
                reason: format!("failed to load font data: {}", e),
            })?
            .copy_font_data()
            .ok_or_else(|| LogoError::SystemFont {
                family: family.to_string(),
                reason: "failed to copy font data".to_string(),
            })?;

        Self::from_bytes(&font_data, family)
    }

    /// List all available system font families
    pub fn list_system_fonts() -> Result<Vec<String>> {
        let source = SystemSource::new();
        let mut families = source.all_families().map_err(|e| LogoError::SystemFont {
            family: "*".to_string(),
            reason: format!("failed to enumerate fonts: {}", e),
        })?;
        families.sort();
        Ok(families)
    }

    /// Load a TrueType font from bytes
    pub fn from_bytes(font_data: &[u8], source_name: &str) -> Result<Self> {
        // ttf-parser rejects truncated or non-font data with a precise reason
        let face = ttf_parser::Face::parse(font_data, 0).map_err(|e| LogoError::FontParse {
            name: source_name.to_string(),
            reason: format!("{:?}", e),
        })?;

        let name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::FULL_NAME && n.is_unicode())
            .and_then(|n| n.to_string())
            .unwrap_or_else(|| source_name.to_string());

        let font = FontdueFont::from_bytes(font_data, FontSettings::default()).map_err(|e| {
            LogoError::FontParse {
                name: source_name.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self { font, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distance from the top of the line to the baseline, in pixels
    fn ascent(&self, size: f32) -> i32 {
        self.font
            .horizontal_line_metrics(size)
            .map(|m| m.ascent)
            .unwrap_or(size)
            .round() as i32
    }

    /// Lay out `text` with the pen at (0, 0), where y = 0 is the ascender line
    fn layout(&self, text: &str, size: f32) -> Vec<PlacedGlyph> {
        let baseline = self.ascent(size);
        let mut pen_x = 0.0f32;
        let mut prev: Option<char> = None;
        let mut glyphs = Vec::new();

        for ch in text.chars() {
            if let Some(kern) = prev.and_then(|p| self.font.horizontal_kern(p, ch, size)) {
                pen_x += kern;
            }

            let (metrics, coverage) = self.font.rasterize(ch, size);
            if metrics.width > 0 && metrics.height > 0 {
                glyphs.push(PlacedGlyph {
                    x: pen_x.round() as i32 + metrics.xmin,
                    // fontdue's ymin is the distance from baseline to the glyph bottom
                    y: baseline - metrics.ymin - metrics.height as i32,
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                });
            }

            pen_x += metrics.advance_width;
            prev = Some(ch);
        }

        glyphs
    }

    /// Ink bounding box of `text` drawn at the origin
    pub fn measure(&self, text: &str, size: f32) -> TextBounds {
        self.layout(text, size)
            .iter()
            .map(|g| TextBounds {
                left: g.x,
                top: g.y,
                right: g.x + g.width as i32,
                bottom: g.y + g.height as i32,
            })
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }

    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: [u8; 3]) {
        for glyph in self.layout(text, size) {
            for gy in 0..glyph.height {
                for gx in 0..glyph.width {
                    let coverage = glyph.coverage[gy * glyph.width + gx];
                    canvas.blend_pixel(
                        x + glyph.x + gx as i32,
                        y + glyph.y + gy as i32,
                        color,
                        coverage,
                    );
                }
            }
        }
    }
}
