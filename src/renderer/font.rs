use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::truetype_font::TrueTypeFont;
use super::Canvas;
use crate::error::{LogoError, Result};

const DEFAULT_FONT: &str = include_str!("../../assets/fonts/default.fd");

/// Ink bounding box of a piece of text, relative to its draw origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn union(&self, other: &TextBounds) -> TextBounds {
        TextBounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Where the font in use came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    Candidate(PathBuf),
    System(String),
    BuiltIn,
}

impl fmt::Display for FontChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontChoice::Candidate(path) => write!(f, "{}", path.display()),
            FontChoice::System(family) => write!(f, "system font '{}'", family),
            FontChoice::BuiltIn => write!(f, "built-in bitmap font"),
        }
    }
}

pub enum Font {
    TrueType(TrueTypeFont),
    /// Embedded bitmap face, scaled to the requested size
    Bitmap(BitmapFont),
}

/// First candidate that exists on disk, in declared order
pub fn first_existing(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .map(PathBuf::as_path)
        .find(|path| path.exists())
}

impl Font {
    /// Pick the font for the logo.
    ///
    /// Candidate paths are probed in order and the first existing file is
    /// loaded; a file that exists but fails to parse is an error. With no
    /// candidate present the optional system family is tried, then the
    /// built-in bitmap font (unless `strict`).
    pub fn select(
        candidates: &[PathBuf],
        family: Option<&str>,
        strict: bool,
    ) -> Result<(Font, FontChoice)> {
        if let Some(path) = first_existing(candidates) {
            let font = TrueTypeFont::from_file(path)?;
            return Ok((Font::TrueType(font), FontChoice::Candidate(path.to_path_buf())));
        }

        if let Some(family) = family {
            match TrueTypeFont::from_system(family) {
                Ok(font) => {
                    return Ok((Font::TrueType(font), FontChoice::System(family.to_string())));
                }
                Err(e) => eprintln!("Warning: {}", e),
            }
        }

        if strict {
            return Err(LogoError::NoFont { checked: candidates.len() });
        }

        eprintln!(
            "Warning: none of the {} candidate fonts exist, using built-in bitmap font",
            candidates.len()
        );
        Ok((Font::builtin()?, FontChoice::BuiltIn))
    }

    pub fn builtin() -> Result<Font> {
        Ok(Font::Bitmap(BitmapFont::parse(DEFAULT_FONT)?))
    }

    pub fn name(&self) -> &str {
        match self {
            Font::TrueType(font) => font.name(),
            Font::Bitmap(_) => "built-in bitmap",
        }
    }

    pub fn measure(&self, text: &str, size: f32) -> TextBounds {
        match self {
            Font::TrueType(font) => font.measure(text, size),
            Font::Bitmap(font) => font.measure(text, size),
        }
    }

    /// Draw `text` with its ascender line at `y` and pen origin at `x`
    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: [u8; 3]) {
        match self {
            Font::TrueType(font) => font.draw(canvas, x, y, text, size, color),
            Font::Bitmap(font) => font.draw(canvas, x, y, text, size, color),
        }
    }
}

pub struct BitmapFont {
    width: usize,
    height: usize,
    glyphs: HashMap<char, Vec<bool>>,
}

impl BitmapFont {
    /// Parse the .fd text format: `width`/`height` header lines followed by
    /// `char <code>` blocks of `x`/`.` rows
    pub fn parse(data: &str) -> Result<Self> {
        let invalid = |reason: String| LogoError::FontParse {
            name: "built-in bitmap".to_string(),
            reason,
        };

        let mut width = 0;
        let mut height = 0;
        let mut glyphs = HashMap::new();
        let mut current: Option<char> = None;
        let mut rows: Vec<&str> = Vec::new();

        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("width") => {
                    width = parts
                        .next()
                        .and_then(|s| s.parse().ok())
                        .ok_or_else(|| invalid("invalid width".to_string()))?;
                }
                Some("height") => {
                    height = parts
                        .next()
                        .and_then(|s| s.parse().ok())
                        .ok_or_else(|| invalid("invalid height".to_string()))?;
                }
                Some("char") => {
                    Self::finish_glyph(&mut glyphs, current, &mut rows, width, height)?;
                    current = parts
                        .next()
                        .and_then(|s| s.parse::<u32>().ok())
                        .and_then(char::from_u32);
                    if current.is_none() {
                        return Err(invalid(format!("invalid char line: {}", line)));
                    }
                }
                _ => rows.push(line),
            }
        }
        Self::finish_glyph(&mut glyphs, current, &mut rows, width, height)?;

        if width == 0 || height == 0 {
            return Err(invalid(format!("invalid cell size {}x{}", width, height)));
        }

        Ok(Self { width, height, glyphs })
    }

    fn finish_glyph(
        glyphs: &mut HashMap<char, Vec<bool>>,
        current: Option<char>,
        rows: &mut Vec<&str>,
        width: usize,
        height: usize,
    ) -> Result<()> {
        if let Some(ch) = current {
            if rows.len() != height {
                return Err(LogoError::FontParse {
                    name: "built-in bitmap".to_string(),
                    reason: format!("glyph {:?} has {} rows, expected {}", ch, rows.len(), height),
                });
            }
            glyphs.insert(ch, Self::parse_bitmap(rows, width));
        }
        rows.clear();
        Ok(())
    }

    fn parse_bitmap(rows: &[&str], width: usize) -> Vec<bool> {
        let mut bitmap = Vec::with_capacity(width * rows.len());
        for row in rows {
            let mut cells: Vec<bool> = row.chars().take(width).map(|c| c == 'x').collect();
            cells.resize(width, false);
            bitmap.extend(cells);
        }
        bitmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Glyph for `ch`; lowercase falls back to uppercase, anything else
    /// missing renders as a hollow box
    pub fn glyph(&self, ch: char) -> Vec<bool> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&ch.to_ascii_uppercase()))
            .cloned()
            .unwrap_or_else(|| self.fallback_glyph(ch))
    }

    fn fallback_glyph(&self, ch: char) -> Vec<bool> {
        let (width, height) = (self.width, self.height);
        let mut bitmap = vec![false; width * height];
        if ch.is_whitespace() || width < 3 || height < 3 {
            return bitmap;
        }
        for y in 0..height - 1 {
            bitmap[y * width] = true;
            bitmap[y * width + width - 2] = true;
        }
        for x in 0..width - 1 {
            bitmap[x] = true;
            bitmap[(height - 2) * width + x] = true;
        }
        bitmap
    }

    fn scale(&self, size: f32) -> f32 {
        size / self.height as f32
    }

    /// Inked pixel rectangles of `text` at the origin, in canvas pixels
    fn pixel_rects(&self, text: &str, size: f32) -> Vec<TextBounds> {
        let scale = self.scale(size);
        let mut rects = Vec::new();

        for (index, ch) in text.chars().enumerate() {
            let glyph = self.glyph(ch);
            let cell_x = (index * self.width) as f32;
            for gy in 0..self.height {
                for gx in 0..self.width {
                    if glyph[gy * self.width + gx] {
                        rects.push(TextBounds {
                            left: ((cell_x + gx as f32) * scale).floor() as i32,
                            top: (gy as f32 * scale).floor() as i32,
                            right: ((cell_x + gx as f32 + 1.0) * scale).floor() as i32,
                            bottom: ((gy as f32 + 1.0) * scale).floor() as i32,
                        });
                    }
                }
            }
        }

        rects
    }

    pub fn measure(&self, text: &str, size: f32) -> TextBounds {
        self.pixel_rects(text, size)
            .into_iter()
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }

    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: [u8; 3]) {
        // rects are relative to (x, y); only walk the part that lands on the canvas
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);
        for rect in self.pixel_rects(text, size) {
            let (left, right) = (rect.left.max(-x), rect.right.min(width - x));
            let (top, bottom) = (rect.top.max(-y), rect.bottom.min(height - y));
            for py in top..bottom {
                for px in left..right {
                    canvas.set_pixel(x + px, y + py, color);
                }
            }
        }
    }
}
