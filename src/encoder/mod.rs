use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageFormat, ImageResult, RgbImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::error::{LogoError, Result};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Ico,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "png" => Some(OutputFormat::Png),
                "ico" => Some(OutputFormat::Ico),
                _ => None,
            })
    }

}

/// Standard favicon sizes browsers and shells pick from
const ICON_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

/// Downscale the full logo to a square favicon
pub fn favicon(image: &RgbImage, size: u32) -> RgbImage {
    imageops::resize(image, size, size, FilterType::Lanczos3)
}

/// Icon sizes stored in a favicon whose largest entry is `max_size`
pub fn favicon_sizes(max_size: u32) -> Vec<u32> {
    let mut sizes: Vec<u32> = ICON_SIZES.iter().copied().filter(|&s| s < max_size).collect();
    sizes.push(max_size);
    sizes
}

/// Write a multi-resolution favicon, each entry resampled from `logo`
pub fn save_favicon(logo: &RgbImage, max_size: u32, path: &Path) -> Result<()> {
    let icons: Vec<RgbImage> = favicon_sizes(max_size)
        .into_iter()
        .map(|size| favicon(logo, size))
        .collect();
    write_ico(&icons, path)
}

/// Write `image` to `path`, picking the encoder from the extension
pub fn save(image: &RgbImage, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)
        .ok_or_else(|| LogoError::UnsupportedFormat(path.to_path_buf()))?;

    match format {
        OutputFormat::Png => image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| encode_error(path, source)),
        OutputFormat::Ico => write_ico(std::slice::from_ref(image), path),
    }
}

fn write_ico(icons: &[RgbImage], path: &Path) -> Result<()> {
    encode_ico(icons, path).map_err(|source| encode_error(path, source))
}

fn encode_ico(icons: &[RgbImage], path: &Path) -> ImageResult<()> {
    // ICO entries are stored as RGBA PNGs
    let frames = icons
        .iter()
        .map(|icon| {
            let rgba = DynamicImage::ImageRgb8(icon.clone()).to_rgba8();
            IcoFrame::as_png(rgba.as_raw(), rgba.width(), rgba.height(), ExtendedColorType::Rgba8)
        })
        .collect::<ImageResult<Vec<_>>>()?;

    let file = File::create(path)?;
    IcoEncoder::new(BufWriter::new(file)).encode_images(&frames)
}

fn encode_error(path: &Path, source: image::ImageError) -> LogoError {
    LogoError::Encode {
        path: path.to_path_buf(),
        source,
    }
}

/// Create `dir` (and parents) when missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| LogoError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
