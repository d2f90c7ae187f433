use image::{Rgb, RgbImage};

#[derive(Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if let Some((x, y)) = self.clip(x, y) {
            self.image.put_pixel(x, y, Rgb(color));
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x < self.width() && y < self.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Blend `color` over the existing pixel with coverage 0-255
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 3], coverage: u8) {
        if coverage == 0 {
            return;
        }
        if coverage == 255 {
            self.set_pixel(x, y, color);
            return;
        }
        let Some((x, y)) = self.clip(x, y) else {
            return;
        };

        let alpha = coverage as f32 / 255.0;
        let dst = self.image.get_pixel_mut(x, y);
        for (d, s) in dst.0.iter_mut().zip(color) {
            *d = (s as f32 * alpha + *d as f32 * (1.0 - alpha)).round() as u8;
        }
    }

    fn clip(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            Some((x as u32, y as u32))
        } else {
            None
        }
    }
}
