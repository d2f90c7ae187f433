mod canvas;
mod font;
mod truetype_font;

pub use canvas::Canvas;
pub use font::{first_existing, BitmapFont, Font, FontChoice, TextBounds};
pub use truetype_font::TrueTypeFont;

use crate::config::{Label, LogoConfig};

/// Where one label lands on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub text: String,
    pub size: f32,
    pub x: i32,
    pub y: i32,
    pub bounds: TextBounds,
}

/// Left pen position that centers text of width `text_width`
pub fn center_x(canvas_width: u32, text_width: i32) -> i32 {
    (canvas_width as i32 - text_width) / 2
}

pub struct LogoRenderer<'a> {
    config: &'a LogoConfig,
    font: &'a Font,
}

impl<'a> LogoRenderer<'a> {
    pub fn new(config: &'a LogoConfig, font: &'a Font) -> Self {
        Self { config, font }
    }

    fn place(&self, label: &Label) -> Placement {
        let bounds = self.font.measure(&label.text, label.size);
        Placement {
            text: label.text.clone(),
            size: label.size,
            x: center_x(self.config.width, bounds.width()),
            y: label.y,
            bounds,
        }
    }

    pub fn layout(&self) -> Vec<Placement> {
        self.config.labels.iter().map(|label| self.place(label)).collect()
    }

    pub fn render(&self) -> Canvas {
        let mut canvas = Canvas::new(self.config.width, self.config.height, self.config.background);

        for placement in self.layout() {
            self.font.draw(
                &mut canvas,
                placement.x,
                placement.y,
                &placement.text,
                placement.size,
                self.config.text_color,
            );
        }

        canvas
    }
}
