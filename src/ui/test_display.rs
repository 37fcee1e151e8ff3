//! In-memory draw target for rendering tests

use core::convert::Infallible;

use embedded_graphics::{
    geometry::{Dimensions, OriginDimensions, Point, Size},
    pixelcolor::RgbColor,
    prelude::DrawTarget,
    primitives::Rectangle,
    Pixel,
};

use super::{ColorMode, SCREEN_SIZE};

pub struct TestDisplay {
    pixels: Vec<ColorMode>,
}

impl TestDisplay {
    /// Blank screen, filled with blue so clearing can be observed
    pub fn new() -> Self {
        Self {
            pixels: vec![ColorMode::BLUE; (SCREEN_SIZE * SCREEN_SIZE) as usize],
        }
    }

    pub fn pixel(&self, point: Point) -> ColorMode {
        self.pixels[point.y as usize * SCREEN_SIZE as usize + point.x as usize]
    }

    /// Bounding box of all white pixels
    pub fn lit_area(&self) -> Option<Rectangle> {
        self.lit_area_within(self.bounding_box())
    }

    /// Bounding box of the white pixels inside `area`
    pub fn lit_area_within(&self, area: Rectangle) -> Option<Rectangle> {
        let mut min = Point::new(i32::MAX, i32::MAX);
        let mut max = Point::new(i32::MIN, i32::MIN);
        let mut found = false;

        for y in area.top_left.y..area.top_left.y + area.size.height as i32 {
            for x in area.top_left.x..area.top_left.x + area.size.width as i32 {
                if self.pixel(Point::new(x, y)) == ColorMode::WHITE {
                    min = Point::new(min.x.min(x), min.y.min(y));
                    max = Point::new(max.x.max(x), max.y.max(y));
                    found = true;
                }
            }
        }

        found.then(|| Rectangle::with_corners(min, max))
    }

    pub fn count(&self, color: ColorMode) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(SCREEN_SIZE, SCREEN_SIZE)
    }
}

impl DrawTarget for TestDisplay {
    type Color = ColorMode;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let size = SCREEN_SIZE as i32;
        for Pixel(point, color) in pixels {
            if (0..size).contains(&point.x) && (0..size).contains(&point.y) {
                self.pixels[(point.y * size + point.x) as usize] = color;
            }
        }
        Ok(())
    }
}
