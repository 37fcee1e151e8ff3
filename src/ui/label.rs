//! Text label widget

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::RgbColor,
    prelude::DrawTarget,
    primitives::Rectangle,
    Drawable,
};
use embedded_text::{
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::{HeightMode, TextBoxStyleBuilder, VerticalOverdraw},
    TextBox,
};

use super::{ColorMode, Error};

/// A single line of white text inside fixed bounds
///
/// The text lives in an internal buffer of `N` bytes and is vertically
/// centered within the bounds. Anything outside the bounds is clipped.
pub struct Label<const N: usize> {
    str_buf: [u8; N],
    len: usize,
    bounds: Rectangle,
    alignment: HorizontalAlignment,
    font: &'static MonoFont<'static>,
    visible: bool,
}

impl<const N: usize> Label<N> {
    /// Create new, empty label
    pub fn new(
        bounds: Rectangle,
        alignment: HorizontalAlignment,
        font: &'static MonoFont<'static>,
    ) -> Self {
        Self {
            str_buf: [0; N],
            len: 0,
            bounds,
            alignment,
            font,
            visible: true,
        }
    }

    /// Replace the text with the string returned by `write`.
    ///
    /// `write` gets a scratch buffer of the label's capacity to format into,
    /// but may return any string that fits. On error the previous text is
    /// kept.
    pub fn set_text<F>(&mut self, write: F) -> Result<(), Error>
    where
        F: FnOnce(&mut [u8]) -> Result<&str, Error>,
    {
        let mut scratch = [0; N];
        let text = write(&mut scratch)?;
        if text.len() > N {
            return Err(Error::BufferOverflow);
        }

        self.str_buf[..text.len()].copy_from_slice(text.as_bytes());
        self.len = text.len();
        Ok(())
    }

    /// Current text
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or_default()
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    pub fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl<const N: usize> Drawable for Label<N> {
    type Color = ColorMode;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        if !self.visible {
            return Ok(());
        }

        // Styling
        let character_style = MonoTextStyle::new(self.font, ColorMode::WHITE);
        let textbox_style = TextBoxStyleBuilder::new()
            .height_mode(HeightMode::Exact(VerticalOverdraw::Hidden))
            .alignment(self.alignment)
            .vertical_alignment(VerticalAlignment::Middle)
            .build();

        TextBox::with_textbox_style(self.text(), self.bounds, character_style, textbox_style)
            .draw(target)?;

        Ok(())
    }
}
