//! Default watchface
//!
//! Large centered time with the date below it and, depending on the layout,
//! the battery charge at the top of the screen.

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::MonoFont,
    pixelcolor::RgbColor,
    prelude::DrawTarget,
    primitives::Rectangle,
    Drawable,
};
use embedded_text::alignment::HorizontalAlignment;
use profont::{PROFONT_10_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use super::{
    format::{
        format_battery, format_date, format_time, BATTERY_BUF_LEN, DATE_BUF_LEN, TIME_BUF_LEN,
    },
    ClockStyle, ColorMode, DisplayMode, Error, FaceLayout, Label, ScreenShape, WatchFace,
    WatchFaceState, SCREEN_SIZE,
};
use crate::system::config::WatchfaceConfig;

/// Font of the time label, larger while charging
fn time_font(mode: DisplayMode) -> &'static MonoFont<'static> {
    match mode {
        DisplayMode::Normal => &PROFONT_18_POINT,
        DisplayMode::Charging => &PROFONT_24_POINT,
    }
}

const TIME_HEIGHT: u32 = 50;
const DATE_TOP: i32 = 107;
const DATE_HEIGHT: u32 = 56;
const BATTERY_HEIGHT: u32 = 20;
/// Gap between the battery label and the right screen edge
const BATTERY_MARGIN: u32 = 6;

/// Basic default watchface
pub struct DefaultWatchface {
    clock_style: ClockStyle,
    layout: FaceLayout,
    /// Time label
    time_label: Label<TIME_BUF_LEN>,
    /// Date label
    date_label: Label<DATE_BUF_LEN>,
    /// Power indicator label, only with [`FaceLayout::WithBattery`]
    power_label: Option<Label<BATTERY_BUF_LEN>>,
    mode: DisplayMode,
}

impl DefaultWatchface {
    pub fn time_label(&self) -> &Label<TIME_BUF_LEN> {
        &self.time_label
    }

    pub fn date_label(&self) -> &Label<DATE_BUF_LEN> {
        &self.date_label
    }

    pub fn power_label(&self) -> Option<&Label<BATTERY_BUF_LEN>> {
        self.power_label.as_ref()
    }

    /// Display mode of the last update
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }
}

impl WatchFace for DefaultWatchface {
    fn new(config: &WatchfaceConfig) -> Self {
        let width = SCREEN_SIZE;
        let time_top = match config.shape {
            ScreenShape::Rect => 52,
            ScreenShape::Round => 58,
        };

        let power_label = config.layout.shows_battery().then(|| match config.shape {
            ScreenShape::Rect => Label::new(
                Rectangle::new(
                    Point::new(0, 4),
                    Size::new(width - BATTERY_MARGIN, BATTERY_HEIGHT),
                ),
                HorizontalAlignment::Right,
                &PROFONT_10_POINT,
            ),
            ScreenShape::Round => Label::new(
                Rectangle::new(Point::new(0, 16), Size::new(width, BATTERY_HEIGHT)),
                HorizontalAlignment::Center,
                &PROFONT_10_POINT,
            ),
        });

        Self {
            clock_style: config.clock_style,
            layout: config.layout,
            time_label: Label::new(
                Rectangle::new(Point::new(0, time_top), Size::new(width, TIME_HEIGHT)),
                HorizontalAlignment::Center,
                time_font(DisplayMode::Normal),
            ),
            date_label: Label::new(
                Rectangle::new(Point::new(0, DATE_TOP), Size::new(width, DATE_HEIGHT)),
                HorizontalAlignment::Center,
                &PROFONT_14_POINT,
            ),
            power_label,
            mode: DisplayMode::Normal,
        }
    }

    fn update(&mut self, state: &WatchFaceState) -> Result<DisplayMode, Error> {
        let style = self.clock_style;
        let time = state.time.time();
        let date = state.time.date();

        self.time_label.set_text(|buf| format_time(buf, time, style))?;
        self.date_label.set_text(|buf| format_date(buf, date))?;
        if let Some(label) = self.power_label.as_mut() {
            match state.battery {
                Some(info) => label.set_text(|buf| format_battery(buf, info))?,
                None => label.set_text(|_| Ok(""))?,
            }
        }

        let mode = DisplayMode::select(self.layout, state.battery);
        self.time_label.set_font(time_font(mode));
        self.date_label.set_visible(mode.date_visible());

        if mode != self.mode {
            debug!("Switching display mode, charging: {}", mode.backlight_on());
        }
        self.mode = mode;

        Ok(mode)
    }
}

impl Drawable for DefaultWatchface {
    type Color = ColorMode;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        target.clear(ColorMode::BLACK)?;

        self.time_label.draw(target)?;
        self.date_label.draw(target)?;
        if let Some(label) = &self.power_label {
            label.draw(target)?;
        }

        Ok(())
    }
}
