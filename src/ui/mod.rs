//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::Rgb565, Drawable};

use crate::{peripherals::battery::BatteryInfo, system::config::WatchfaceConfig};

mod default_watchface;
pub mod format;
mod label;
#[cfg(test)]
mod test_display;

pub use default_watchface::DefaultWatchface;
pub use label::Label;

/// Color mode of the LCD
pub type ColorMode = Rgb565;

/// Width and height of the (square) LCD in pixels
pub const SCREEN_SIZE: u32 = 240;

pub trait WatchFace: Drawable<Color = ColorMode, Output = ()> {
    /// Create new watchface
    fn new(config: &WatchfaceConfig) -> Self;

    /// Update watchface with state. Returns the display mode the face is now
    /// in, the caller is responsible for the backlight.
    fn update(&mut self, state: &WatchFaceState) -> Result<DisplayMode, Error>;
}

/// State for the watch face
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatchFaceState {
    /// Local wall clock time
    pub time: NaiveDateTime,
    /// Last known battery status, if any was measured yet
    pub battery: Option<BatteryInfo>,
}

/// Hour format preference
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    H12,
    H24,
}

impl ClockStyle {
    pub fn from_24h(is_24h: bool) -> Self {
        if is_24h {
            Self::H24
        } else {
            Self::H12
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenShape {
    Rect,
    Round,
}

/// Which labels the face shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceLayout {
    /// Time and date only
    TimeAndDate,
    /// Time, date and battery charge
    WithBattery,
}

impl FaceLayout {
    pub fn shows_battery(self) -> bool {
        matches!(self, FaceLayout::WithBattery)
    }
}

/// How the face presents itself
///
/// While charging the time is drawn larger, the date is hidden and the
/// backlight stays on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    Normal,
    Charging,
}

impl DisplayMode {
    /// Pick the display mode for the current battery status.
    pub fn select(layout: FaceLayout, battery: Option<BatteryInfo>) -> Self {
        match battery {
            Some(info) if layout.shows_battery() && info.charging => DisplayMode::Charging,
            _ => DisplayMode::Normal,
        }
    }

    pub fn date_visible(self) -> bool {
        self == DisplayMode::Normal
    }

    pub fn backlight_on(self) -> bool {
        self == DisplayMode::Charging
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Label buffer too small for the formatted text
    BufferOverflow,
}
