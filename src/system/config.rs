//! General system configuration

#[cfg(feature = "firmware")]
use embassy_nrf::{
    config::{Config, Debug, HfclkSource, LfclkSource},
    interrupt::Priority,
};

use crate::{
    peripherals::backlight::MAX_BRIGHTNESS,
    ui::{ClockStyle, FaceLayout, ScreenShape},
};

/// Watchface preferences
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchfaceConfig {
    /// 12h or 24h clock
    pub clock_style: ClockStyle,
    pub shape: ScreenShape,
    /// Labels to show
    pub layout: FaceLayout,
    /// Offset of local time to UTC, in seconds
    pub utc_offset_secs: i32,
    /// Backlight level when not charging (0–7)
    pub idle_brightness: u8,
    /// Backlight level while charging (0–7)
    pub charging_brightness: u8,
    /// Interval between battery measurements
    pub battery_poll_secs: u32,
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self {
            clock_style: ClockStyle::H24,
            shape: ScreenShape::Rect,
            layout: FaceLayout::WithBattery,
            utc_offset_secs: 0,
            idle_brightness: 2,
            charging_brightness: MAX_BRIGHTNESS,
            battery_poll_secs: 10,
        }
    }
}

impl WatchfaceConfig {
    /// Check the configuration for values the hardware can't honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_brightness > MAX_BRIGHTNESS || self.charging_brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::BrightnessOutOfRange);
        }
        if !(-86_399..=86_399).contains(&self.utc_offset_secs) {
            return Err(ConfigError::UtcOffsetOutOfRange);
        }
        if self.battery_poll_secs == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    BrightnessOutOfRange,
    UtcOffsetOutOfRange,
    ZeroPollInterval,
}

#[cfg(feature = "firmware")]
pub struct SystemConfig {}

#[cfg(feature = "firmware")]
impl SystemConfig {
    /// Create new system configuration
    pub fn new() -> Config {
        // Generate default config, required because Config is set as
        // `non_exhaustive`
        let mut config = Config::default();

        // Set high-frequency and low-frequency clock sources to external
        config.hfclk_source = HfclkSource::ExternalXtal;
        config.lfclk_source = LfclkSource::ExternalXtal;

        // Enable DC/DC regulator to massively reduce runtime current consumption
        config.dcdc.reg1 = true;

        // Keep the GPIOTE and timer interrupts below the executor
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;

        // Allow debugging
        config.debug = Debug::Allowed;

        config
    }
}
