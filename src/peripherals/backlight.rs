//! Backlight control
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/backlight.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embedded_hal::digital::OutputPin;

use crate::{system::config::WatchfaceConfig, ui::DisplayMode};

/// Highest brightness level
pub const MAX_BRIGHTNESS: u8 = 7;

/// Control the backlight.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
///
/// Through combinations of these pins, 7 brightness levels (+ off) can be
/// configured.
pub struct Backlight<P>
where
    P: OutputPin,
{
    low: P,
    mid: P,
    high: P,

    /// The current brightness level (value between 0 and 7).
    brightness: u8,
}

impl<P> Backlight<P>
where
    P: OutputPin,
{
    /// Initialize the backlight with the specified level (0–7).
    pub fn init(low: P, mid: P, high: P, brightness: u8) -> Result<Self, Error<P::Error>> {
        let mut backlight = Self {
            low,
            mid,
            high,
            brightness,
        };
        backlight.set(brightness)?;
        Ok(backlight)
    }

    /// Set the brightness level. Must be a value between 0 (off) and 7 (max
    /// brightness). Higher values are clamped to 7.
    pub fn set(&mut self, brightness: u8) -> Result<(), Error<P::Error>> {
        let brightness = brightness.min(MAX_BRIGHTNESS);
        debug!("Setting backlight brightness to {}", brightness);

        Self::drive(&mut self.low, brightness & 0x01 > 0)?;
        Self::drive(&mut self.mid, brightness & 0x02 > 0)?;
        Self::drive(&mut self.high, brightness & 0x04 > 0)?;
        self.brightness = brightness;

        Ok(())
    }

    /// Apply the backlight request of a display mode.
    ///
    /// Charging forces the backlight on, otherwise it falls back to the idle
    /// brightness.
    pub fn apply(
        &mut self,
        mode: DisplayMode,
        config: &WatchfaceConfig,
    ) -> Result<(), Error<P::Error>> {
        if mode.backlight_on() {
            self.set(config.charging_brightness)
        } else {
            self.set(config.idle_brightness)
        }
    }

    /// Turn off the backlight.
    pub fn off(&mut self) -> Result<(), Error<P::Error>> {
        self.set(0)
    }

    /// Increase backlight brightness.
    pub fn brighter(&mut self) -> Result<(), Error<P::Error>> {
        self.set(self.brightness.saturating_add(1))
    }

    /// Decrease backlight brightness.
    pub fn darker(&mut self) -> Result<(), Error<P::Error>> {
        self.set(self.brightness.saturating_sub(1))
    }

    /// Return the current brightness level (value between 0 and 7).
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    // Active low
    fn drive(pin: &mut P, on: bool) -> Result<(), Error<P::Error>> {
        if on {
            pin.set_low().map_err(Error::Pin)
        } else {
            pin.set_high().map_err(Error::Pin)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    Pin(E),
}

#[cfg(test)]
mod tests {
    use core::{cell::Cell, convert::Infallible};

    use embedded_hal::digital::{ErrorType, OutputPin};

    use super::*;

    /// Pin recording its level, shared with the test through a reference
    struct MockPin<'a> {
        high: &'a Cell<bool>,
    }

    impl ErrorType for MockPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high.set(true);
            Ok(())
        }
    }

    /// Pins that always fail
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    struct Pins {
        low: Cell<bool>,
        mid: Cell<bool>,
        high: Cell<bool>,
    }

    impl Pins {
        fn new() -> Self {
            Self {
                low: Cell::new(false),
                mid: Cell::new(false),
                high: Cell::new(false),
            }
        }

        fn backlight(&self, brightness: u8) -> Backlight<MockPin<'_>> {
            Backlight::init(
                MockPin { high: &self.low },
                MockPin { high: &self.mid },
                MockPin { high: &self.high },
                brightness,
            )
            .unwrap()
        }

        /// Pin levels as (low, mid, high), true meaning the pin is driven high
        fn levels(&self) -> (bool, bool, bool) {
            (self.low.get(), self.mid.get(), self.high.get())
        }
    }

    #[test]
    fn test_pin_combinations() {
        #[rustfmt::skip]
        let table = [
            (0, (true, true, true)),
            (1, (false, true, true)),
            (2, (true, false, true)),
            (5, (false, true, false)),
            (7, (false, false, false)),
        ];

        for (brightness, expected) in table {
            let pins = Pins::new();
            let backlight = pins.backlight(brightness);

            assert_eq!(backlight.brightness(), brightness);
            assert_eq!(pins.levels(), expected);
        }
    }

    #[test]
    fn test_clamping() {
        let pins = Pins::new();
        let mut backlight = pins.backlight(0);

        backlight.set(12).unwrap();
        assert_eq!(backlight.brightness(), MAX_BRIGHTNESS);

        backlight.brighter().unwrap();
        assert_eq!(backlight.brightness(), MAX_BRIGHTNESS);

        backlight.off().unwrap();
        backlight.darker().unwrap();
        assert_eq!(backlight.brightness(), 0);
        assert_eq!(pins.levels(), (true, true, true));
    }

    #[test]
    fn test_display_mode() {
        let config = WatchfaceConfig {
            idle_brightness: 2,
            charging_brightness: 7,
            ..Default::default()
        };
        let pins = Pins::new();
        let mut backlight = pins.backlight(0);

        backlight.apply(DisplayMode::Charging, &config).unwrap();
        assert_eq!(backlight.brightness(), 7);

        backlight.apply(DisplayMode::Normal, &config).unwrap();
        assert_eq!(backlight.brightness(), 2);
    }

    #[test]
    fn test_pin_error() {
        let result = Backlight::init(BrokenPin, BrokenPin, BrokenPin, 3);
        assert!(matches!(
            result,
            Err(Error::Pin(embedded_hal::digital::ErrorKind::Other))
        ));
    }
}
