//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

#[cfg(feature = "firmware")]
use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};

/// Battery status as shown on the watchface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryInfo {
    /// Battery percentage
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

/// Convert a 12 bit SAADC measurement into the battery voltage in millivolts.
pub fn millivolts_from_adc(raw_measurement: i16) -> Result<u16, Error> {
    match raw_measurement {
        0..=4095 => {
            // The battery is measured through a divider halving the voltage, against
            // the 3.3 V reference: raw * 2 * 1000 / (2^12 / 3.3)
            // Use u32 during calculation to prevent overflow
            Ok((raw_measurement as u32 * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

/// Estimate the battery capacity in percent.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    // Use fixed data points and linear interpolation in between
    // to estimate battery capacity.
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Battery API
#[cfg(feature = "firmware")]
pub struct Battery {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'static, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'static, P0_12>,
    /// Last measured status
    info: BatteryInfo,
}

#[cfg(feature = "firmware")]
impl Battery {
    /// Configure battery settings on boot and take a first measurement
    pub async fn init(
        adc: Saadc<'static, 1>,
        charge_pin: Input<'static, P0_12>,
    ) -> Result<Self, Error> {
        let mut battery = Self {
            adc,
            pin_charge_indication: charge_pin,
            info: BatteryInfo {
                percent: 0,
                charging: false,
            },
        };
        battery.info = battery.measure().await?;
        Ok(battery)
    }

    /// Return the last measured state of the battery.
    ///
    /// To fetch current data, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    /// Update the current battery status by reading information from the
    /// hardware. Return whether or not the values changed.
    pub async fn update(&mut self) -> Result<bool, Error> {
        let info = self.measure().await?;
        let changed = info != self.info;
        self.info = info;
        Ok(changed)
    }

    async fn measure(&mut self) -> Result<BatteryInfo, Error> {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        let voltage = millivolts_from_adc(buf[0])?;
        debug!("Battery voltage: {} mV", voltage);

        Ok(BatteryInfo {
            percent: percent_from_millivolts(voltage),
            charging: self.pin_charge_indication.is_low(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    InvalidMeasurement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adc_conversion() {
        #[rustfmt::skip]
        let table = [
            (0, 0),
            (1241, 2000),
            (2172, 3500),
            (4095, 6599),
        ];

        for (raw, expected_mv) in table {
            assert_eq!(millivolts_from_adc(raw), Ok(expected_mv));
        }
    }

    #[test]
    fn test_invalid_measurement() {
        assert_eq!(millivolts_from_adc(-1), Err(Error::InvalidMeasurement));
        assert_eq!(millivolts_from_adc(4096), Err(Error::InvalidMeasurement));
    }

    #[test]
    fn test_percentage() {
        #[rustfmt::skip]
        let table = [
            (3000, 0),
            (3449, 0),
            (3450, 0),
            (3575, 25),
            (3700, 50),
            (3950, 75),
            (4199, 99),
            (4200, 100),
            (4500, 100),
        ];

        for (voltage, expected_percentage) in table {
            assert_eq!(percent_from_millivolts(voltage), expected_percentage);
        }
    }
}
