//! Label text formatting
//!
//! All strings are written into caller provided buffers, nothing is
//! allocated. A buffer that cannot hold the whole string is an error, the
//! text is never truncated.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use super::{ClockStyle, Error};
use crate::peripherals::battery::BatteryInfo;

/// Capacity of the time label buffer
pub const TIME_BUF_LEN: usize = 8;
/// Capacity of the date label buffer
pub const DATE_BUF_LEN: usize = 8;
/// Capacity of the battery label buffer
pub const BATTERY_BUF_LEN: usize = 16;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Write the time as `HH:MM`, on a 12h or 24h clock.
pub fn format_time(buf: &mut [u8], time: NaiveTime, style: ClockStyle) -> Result<&str, Error> {
    let hour = match style {
        ClockStyle::H24 => time.hour(),
        ClockStyle::H12 => time.hour12().1,
    };
    show(buf, format_args!("{:02}:{:02}", hour, time.minute()))
}

/// Write the date as abbreviated month and space padded day, e.g. `Mar  3`.
pub fn format_date(buf: &mut [u8], date: NaiveDate) -> Result<&str, Error> {
    show(
        buf,
        format_args!("{} {:>2}", MONTHS[date.month0() as usize], date.day()),
    )
}

/// Write the battery charge, e.g. `64%` or `64% charging`.
pub fn format_battery(buf: &mut [u8], info: BatteryInfo) -> Result<&str, Error> {
    if info.charging {
        show(buf, format_args!("{}% charging", info.percent))
    } else {
        show(buf, format_args!("{}%", info.percent))
    }
}

fn show<'a>(buf: &'a mut [u8], args: core::fmt::Arguments) -> Result<&'a str, Error> {
    format_no_std::show(buf, args).map_err(|_| Error::BufferOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_time_24h() {
        #[rustfmt::skip]
        let table = [
            ((0, 0), "00:00"),
            ((7, 5), "07:05"),
            ((12, 30), "12:30"),
            ((23, 59), "23:59"),
        ];

        for ((h, m), expected) in table {
            let mut buf = [0; TIME_BUF_LEN];
            assert_eq!(format_time(&mut buf, time(h, m), ClockStyle::H24).unwrap(), expected);
        }
    }

    #[test]
    fn test_time_12h() {
        #[rustfmt::skip]
        let table = [
            ((0, 0), "12:00"),
            ((7, 5), "07:05"),
            ((12, 30), "12:30"),
            ((13, 1), "01:01"),
            ((23, 59), "11:59"),
        ];

        for ((h, m), expected) in table {
            let mut buf = [0; TIME_BUF_LEN];
            assert_eq!(format_time(&mut buf, time(h, m), ClockStyle::H12).unwrap(), expected);
        }
    }

    #[test]
    fn test_date() {
        #[rustfmt::skip]
        let table = [
            ((2024, 1, 1), "Jan  1"),
            ((2024, 3, 3), "Mar  3"),
            ((2026, 10, 18), "Oct 18"),
            ((2023, 12, 31), "Dec 31"),
        ];

        for ((y, m, d), expected) in table {
            let mut buf = [0; DATE_BUF_LEN];
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(format_date(&mut buf, date).unwrap(), expected);
        }
    }

    #[test]
    fn test_battery() {
        #[rustfmt::skip]
        let table = [
            (0, false, "0%"),
            (50, false, "50%"),
            (100, false, "100%"),
            (0, true, "0% charging"),
            (50, true, "50% charging"),
            (100, true, "100% charging"),
        ];

        for (percent, charging, expected) in table {
            let mut buf = [0; BATTERY_BUF_LEN];
            let info = BatteryInfo { percent, charging };
            assert_eq!(format_battery(&mut buf, info).unwrap(), expected);
        }
    }

    #[test]
    fn test_overflow_is_an_error() {
        let mut buf = [0; 4];
        assert!(matches!(
            format_time(&mut buf, time(12, 0), ClockStyle::H24),
            Err(Error::BufferOverflow)
        ));

        let mut buf = [0; 8];
        let info = BatteryInfo { percent: 100, charging: true };
        assert!(format_battery(&mut buf, info).is_err());
    }
}
