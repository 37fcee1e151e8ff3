//! Logging macros
//!
//! Forward to `defmt` on the device and to `log` on the host, depending on
//! the enabled feature. With neither feature enabled the arguments are only
//! type checked.

macro_rules! debug {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::debug!($($args)*);
        #[cfg(feature = "log")]
        log::debug!($($args)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = core::format_args!($($args)*);
    };
}
