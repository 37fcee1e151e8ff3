pub mod backlight;
pub mod battery;
#[cfg(feature = "firmware")]
pub mod display;
