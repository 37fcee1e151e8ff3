//! Digital watchface for the PineTime
//!
//! The library holds everything that does not touch the hardware directly
//! (formatting, layout, display modes, time keeping, battery conversion) so it
//! can be tested on the host. Hardware drivers are only built with the
//! `firmware` feature.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod peripherals;
pub mod system;
pub mod ui;
