//! Drivers and board bring-up.
//!
//! The drivers are generic over `embedded-hal` traits so the host build can
//! exercise them; everything naming STM32 peripherals stays behind the
//! `hardware` feature.

pub mod keys;
pub mod serial;
pub mod sevenseg;

#[cfg(feature = "hardware")]
mod board;

#[cfg(feature = "hardware")]
pub use board::{setup, Hardware, Keys, SegmentDisplay, UartReporter, SYSCLK_HZ};
