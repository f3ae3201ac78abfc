// board support for the Bit:Commander-style controller (ESP32-C3)

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod commander;
pub mod drivers;
pub mod error;
pub mod kernel;

pub use commander::Commander;
pub use error::Error;
