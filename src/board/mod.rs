//! Controller board support package (BSP)
//!
//! Maps the physical hardware to named subsystems so the rest of the
//! crate never needs a GPIO number. Pin constants and button identities
//! are always available; the esp-hal bring-up is behind the `esp32c3`
//! feature.

pub mod button;
pub mod pins;

#[cfg(feature = "esp32c3")]
mod esp32c3;

pub use button::ButtonId;
pub use pins::LED_COUNT;

#[cfg(feature = "esp32c3")]
pub use esp32c3::{AnalogHw, Board, ButtonPins, LedHw, now_ms};
