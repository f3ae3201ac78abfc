// HAL error wrapper, tagged with the subsystem it came from

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    Pin(E),
    Adc(E),
    Leds(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin(e) => write!(f, "button pin: {:?}", e),
            Error::Adc(e) => write!(f, "adc: {:?}", e),
            Error::Leds(e) => write!(f, "led band: {:?}", e),
        }
    }
}
