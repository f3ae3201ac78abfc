// Dial and joystick readings
//
// ADC1 with 11dB attenuation and curve calibration gives roughly
// 0..2500mV. Readings are rescaled to a 10-bit level (0..=1023) and
// clamped at the configured full-scale voltage.

use crate::error::Error;

pub const LEVEL_MAX: u16 = 1023;
const FULL_SCALE_MV: u16 = 2500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    Dial,
    JoystickX,
    JoystickY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const fn channel(self) -> AnalogChannel {
        match self {
            Axis::X => AnalogChannel::JoystickX,
            Axis::Y => AnalogChannel::JoystickY,
        }
    }
}

/// One-shot millivolt reads, `nb` style like the esp-hal ADC.
pub trait AnalogInput {
    type Error: core::fmt::Debug;

    fn read_mv(&mut self, channel: AnalogChannel) -> nb::Result<u16, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalogConfig {
    pub full_scale_mv: u16,
}

impl AnalogConfig {
    pub const fn new() -> Self {
        Self {
            full_scale_mv: FULL_SCALE_MV,
        }
    }

    pub const fn with_full_scale_mv(mut self, mv: u16) -> Self {
        self.full_scale_mv = mv;
        self
    }
}

impl Default for AnalogConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mv_to_level(mv: u16, full_scale_mv: u16) -> u16 {
    if full_scale_mv == 0 {
        return 0;
    }
    let mv = mv.min(full_scale_mv) as u32;
    (mv * LEVEL_MAX as u32 / full_scale_mv as u32) as u16
}

pub struct Analog<A> {
    adc: A,
    config: AnalogConfig,
}

impl<A: AnalogInput> Analog<A> {
    pub fn new(adc: A, config: AnalogConfig) -> Self {
        Self { adc, config }
    }

    pub fn read_level(&mut self, channel: AnalogChannel) -> Result<u16, Error<A::Error>> {
        let mv = nb::block!(self.adc.read_mv(channel)).map_err(Error::Adc)?;
        Ok(mv_to_level(mv, self.config.full_scale_mv))
    }

    pub fn read_dial(&mut self) -> Result<u16, Error<A::Error>> {
        self.read_level(AnalogChannel::Dial)
    }

    pub fn read_joystick(&mut self, axis: Axis) -> Result<u16, Error<A::Error>> {
        self.read_level(axis.channel())
    }
}
