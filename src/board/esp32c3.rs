// ESP32-C3 bring-up: GPIO inputs, ADC1 channels, SPI2 for the LED band

use esp_hal::{
    Blocking,
    analog::adc::{Adc, AdcCalCurve, AdcConfig, AdcPin, Attenuation},
    gpio::{Input, InputConfig, Pull},
    peripherals::{ADC1, GPIO0, GPIO1, GPIO2, Peripherals},
    spi,
    time::{Instant, Rate},
};
use log::info;

use super::button::ButtonId;
use crate::drivers::analog::{AnalogChannel, AnalogInput};
use crate::drivers::input::PinSource;
use crate::drivers::ws2812::{SPI_FREQ_KHZ, Ws2812};

pub type SpiBus = spi::master::Spi<'static, Blocking>;

type Cal = AdcCalCurve<ADC1<'static>>;

/// Button GPIOs, configured but not yet claimed by a handler.
pub struct ButtonPins {
    pins: [Option<Input<'static>>; ButtonId::COUNT],
}

impl PinSource for ButtonPins {
    type Pin = Input<'static>;

    fn take(&mut self, id: ButtonId) -> Option<Self::Pin> {
        self.pins[id.index()].take()
    }
}

/// ADC1 with the dial and both joystick axes.
pub struct AnalogHw {
    pub adc: Adc<'static, ADC1<'static>, Blocking>,
    pub dial: AdcPin<GPIO0<'static>, ADC1<'static>, Cal>,
    pub joy_x: AdcPin<GPIO1<'static>, ADC1<'static>, Cal>,
    pub joy_y: AdcPin<GPIO2<'static>, ADC1<'static>, Cal>,
}

impl AnalogInput for AnalogHw {
    type Error = ();

    fn read_mv(&mut self, channel: AnalogChannel) -> nb::Result<u16, ()> {
        match channel {
            AnalogChannel::Dial => self.adc.read_oneshot(&mut self.dial),
            AnalogChannel::JoystickX => self.adc.read_oneshot(&mut self.joy_x),
            AnalogChannel::JoystickY => self.adc.read_oneshot(&mut self.joy_y),
        }
    }
}

pub type LedHw = Ws2812<SpiBus>;

/// Complete board hardware, ready for the commander.
pub struct Board {
    pub buttons: ButtonPins,
    pub analog: AnalogHw,
    pub leds: LedHw,
}

impl Board {
    pub fn init(p: Peripherals) -> Result<Self, spi::master::ConfigError> {
        // no pull: the pads are driven HIGH by the button itself
        let cfg = InputConfig::default().with_pull(Pull::None);
        let buttons = ButtonPins {
            pins: [
                Some(Input::new(p.GPIO4, cfg)),
                Some(Input::new(p.GPIO5, cfg)),
                Some(Input::new(p.GPIO6, cfg)),
                Some(Input::new(p.GPIO7, cfg)),
                Some(Input::new(p.GPIO3, cfg)),
            ],
        };

        // 11dB attenuation for the full 0-2.5V swing of the pots
        let mut adc_cfg = AdcConfig::new();
        let dial = adc_cfg.enable_pin_with_cal::<_, Cal>(p.GPIO0, Attenuation::_11dB);
        let joy_x = adc_cfg.enable_pin_with_cal::<_, Cal>(p.GPIO1, Attenuation::_11dB);
        let joy_y = adc_cfg.enable_pin_with_cal::<_, Cal>(p.GPIO2, Attenuation::_11dB);
        let adc = Adc::new(p.ADC1, adc_cfg);
        let analog = AnalogHw {
            adc,
            dial,
            joy_x,
            joy_y,
        };

        let spi_cfg = spi::master::Config::default()
            .with_frequency(Rate::from_khz(SPI_FREQ_KHZ))
            .with_mode(spi::Mode::_0);
        let spi_bus = spi::master::Spi::new(p.SPI2, spi_cfg)?.with_mosi(p.GPIO10);
        let leds = Ws2812::new(spi_bus);

        info!("board: gpio, adc1 and spi2 configured");
        Ok(Board {
            buttons,
            analog,
            leds,
        })
    }
}

/// Milliseconds since boot, from the esp-hal system timer.
pub fn now_ms() -> u64 {
    Instant::now().duration_since_epoch().as_millis()
}
