//! Controller facade: buttons, event listeners, analog inputs and the
//! LED band behind one handle.
//!
//! Buttons are brought up lazily: the first `on_event`, `read_button`
//! or explicit `init_buttons` call builds the five handlers, and every
//! later call leaves them alone.
//!
//! LED operations follow the update mode. In `Auto` every change is
//! written to the band immediately; in `Manual` nothing reaches the
//! LEDs until `show()`.

use embedded_hal::digital::ErrorType;

use crate::board::{ButtonId, LED_COUNT};
use crate::drivers::analog::{Analog, AnalogConfig, AnalogInput, Axis};
use crate::drivers::band::{Band, PixelSink, Rgb};
use crate::drivers::button::{ButtonConfig, ButtonEvent};
use crate::drivers::input::{Event, InputDriver, PinSource};
use crate::error::Error;
use crate::kernel::bus::{EventBus, Handler, ListenError};

type PinError<S> = <<S as PinSource>::Pin as ErrorType>::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    Manual,
    #[default]
    Auto,
}

pub struct Commander<S: PinSource, A, W> {
    input: InputDriver<S>,
    bus: EventBus,
    analog: Analog<A>,
    band: Option<Band<LED_COUNT>>,
    leds: W,
    mode: UpdateMode,
}

impl<S, A, W> Commander<S, A, W>
where
    S: PinSource,
    A: AnalogInput,
    W: PixelSink,
{
    pub fn new(buttons: S, analog: A, leds: W) -> Self {
        Self::with_config(buttons, ButtonConfig::new(), analog, AnalogConfig::new(), leds)
    }

    pub fn with_config(
        buttons: S,
        button_config: ButtonConfig,
        analog: A,
        analog_config: AnalogConfig,
        leds: W,
    ) -> Self {
        Self {
            input: InputDriver::new(buttons, button_config),
            bus: EventBus::new(),
            analog: Analog::new(analog, analog_config),
            band: None,
            leds,
            mode: UpdateMode::Auto,
        }
    }

    // ----- Buttons -----

    pub fn init_buttons(&mut self) {
        self.input.init();
    }

    pub fn input(&self) -> &InputDriver<S> {
        &self.input
    }

    pub fn on_event(
        &mut self,
        button: ButtonId,
        kind: ButtonEvent,
        handler: Handler,
    ) -> Result<(), ListenError> {
        self.input.init();
        self.bus.listen(button, kind, handler)
    }

    /// Drop the listener for (button, kind); false if none was registered.
    pub fn ignore_event(&mut self, button: ButtonId, kind: ButtonEvent) -> bool {
        self.bus.ignore(button, kind)
    }

    pub fn read_button(&mut self, button: ButtonId) -> Result<bool, Error<PinError<S>>> {
        self.input.init();
        self.input.read_button(button).map_err(Error::Pin)
    }

    /// Scan the buttons; returns how many events were queued.
    pub fn poll(&mut self, now_ms: u64) -> Result<usize, Error<PinError<S>>> {
        self.input.poll(now_ms).map_err(Error::Pin)
    }

    /// Pop the next event after running its listeners.
    pub fn next_event(&mut self) -> Option<Event> {
        let ev = self.input.next_event()?;
        self.bus.dispatch(ev);
        Some(ev)
    }

    // ----- Analog -----

    pub fn read_dial(&mut self) -> Result<u16, Error<A::Error>> {
        self.analog.read_dial()
    }

    pub fn read_joystick(&mut self, axis: Axis) -> Result<u16, Error<A::Error>> {
        self.analog.read_joystick(axis)
    }

    // ----- LEDs -----

    pub fn update_mode(&self) -> UpdateMode {
        self.mode
    }

    pub fn set_update_mode(&mut self, mode: UpdateMode) {
        self.mode = mode;
    }

    pub fn band(&mut self) -> &mut Band<LED_COUNT> {
        self.band.get_or_insert_with(Band::new)
    }

    pub fn set_led_color(&mut self, color: Rgb) -> Result<(), Error<W::Error>> {
        self.band().set_all(color);
        self.changed()
    }

    pub fn led_clear(&mut self) -> Result<(), Error<W::Error>> {
        self.band().clear();
        self.changed()
    }

    pub fn set_pixel_color(&mut self, index: usize, color: Rgb) -> Result<(), Error<W::Error>> {
        self.band().set_pixel(index, color);
        self.changed()
    }

    pub fn led_rainbow(&mut self) -> Result<(), Error<W::Error>> {
        self.band().rainbow();
        self.changed()
    }

    pub fn led_shift(&mut self) -> Result<(), Error<W::Error>> {
        self.band().shift();
        self.changed()
    }

    pub fn led_rotate(&mut self) -> Result<(), Error<W::Error>> {
        self.band().rotate();
        self.changed()
    }

    pub fn led_brightness(&mut self, brightness: u8) -> Result<(), Error<W::Error>> {
        self.band().set_brightness(brightness);
        self.changed()
    }

    pub fn show(&mut self) -> Result<(), Error<W::Error>> {
        let band = self.band.get_or_insert_with(Band::new);
        band.show(&mut self.leds).map_err(Error::Leds)
    }

    fn changed(&mut self) -> Result<(), Error<W::Error>> {
        match self.mode {
            UpdateMode::Auto => self.show(),
            UpdateMode::Manual => Ok(()),
        }
    }
}
