use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use bitcommander::Commander;
use bitcommander::board::ButtonId;
use bitcommander::commander::UpdateMode;
use bitcommander::drivers::analog::{AnalogChannel, AnalogInput, Axis};
use bitcommander::drivers::band::{Color, PixelSink, Rgb};
use bitcommander::drivers::button::{ButtonConfig, ButtonEvent, EventMode};
use bitcommander::drivers::input::{Event, InputDriver, PinSource};

#[derive(Clone)]
struct FakePin(Rc<Cell<bool>>);

impl embedded_hal::digital::ErrorType for FakePin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

/// Pin lookup that records every request.
struct FakePins {
    levels: [Rc<Cell<bool>>; ButtonId::COUNT],
    taken: [bool; ButtonId::COUNT],
    lookups: Rc<Cell<usize>>,
}

impl FakePins {
    fn new() -> Self {
        Self {
            levels: Default::default(),
            taken: [false; ButtonId::COUNT],
            lookups: Rc::new(Cell::new(0)),
        }
    }

    fn level(&self, id: ButtonId) -> Rc<Cell<bool>> {
        self.levels[id.index()].clone()
    }
}

impl PinSource for FakePins {
    type Pin = FakePin;

    fn take(&mut self, id: ButtonId) -> Option<FakePin> {
        self.lookups.set(self.lookups.get() + 1);
        if std::mem::replace(&mut self.taken[id.index()], true) {
            return None;
        }
        Some(FakePin(self.levels[id.index()].clone()))
    }
}

struct FakeAdc;

impl AnalogInput for FakeAdc {
    type Error = ();

    fn read_mv(&mut self, channel: AnalogChannel) -> nb::Result<u16, ()> {
        Ok(match channel {
            AnalogChannel::Dial => 2500,
            AnalogChannel::JoystickX => 1250,
            AnalogChannel::JoystickY => 0,
        })
    }
}

#[derive(Clone, Default)]
struct FrameLog(Rc<RefCell<Vec<Vec<Rgb>>>>);

impl PixelSink for FrameLog {
    type Error = Infallible;

    fn write_pixels(&mut self, pixels: &[Rgb]) -> Result<(), Infallible> {
        self.0.borrow_mut().push(pixels.to_vec());
        Ok(())
    }
}

fn commander() -> (Commander<FakePins, FakeAdc, FrameLog>, FrameLog) {
    let frames = FrameLog::default();
    (Commander::new(FakePins::new(), FakeAdc, frames.clone()), frames)
}

fn pump<S: PinSource, A: AnalogInput, W: PixelSink>(
    c: &mut Commander<S, A, W>,
    from: u64,
    to: u64,
) -> Vec<Event> {
    let mut out = Vec::new();
    let mut t = from;
    while t < to {
        c.poll(t).unwrap();
        while let Some(ev) = c.next_event() {
            out.push(ev);
        }
        t += 10;
    }
    out
}

#[test]
fn no_handlers_before_init() {
    let driver = InputDriver::new(FakePins::new(), ButtonConfig::new());
    assert!(!driver.is_initialized());
    assert_eq!(driver.handler_count(), 0);
    for id in ButtonId::ALL {
        assert!(driver.handler(id).is_none());
    }
}

#[test]
fn init_creates_one_all_events_handler_per_pin() {
    let mut driver = InputDriver::new(FakePins::new(), ButtonConfig::new());
    driver.init();

    assert!(driver.is_initialized());
    assert_eq!(driver.handler_count(), ButtonId::COUNT);
    for id in ButtonId::ALL {
        let h = driver.handler(id).expect("handler");
        assert_eq!(h.id(), id);
        assert_eq!(h.mode(), EventMode::AllEvents);
    }
}

#[test]
fn second_init_is_a_no_op() {
    let pins = FakePins::new();
    let lookups = pins.lookups.clone();
    let mut driver = InputDriver::new(pins, ButtonConfig::new());

    driver.init();
    assert_eq!(lookups.get(), ButtonId::COUNT);

    driver.init();
    assert_eq!(lookups.get(), ButtonId::COUNT);
    assert_eq!(driver.handler_count(), ButtonId::COUNT);
    let ids: Vec<_> = driver.handlers().map(|h| h.id()).collect();
    assert_eq!(ids, ButtonId::ALL);
}

#[test]
fn missing_pin_is_skipped() {
    let mut pins = FakePins::new();
    pins.take(ButtonId::Blue);
    let mut driver = InputDriver::new(pins, ButtonConfig::new());
    driver.init();

    assert_eq!(driver.handler_count(), ButtonId::COUNT - 1);
    assert!(driver.handler(ButtonId::Blue).is_none());
}

static GREEN_CLICKS: AtomicU32 = AtomicU32::new(0);

fn on_green_click(ev: Event) {
    assert_eq!(ev.button, ButtonId::Green);
    GREEN_CLICKS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn on_event_inits_and_dispatches() {
    let pins = FakePins::new();
    let green = pins.level(ButtonId::Green);
    let frames = FrameLog::default();
    let mut c = Commander::new(pins, FakeAdc, frames);

    assert!(!c.input().is_initialized());
    c.on_event(ButtonId::Green, ButtonEvent::Click, on_green_click)
        .unwrap();
    assert_eq!(c.input().handler_count(), ButtonId::COUNT);

    green.set(true);
    let down = pump(&mut c, 0, 100);
    assert_eq!(down, [Event::new(ButtonId::Green, ButtonEvent::Down)]);

    green.set(false);
    let up = pump(&mut c, 100, 200);
    assert_eq!(
        up,
        [
            Event::new(ButtonId::Green, ButtonEvent::Up),
            Event::new(ButtonId::Green, ButtonEvent::Click),
        ]
    );
    assert_eq!(GREEN_CLICKS.load(Ordering::SeqCst), 1);
}

static YELLOW_CLICKS: AtomicU32 = AtomicU32::new(0);

fn on_yellow_click(_: Event) {
    YELLOW_CLICKS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn ignored_listener_no_longer_runs() {
    let pins = FakePins::new();
    let yellow = pins.level(ButtonId::Yellow);
    let mut c = Commander::new(pins, FakeAdc, FrameLog::default());

    c.on_event(ButtonId::Yellow, ButtonEvent::Click, on_yellow_click)
        .unwrap();
    assert!(c.ignore_event(ButtonId::Yellow, ButtonEvent::Click));
    assert!(!c.ignore_event(ButtonId::Yellow, ButtonEvent::Click));

    yellow.set(true);
    pump(&mut c, 0, 100);
    yellow.set(false);
    let events = pump(&mut c, 100, 200);

    assert!(events.contains(&Event::new(ButtonId::Yellow, ButtonEvent::Click)));
    assert_eq!(YELLOW_CLICKS.load(Ordering::SeqCst), 0);
}

#[test]
fn read_button_is_raw_level() {
    let pins = FakePins::new();
    let red = pins.level(ButtonId::Red);
    let mut c = Commander::new(pins, FakeAdc, FrameLog::default());

    assert!(!c.read_button(ButtonId::Red).unwrap());
    red.set(true);
    assert!(c.read_button(ButtonId::Red).unwrap());
    assert!(!c.read_button(ButtonId::Yellow).unwrap());
}

#[test]
fn analog_levels() {
    let (mut c, _) = commander();
    assert_eq!(c.read_dial().unwrap(), 1023);
    assert_eq!(c.read_joystick(Axis::X).unwrap(), 511);
    assert_eq!(c.read_joystick(Axis::Y).unwrap(), 0);
}

#[test]
fn auto_mode_shows_every_change() {
    let (mut c, frames) = commander();
    assert_eq!(c.update_mode(), UpdateMode::Auto);

    c.led_brightness(255).unwrap();
    c.set_led_color(Color::Red.rgb()).unwrap();
    c.set_pixel_color(5, Color::Blue.rgb()).unwrap();

    let frames = frames.0.borrow();
    assert_eq!(frames.len(), 3);
    let last = frames.last().unwrap();
    assert_eq!(last.len(), 6);
    assert_eq!(last[0], Rgb::new(254, 0, 0));
    assert_eq!(last[5], Rgb::new(0, 0, 254));
}

#[test]
fn manual_mode_waits_for_show() {
    let (mut c, frames) = commander();
    c.set_update_mode(UpdateMode::Manual);

    c.led_rainbow().unwrap();
    c.led_rotate().unwrap();
    c.led_shift().unwrap();
    assert!(frames.0.borrow().is_empty());

    c.show().unwrap();
    let frames = frames.0.borrow();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0][0], Rgb::BLACK);
}

#[test]
fn band_starts_at_default_brightness() {
    let (mut c, frames) = commander();
    c.led_clear().unwrap();
    assert_eq!(c.band().brightness(), 40);
    assert!(frames.0.borrow()[0].iter().all(|p| *p == Rgb::BLACK));
}
