// bitcommander firmware entry point and main loop
//
// Boot sequence: logger -> timer -> board -> commander -> listeners
// Main loop: WFI -> on tick poll buttons -> drain events -> repeat
//
// Registering the listeners is what brings the buttons up; the
// commander lives in a StaticCell for the rest of the program.

#![no_std]
#![no_main]

use core::cell::RefCell;

use critical_section::Mutex;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::time::Duration;
use esp_hal::timer::PeriodicTimer;
use esp_hal::timer::timg::TimerGroup;
use log::{debug, info, warn};
use static_cell::StaticCell;

use bitcommander::{Commander, Error};
use bitcommander::board::{self, AnalogHw, Board, ButtonId, ButtonPins, LedHw};
use bitcommander::drivers::analog::Axis;
use bitcommander::drivers::band::{Color, PixelSink};
use bitcommander::drivers::button::ButtonEvent;
use bitcommander::drivers::input::Event;
use bitcommander::kernel::wake::{self, TICK_MS, signal_timer, try_wake};

esp_bootloader_esp_idf::esp_app_desc!();

const ANALOG_LOG_INTERVAL_MS: u64 = 1000;

type Controller = Commander<ButtonPins, AnalogHw, LedHw>;

static COMMANDER: StaticCell<Controller> = StaticCell::new();

static TIMER0: Mutex<RefCell<Option<PeriodicTimer<'static, esp_hal::Blocking>>>> =
    Mutex::new(RefCell::new(None));

#[esp_hal::handler(priority = esp_hal::interrupt::Priority::Priority1)]
fn timer0_handler() {
    critical_section::with(|cs| {
        if let Some(timer) = TIMER0.borrow_ref_mut(cs).as_mut() {
            timer.clear_interrupt();
        }
    });
    signal_timer();
}

fn log_event(ev: Event) {
    info!("button: {}", ev);
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let timg0 = TimerGroup::new(unsafe { peripherals.TIMG0.clone_unchecked() });
    let mut timer0 = PeriodicTimer::new(timg0.timer0);
    critical_section::with(|cs| {
        timer0.set_interrupt_handler(timer0_handler);
        timer0.start(Duration::from_millis(TICK_MS as u64)).unwrap();
        timer0.listen();
        TIMER0.borrow_ref_mut(cs).replace(timer0);
    });
    info!("timer initialized.");

    let hw = Board::init(peripherals).unwrap();
    let commander = COMMANDER.init(Commander::new(hw.buttons, hw.analog, hw.leds));
    info!("hardware initialized.");

    for id in ButtonId::ALL {
        for kind in [ButtonEvent::Click, ButtonEvent::LongClick, ButtonEvent::Hold] {
            if let Err(e) = commander.on_event(id, kind, log_event) {
                warn!("listener: {}", e);
            }
        }
    }

    if let Err(e) = commander.led_rainbow() {
        warn!("{}", e);
    }
    info!("ready.");

    let mut last_analog_ms = 0;

    loop {
        wake::wait_for_interrupt();
        if !try_wake() {
            continue;
        }

        let now = board::now_ms();
        if let Err(e) = commander.poll(now) {
            warn!("{}", e);
        }

        while let Some(ev) = commander.next_event() {
            if let Err(e) = react(commander, ev) {
                warn!("{}", e);
            }
        }

        if now.saturating_sub(last_analog_ms) >= ANALOG_LOG_INTERVAL_MS {
            last_analog_ms = now;
            log_analog(commander);
        }
    }
}

// Colour buttons paint the band, the joystick button cycles it.
fn react(c: &mut Controller, ev: Event) -> Result<(), Error<<LedHw as PixelSink>::Error>> {
    if ev.kind != ButtonEvent::Down {
        return Ok(());
    }
    match ev.button {
        ButtonId::Red => c.set_led_color(Color::Red.rgb()),
        ButtonId::Yellow => c.set_led_color(Color::Yellow.rgb()),
        ButtonId::Green => c.set_led_color(Color::Green.rgb()),
        ButtonId::Blue => c.set_led_color(Color::Blue.rgb()),
        ButtonId::Joystick => c.led_rotate(),
    }
}

fn log_analog(c: &mut Controller) {
    match (
        c.read_dial(),
        c.read_joystick(Axis::X),
        c.read_joystick(Axis::Y),
    ) {
        (Ok(dial), Ok(x), Ok(y)) => debug!("dial={} joy=({}, {})", dial, x, y),
        _ => warn!("analog: read failed"),
    }
}
