// Debounced push-button handler, one per GPIO
//
// Polled from the 10ms tick. A level change has to hold for the
// debounce window before it becomes the stable state.
//
//   press    -> Down
//   held     -> Hold (once, after hold_ms)
//   release  -> Up, then Click / LongClick (AllEvents only)

use embedded_hal::digital::InputPin;

use crate::board::button::ButtonId;

const DEBOUNCE_MS: u64 = 30;
const LONG_CLICK_MS: u64 = 1000;
const HOLD_MS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Down,
    Up,
    Click,
    LongClick,
    Hold,
}

impl ButtonEvent {
    pub const fn name(self) -> &'static str {
        match self {
            ButtonEvent::Down => "Down",
            ButtonEvent::Up => "Up",
            ButtonEvent::Click => "Click",
            ButtonEvent::LongClick => "LongClick",
            ButtonEvent::Hold => "Hold",
        }
    }
}

impl core::fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which events a handler reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventMode {
    /// Down, Up and Hold.
    SimpleEvents,
    /// Everything, including Click and LongClick on release.
    #[default]
    AllEvents,
}

/// Electrical level that means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

/// Timing thresholds shared by all handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub debounce_ms: u64,
    pub long_click_ms: u64,
    pub hold_ms: u64,
}

impl ButtonConfig {
    pub const fn new() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            long_click_ms: LONG_CLICK_MS,
            hold_ms: HOLD_MS,
        }
    }

    pub const fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub const fn with_long_click_ms(mut self, ms: u64) -> Self {
        self.long_click_ms = ms;
        self
    }

    pub const fn with_hold_ms(mut self, ms: u64) -> Self {
        self.hold_ms = ms;
        self
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ButtonHandler<P> {
    id: ButtonId,
    pin: P,
    polarity: Polarity,
    mode: EventMode,
    config: ButtonConfig,
    stable: bool,
    candidate: bool,
    candidate_since: u64,
    press_since: u64,
    hold_fired: bool,
    // second event of a release (Click / LongClick)
    pending: Option<ButtonEvent>,
}

impl<P: InputPin> ButtonHandler<P> {
    pub fn new(id: ButtonId, pin: P, mode: EventMode, config: ButtonConfig) -> Self {
        Self {
            id,
            pin,
            polarity: id.polarity(),
            mode,
            config,
            stable: false,
            candidate: false,
            candidate_since: 0,
            press_since: 0,
            hold_fired: false,
            pending: None,
        }
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn mode(&self) -> EventMode {
        self.mode
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Debounced state.
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Raw pin level, polarity applied, no debounce.
    pub fn read_level(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(match self.polarity {
            Polarity::ActiveHigh => high,
            Polarity::ActiveLow => !high,
        })
    }

    pub fn poll(&mut self, now_ms: u64) -> Result<Option<ButtonEvent>, P::Error> {
        if let Some(ev) = self.pending.take() {
            return Ok(Some(ev));
        }

        let raw = self.read_level()?;

        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since = now_ms;
        }

        let settled = now_ms.saturating_sub(self.candidate_since) >= self.config.debounce_ms;
        if settled && self.candidate != self.stable {
            self.stable = self.candidate;
            return Ok(Some(if self.stable {
                self.press_since = now_ms;
                self.hold_fired = false;
                ButtonEvent::Down
            } else {
                self.pending = self.release_event(now_ms);
                ButtonEvent::Up
            }));
        }

        if self.stable
            && !self.hold_fired
            && now_ms.saturating_sub(self.press_since) >= self.config.hold_ms
        {
            self.hold_fired = true;
            return Ok(Some(ButtonEvent::Hold));
        }

        Ok(None)
    }

    fn release_event(&self, now_ms: u64) -> Option<ButtonEvent> {
        if self.mode != EventMode::AllEvents {
            return None;
        }
        if now_ms.saturating_sub(self.press_since) >= self.config.long_click_ms {
            Some(ButtonEvent::LongClick)
        } else {
            Some(ButtonEvent::Click)
        }
    }
}
