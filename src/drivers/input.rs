// Button bring-up and polling for the five controller buttons
//
// init() builds one AllEvents handler per button from the pin source,
// exactly once; later calls are no-ops. The handlers live inside the
// driver, which the firmware keeps in a StaticCell for the rest of the
// program.
//
// poll() scans every handler and queues Event { button, kind } for the
// main loop to drain.

use embedded_hal::digital::InputPin;
use log::{debug, info, warn};

use crate::board::button::ButtonId;
use crate::drivers::button::{ButtonConfig, ButtonEvent, ButtonHandler, EventMode};

pub const QUEUE_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub button: ButtonId,
    pub kind: ButtonEvent,
}

impl Event {
    pub const fn new(button: ButtonId, kind: ButtonEvent) -> Self {
        Self { button, kind }
    }
}

impl core::fmt::Display for Event {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.button, self.kind)
    }
}

/// Looks up the GPIO behind a button. Each pin is handed out once.
pub trait PinSource {
    type Pin: InputPin;

    fn take(&mut self, id: ButtonId) -> Option<Self::Pin>;
}

/// Fixed-capacity FIFO of button events.
pub struct EventQueue<const N: usize = QUEUE_DEPTH> {
    buf: [Option<Event>; N],
    head: usize,
    len: usize,
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            buf: [None; N],
            head: 0,
            len: 0,
        }
    }

    /// Hands the event back when the queue is full.
    pub fn push(&mut self, ev: Event) -> Result<(), Event> {
        if self.len == N {
            return Err(ev);
        }
        let tail = (self.head + self.len) % N;
        self.buf[tail] = Some(ev);
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Event> {
        if self.len == 0 {
            return None;
        }
        let ev = self.buf[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        ev
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct InputDriver<S: PinSource> {
    source: S,
    config: ButtonConfig,
    initialized: bool,
    handlers: [Option<ButtonHandler<S::Pin>>; ButtonId::COUNT],
    queue: EventQueue,
}

impl<S: PinSource> InputDriver<S> {
    pub fn new(source: S, config: ButtonConfig) -> Self {
        Self {
            source,
            config,
            initialized: false,
            handlers: [None, None, None, None, None],
            queue: EventQueue::new(),
        }
    }

    pub fn init(&mut self) {
        if self.initialized {
            return;
        }

        for id in ButtonId::ALL {
            match self.source.take(id) {
                Some(pin) => {
                    self.handlers[id.index()] = Some(ButtonHandler::new(
                        id,
                        pin,
                        EventMode::AllEvents,
                        self.config,
                    ));
                }
                None => warn!("button {}: GPIO{} unavailable", id, id.pin()),
            }
        }

        self.initialized = true;
        info!("buttons: {} handlers", self.handler_count());
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.iter().filter(|h| h.is_some()).count()
    }

    pub fn handler(&self, id: ButtonId) -> Option<&ButtonHandler<S::Pin>> {
        self.handlers[id.index()].as_ref()
    }

    pub fn handlers(&self) -> impl Iterator<Item = &ButtonHandler<S::Pin>> {
        self.handlers.iter().flatten()
    }

    /// Raw pressed state; false when the button has no handler.
    pub fn read_button(
        &mut self,
        id: ButtonId,
    ) -> Result<bool, <S::Pin as embedded_hal::digital::ErrorType>::Error> {
        match self.handlers[id.index()].as_mut() {
            Some(h) => h.read_level(),
            None => Ok(false),
        }
    }

    /// Poll every handler once; returns the number of events queued.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> Result<usize, <S::Pin as embedded_hal::digital::ErrorType>::Error> {
        let mut queued = 0;
        for h in self.handlers.iter_mut().flatten() {
            while let Some(kind) = h.poll(now_ms)? {
                let ev = Event::new(h.id(), kind);
                debug!("input: {}", ev);
                match self.queue.push(ev) {
                    Ok(()) => queued += 1,
                    Err(dropped) => warn!("input: queue full, dropped {}", dropped),
                }
            }
        }
        Ok(queued)
    }

    pub fn next_event(&mut self) -> Option<Event> {
        self.queue.pop()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
