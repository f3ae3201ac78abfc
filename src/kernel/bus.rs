// Listener table for button events
//
// Fixed number of slots, no allocation. One listener per
// (button, kind); registering again replaces the old handler.

use core::fmt;

use crate::board::button::ButtonId;
use crate::drivers::button::ButtonEvent;
use crate::drivers::input::Event;

pub const MAX_LISTENERS: usize = 16;

pub type Handler = fn(Event);

#[derive(Clone, Copy)]
struct Listener {
    button: ButtonId,
    kind: ButtonEvent,
    handler: Handler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenError {
    /// Every slot is taken; carries the rejected (button, kind).
    Full(ButtonId, ButtonEvent),
}

impl fmt::Display for ListenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenError::Full(button, kind) => {
                write!(f, "listener table full, rejected {} {}", button, kind)
            }
        }
    }
}

pub struct EventBus {
    slots: [Option<Listener>; MAX_LISTENERS],
}

impl EventBus {
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_LISTENERS],
        }
    }

    pub fn listen(
        &mut self,
        button: ButtonId,
        kind: ButtonEvent,
        handler: Handler,
    ) -> Result<(), ListenError> {
        let listener = Listener {
            button,
            kind,
            handler,
        };

        if let Some(slot) = self
            .slots
            .iter_mut()
            .flatten()
            .find(|l| l.button == button && l.kind == kind)
        {
            *slot = listener;
            return Ok(());
        }

        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(listener);
                Ok(())
            }
            None => Err(ListenError::Full(button, kind)),
        }
    }

    pub fn ignore(&mut self, button: ButtonId, kind: ButtonEvent) -> bool {
        for slot in self.slots.iter_mut() {
            if matches!(slot, Some(l) if l.button == button && l.kind == kind) {
                *slot = None;
                return true;
            }
        }
        false
    }

    /// Run every matching listener; returns how many ran.
    pub fn dispatch(&self, event: Event) -> usize {
        let mut ran = 0;
        for l in self.slots.iter().flatten() {
            if l.button == event.button && l.kind == event.kind {
                (l.handler)(event);
                ran += 1;
            }
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
