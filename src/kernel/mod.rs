// Main-loop plumbing: timer wake flag and the button event bus.
// Single core, no preemption. WFI idles the CPU between ticks.

pub mod bus;
pub mod wake;

pub use bus::{EventBus, Handler, ListenError};
pub use wake::{try_wake, wait_for_interrupt};
