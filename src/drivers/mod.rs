// Hardware drivers: generic over embedded-hal traits, board-independent.
//
// Only pin assignments and bus wiring (in board/) are board-specific.

pub mod analog;
pub mod band;
pub mod button;
pub mod input;
pub mod ws2812;
