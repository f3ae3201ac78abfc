//! Button definitions for the controller.
//!
//! Five discrete push buttons, each on its own GPIO. The pads have no
//! pull resistor and read HIGH while pressed.

use super::pins;
use crate::drivers::button::Polarity;

/// All physical buttons on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Red,
    Yellow,
    Green,
    Blue,
    Joystick,
}

impl ButtonId {
    pub const COUNT: usize = 5;

    /// Initialization order of the handlers.
    pub const ALL: [ButtonId; Self::COUNT] = [
        ButtonId::Red,
        ButtonId::Yellow,
        ButtonId::Green,
        ButtonId::Blue,
        ButtonId::Joystick,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ButtonId::Red => "Red",
            ButtonId::Yellow => "Yellow",
            ButtonId::Green => "Green",
            ButtonId::Blue => "Blue",
            ButtonId::Joystick => "Joystick",
        }
    }

    /// GPIO number the button is wired to.
    pub const fn pin(self) -> u8 {
        match self {
            ButtonId::Red => pins::BTN_RED,
            ButtonId::Yellow => pins::BTN_YELLOW,
            ButtonId::Green => pins::BTN_GREEN,
            ButtonId::Blue => pins::BTN_BLUE,
            ButtonId::Joystick => pins::BTN_JOYSTICK,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::ActiveHigh
    }
}

impl core::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
