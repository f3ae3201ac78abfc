//! GPIO |     Function      |      Notes
//! -----+-------------------+----------------------------------
//!  0   | ADC1 - Dial       | Potentiometer wiper
//!  1   | ADC1 - Joystick X | Centre ~1250mV
//!  2   | ADC1 - Joystick Y | Centre ~1250mV
//!  3   | Digital - JoyBtn  | Joystick press, active HIGH, no pull
//!  4   | Digital - Red     | Active HIGH, no pull
//!  5   | Digital - Yellow  | Active HIGH, no pull
//!  6   | Digital - Green   | Active HIGH, no pull
//!  7   | Digital - Blue    | Active HIGH, no pull
//! 10   | SPI2 MOSI         | WS2812 data line for the LED band

// ----- Analog (ADC1) -----
pub const DIAL_ADC: u8 = 0;
pub const JOYSTICK_X_ADC: u8 = 1;
pub const JOYSTICK_Y_ADC: u8 = 2;

// ----- Buttons -----
pub const BTN_JOYSTICK: u8 = 3;
pub const BTN_RED: u8 = 4;
pub const BTN_YELLOW: u8 = 5;
pub const BTN_GREEN: u8 = 6;
pub const BTN_BLUE: u8 = 7;

// ----- LED band -----
pub const LED_DATA: u8 = 10;
pub const LED_COUNT: usize = 6;
