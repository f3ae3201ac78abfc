// WS2812 driver over a plain SPI bus (MOSI only)
//
// At 3.2MHz one SPI bit is 312.5ns, so each WS2812 data bit is sent as
// four SPI bits: 0 -> 1000 (0.31us high), 1 -> 1110 (0.94us high).
// One colour byte becomes 4 SPI bytes. Wire order is GRB, MSB first.
// A run of zero bytes after the frame holds the line low long enough
// (>280us) to latch.

use embedded_hal::spi::SpiBus;

use super::band::{PixelSink, Rgb};

pub const SPI_FREQ_KHZ: u32 = 3200;

pub const MAX_LEDS: usize = 16;
const BYTES_PER_LED: usize = 3 * 4;
// 120 bytes * 8 bits * 312.5ns = 300us
pub const RESET_BYTES: usize = 120;
const BUF_SIZE: usize = MAX_LEDS * BYTES_PER_LED + RESET_BYTES;

const PATTERN_0: u8 = 0b1000;
const PATTERN_1: u8 = 0b1110;

/// Expand one colour byte into its 4-byte SPI pattern.
pub fn encode_byte(byte: u8) -> [u8; 4] {
    let mut out = [0u8; 4];
    for (i, o) in out.iter_mut().enumerate() {
        let hi = (byte >> (7 - 2 * i)) & 1;
        let lo = (byte >> (6 - 2 * i)) & 1;
        let nib = |bit: u8| if bit == 1 { PATTERN_1 } else { PATTERN_0 };
        *o = (nib(hi) << 4) | nib(lo);
    }
    out
}

pub struct Ws2812<SPI> {
    spi: SPI,
    buf: [u8; BUF_SIZE],
}

impl<SPI: SpiBus<u8>> Ws2812<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            buf: [0; BUF_SIZE],
        }
    }

    /// Fill the frame buffer; returns the number of bytes to send.
    fn encode(&mut self, pixels: &[Rgb]) -> usize {
        let count = pixels.len().min(MAX_LEDS);
        if pixels.len() > MAX_LEDS {
            log::warn!("ws2812: {} pixels, only {} sent", pixels.len(), MAX_LEDS);
        }

        let mut at = 0;
        for p in &pixels[..count] {
            for byte in [p.g, p.r, p.b] {
                self.buf[at..at + 4].copy_from_slice(&encode_byte(byte));
                at += 4;
            }
        }
        self.buf[at..at + RESET_BYTES].fill(0);
        at + RESET_BYTES
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus<u8>> PixelSink for Ws2812<SPI> {
    type Error = SPI::Error;

    fn write_pixels(&mut self, pixels: &[Rgb]) -> Result<(), Self::Error> {
        let len = self.encode(pixels);
        self.spi.write(&self.buf[..len])?;
        self.spi.flush()
    }
}
