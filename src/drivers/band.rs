// LED band model: pixel buffer + global brightness
//
// Colours are kept at full scale; brightness is applied only when
// the band is written out, so dimming and brightening back is lossless.

/// 8-bit RGB triple; `to_u32` gives the packed 0xRRGGBB form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        convert_rgb(self.r as u32, self.g as u32, self.b as u32)
    }

    pub const fn scaled(self, brightness: u8) -> Self {
        let k = brightness as u16;
        Self {
            r: ((self.r as u16 * k) >> 8) as u8,
            g: ((self.g as u16 * k) >> 8) as u8,
            b: ((self.b as u16 * k) >> 8) as u8,
        }
    }

    /// Hue in degrees, saturation and lightness in percent (0..=99).
    pub fn from_hsl(h: u16, s: u8, l: u8) -> Self {
        let h = (h % 360) as i32;
        let s = s.min(99) as i32;
        let l = l.min(99) as i32;

        let c = (((100 - (2 * l - 100).abs()) * s) << 8) / 10_000;
        let h1 = h / 60;
        let h2 = (h - h1 * 60) * 256 / 60;
        let temp = (((h1 % 2) << 8) + h2 - 256).abs();
        let x = (c * (256 - temp)) >> 8;

        let (r, g, b) = match h1 {
            0 => (c, x, 0),
            1 => (x, c, 0),
            2 => (0, c, x),
            3 => (0, x, c),
            4 => (x, 0, c),
            _ => (c, 0, x),
        };

        let m = (((l * 2) << 8) / 100 - c) / 2;
        let clamp = |v: i32| (v + m).clamp(0, 255) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }
}

impl From<u32> for Rgb {
    fn from(rgb: u32) -> Self {
        Self::from_u32(rgb)
    }
}

/// Pack channel values into 0xRRGGBB; each channel is masked to 8 bits.
pub const fn convert_rgb(r: u32, g: u32, b: u32) -> u32 {
    ((r & 0xFF) << 16) | ((g & 0xFF) << 8) | (b & 0xFF)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0xff0000,
    Orange = 0xffa500,
    Yellow = 0xffff00,
    Green = 0x00ff00,
    Blue = 0x0000ff,
    Indigo = 0x4b0082,
    Violet = 0x8a2be2,
    Purple = 0xff00ff,
    White = 0xffffff,
    Black = 0x000000,
}

impl Color {
    pub const fn rgb(self) -> Rgb {
        Rgb::from_u32(self as u32)
    }
}

impl From<Color> for Rgb {
    fn from(c: Color) -> Self {
        c.rgb()
    }
}

/// Anything that can latch a run of pixels onto the wire.
pub trait PixelSink {
    type Error: core::fmt::Debug;

    fn write_pixels(&mut self, pixels: &[Rgb]) -> Result<(), Self::Error>;
}

pub const DEFAULT_BRIGHTNESS: u8 = 40;

pub struct Band<const N: usize> {
    pixels: [Rgb; N],
    brightness: u8,
}

impl<const N: usize> Band<N> {
    pub const fn new() -> Self {
        Self {
            pixels: [Rgb::BLACK; N],
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub fn set_all(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgb::BLACK);
    }

    /// Out-of-range indices are ignored.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = color;
        } else {
            log::debug!("band: pixel {} out of range ({})", index, N);
        }
    }

    // hue walks 1..360 across the band
    pub fn rainbow(&mut self) {
        const START: u32 = 1;
        const END: u32 = 360;
        let n = N as u32;
        for (i, p) in self.pixels.iter_mut().enumerate() {
            let hue = START + (END - START) * i as u32 / n.max(1);
            *p = Rgb::from_hsl(hue as u16, 100, 50);
        }
    }

    /// Move every pixel one step along the band; the first goes dark.
    pub fn shift(&mut self) {
        if N == 0 {
            return;
        }
        self.pixels.copy_within(0..N - 1, 1);
        self.pixels[0] = Rgb::BLACK;
    }

    /// Like shift, but the last pixel wraps to the front.
    pub fn rotate(&mut self) {
        self.pixels.rotate_right(1.min(N));
    }

    pub fn show<W: PixelSink>(&self, sink: &mut W) -> Result<(), W::Error> {
        let mut out = [Rgb::BLACK; N];
        for (o, p) in out.iter_mut().zip(self.pixels.iter()) {
            *o = p.scaled(self.brightness);
        }
        sink.write_pixels(&out)
    }
}

impl<const N: usize> Default for Band<N> {
    fn default() -> Self {
        Self::new()
    }
}
