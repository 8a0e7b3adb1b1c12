//! Colors and the cat palette.

/// RGBA color with f64 components (0.0 to 1.0 range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Create from a packed `0xRRGGBB` value.
    pub fn from_hex(rgb: u32) -> Self {
        Self::from_rgb8([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    /// Create from 8-bit RGB.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f64 / 255.0,
            g: rgb[1] as f64 / 255.0,
            b: rgb[2] as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Composite `self` over `dst` (straight alpha).
    pub fn over(&self, dst: &Color) -> Color {
        let src = self.clamp();
        let out_a = src.a + dst.a * (1.0 - src.a);
        if out_a <= 0.0 {
            return Color::transparent();
        }
        let mix = |s: f64, d: f64| (s * src.a + d * dst.a * (1.0 - src.a)) / out_a;
        Color {
            r: mix(src.r, dst.r),
            g: mix(src.g, dst.g),
            b: mix(src.b, dst.b),
            a: out_a,
        }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// `#RRGGBB`, ignoring alpha.
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Colors for every part of the cat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub body: Color,
    /// Body highlight, and the outline of most head parts.
    pub highlight: Color,
    pub limbs: Color,
    pub paws: Color,
    pub ears: Color,
    pub tail: Color,
    pub eyes: Color,
    pub pupils: Color,
    pub nose: Color,
    pub whiskers: Color,
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            body: Color::from_hex(0x8B4513),
            highlight: Color::from_hex(0xA0522D),
            limbs: Color::from_hex(0x654321),
            paws: Color::from_hex(0x8B4513),
            ears: Color::from_hex(0x654321),
            tail: Color::from_hex(0x654321),
            eyes: Color::from_hex(0xFFD700),
            pupils: Color::from_hex(0x000000),
            nose: Color::from_hex(0xFF69B4),
            whiskers: Color::from_hex(0xFFFFFF),
            background: Color::from_hex(0x34495E),
        }
    }
}
