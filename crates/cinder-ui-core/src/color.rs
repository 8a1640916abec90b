//! Color type used throughout the widget system.

/// An RGBA color with components in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0–1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit RGBA components.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse a markup color literal: `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// Returns `None` for anything else; malformed markup values are skipped
    /// by the loader, never raised.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        // Byte slicing below requires pure ASCII hex; anything else (including
        // multi-byte characters that happen to pad the length to 6 or 8) is
        // malformed.
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::from_rgb8(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::from_rgba8(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Return the color with its alpha multiplied by `factor`.
    ///
    /// Used for the cumulative-opacity draw pass: every primitive a widget
    /// draws is scaled by the product of its own and its ancestors' opacity.
    #[inline]
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        Self {
            a: self.a * factor.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Check if the color would draw nothing.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rgb() {
        let c = Color::from_hex("#FF8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 0.0).abs() < 1e-6);
        assert!((c.a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_hex_rgba() {
        let c = Color::from_hex("#00000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Color::from_hex("FF8000").is_none()); // missing '#'
        assert!(Color::from_hex("#F80").is_none()); // short form unsupported
        assert!(Color::from_hex("#GG0000").is_none()); // not hex
        assert!(Color::from_hex("#FF80001").is_none()); // odd length
    }

    #[test]
    fn test_from_hex_rejects_multibyte_without_panic() {
        // 'é' is two bytes, padding these to 6 and 8 bytes respectively;
        // they must parse as None, never slice mid-character
        assert!(Color::from_hex("#a\u{e9}aaa").is_none());
        assert!(Color::from_hex("#a\u{e9}aaa\u{e9}").is_none());
    }

    #[test]
    fn test_alpha_scaling() {
        let c = Color::from_rgba8(255, 255, 255, 255).with_alpha_scaled(0.5);
        assert!((c.a - 0.5).abs() < 1e-6);

        // Factor is clamped into 0..1
        let c = Color::WHITE.with_alpha_scaled(2.0);
        assert!((c.a - 1.0).abs() < 1e-6);
    }
}
