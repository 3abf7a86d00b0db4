// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RGBA colors, hex parsing, and the filter-color blender.
//!
//! The blender averages channels arithmetically. That is not perceptual and
//! not alpha compositing; it is kept as-is so multi-filter halos match the
//! reference renderings.

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use core::fmt;

/// A straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns this color with its alpha replaced.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Returns this color with its alpha multiplied by `factor` (clamped to
    /// `[0, 1]`).
    #[must_use]
    pub fn scale_alpha(self, factor: f64) -> Self {
        self.with_alpha(unit_to_u8(f64::from(self.a) / 255.0 * factor))
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.trim().strip_prefix('#').unwrap_or_else(|| s.trim());
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit);
        }
        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_nibble(bytes[0]);
                let g = hex_nibble(bytes[1]);
                let b = hex_nibble(bytes[2]);
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::rgb(
                hex_pair(bytes[0], bytes[1]),
                hex_pair(bytes[2], bytes[3]),
                hex_pair(bytes[4], bytes[5]),
            )),
            8 => Ok(Self::rgba(
                hex_pair(bytes[0], bytes[1]),
                hex_pair(bytes[2], bytes[3]),
                hex_pair(bytes[4], bytes[5]),
                hex_pair(bytes[6], bytes[7]),
            )),
            n => Err(ParseColorError::InvalidLength(n)),
        }
    }

    /// Encodes as `#RRGGBB`, dropping alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation of all four channels.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            channel_from_f64(v)
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Why a hex color string was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string contained a character that is not a hex digit.
    InvalidDigit,
    /// The number of hex digits was not 3, 6 or 8.
    InvalidLength(usize),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDigit => f.write_str("color contains a non-hex digit"),
            Self::InvalidLength(n) => write!(f, "expected 3, 6 or 8 hex digits, found {n}"),
        }
    }
}

impl core::error::Error for ParseColorError {}

/// Blends highlight colors into one.
///
/// Empty input yields white, a single color is returned unchanged, and
/// anything more is the rounded per-channel arithmetic mean, clamped to
/// `[0, 255]`. The result is opaque.
#[must_use]
pub fn blend(colors: &[Color]) -> Color {
    match colors {
        [] => Color::WHITE,
        [only] => *only,
        many => {
            let (mut r, mut g, mut b) = (0_u32, 0_u32, 0_u32);
            for c in many {
                r += u32::from(c.r);
                g += u32::from(c.g);
                b += u32::from(c.b);
            }
            let n = many.len() as f64;
            Color::rgb(
                channel_from_f64(f64::from(r) / n),
                channel_from_f64(f64::from(g) / n),
                channel_from_f64(f64::from(b) / n),
            )
        }
    }
}

/// Blends hex color strings, keeping string parity with [`blend`].
///
/// A single entry is returned verbatim. Entries that fail to parse are
/// skipped; if none parse, the result is white.
#[must_use]
pub fn blend_hex<S: AsRef<str>>(colors: &[S]) -> String {
    match colors {
        [] => Color::WHITE.to_hex(),
        [only] => only.as_ref().to_owned(),
        many => {
            let parsed: alloc::vec::Vec<Color> = many
                .iter()
                .filter_map(|s| Color::from_hex(s.as_ref()).ok())
                .collect();
            blend(&parsed).to_hex()
        }
    }
}

/// Rounds and clamps a channel value.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and clamped to 0..=255 first"
)]
pub(crate) fn channel_from_f64(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    libm::round(v).clamp(0.0, 255.0) as u8
}

/// Maps a unit value in `[0, 1]` to a channel.
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    channel_from_f64(v * 255.0)
}

fn hex_nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

fn hex_pair(hi: u8, lo: u8) -> u8 {
    hex_nibble(hi) * 16 + hex_nibble(lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!(Color::from_hex("#fff"), Ok(Color::WHITE));
        assert_eq!(Color::from_hex("#FF8000"), Ok(Color::rgb(255, 128, 0)));
        assert_eq!(Color::from_hex("00ff0080"), Ok(Color::rgba(0, 255, 0, 128)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            Color::from_hex("#12345"),
            Err(ParseColorError::InvalidLength(5))
        );
        assert_eq!(Color::from_hex("#gg0000"), Err(ParseColorError::InvalidDigit));
    }

    #[test]
    fn hex_encoding_is_uppercase() {
        assert_eq!(Color::rgb(171, 205, 239).to_hex(), "#ABCDEF");
    }

    #[test]
    fn blend_empty_is_white() {
        assert_eq!(blend(&[]), Color::WHITE);
        assert_eq!(blend_hex::<&str>(&[]), "#FFFFFF");
    }

    #[test]
    fn blend_single_is_identity() {
        let c = Color::rgba(12, 34, 56, 78);
        assert_eq!(blend(&[c]), c);
        assert_eq!(blend_hex(&["#FF0000"]), "#FF0000");
    }

    #[test]
    fn blend_red_and_blue_is_channel_mean() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        // 127.5 rounds to 128.
        assert_eq!(blend(&[red, blue]), Color::rgb(128, 0, 128));
        assert_eq!(blend_hex(&["#FF0000", "#0000FF"]), "#800080");
    }

    #[test]
    fn blend_is_not_screen_compositing() {
        let colors = vec![Color::rgb(255, 255, 0), Color::rgb(0, 255, 255)];
        // Screen would saturate green and raise both others; mean does not.
        assert_eq!(blend(&colors), Color::rgb(128, 255, 128));
    }

    #[test]
    fn blend_hex_skips_unparseable_entries() {
        assert_eq!(blend_hex(&["#FF0000", "nope", "#FF0000"]), "#FF0000");
        assert_eq!(blend_hex(&["nope", "also nope"]), "#FFFFFF");
    }

    #[test]
    fn lerp_endpoints() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(128, 128, 128));
    }
}
