// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed 8-bit RGBA color.
//!
//! [`Rgba8`] is the color type used for material tints, fallback fills and
//! system colors. Render backends receive it unmodified; conversion into
//! whatever premultiplied or float format the compositor wants is their
//! business.

use core::fmt;

/// A color with 8-bit red, green, blue and alpha channels.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, `0` transparent through `255` opaque.
    pub a: u8,
}

impl Rgba8 {
    /// Creates a color from four channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Returns this color with its alpha replaced by `opacity` in `[0, 1]`.
    ///
    /// The opacity is clamped and rounded to the nearest 8-bit step. NaN
    /// clamps to zero.
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> Self {
        let clamped = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "clamped to [0, 255.5) before the cast"
        )]
        let a = (clamped * 255.0 + 0.5) as u8;
        Self { a, ..self }
    }
}

impl fmt::Debug for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_sets_full_alpha() {
        let c = Rgba8::opaque(252, 252, 252);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn with_opacity_rounds_to_nearest() {
        let c = Rgba8::opaque(44, 44, 44);
        assert_eq!(c.with_opacity(0.0).a, 0);
        assert_eq!(c.with_opacity(1.0).a, 255);
        assert_eq!(c.with_opacity(0.85).a, 217);
        assert_eq!(c.with_opacity(0.96).a, 245);
    }

    #[test]
    fn with_opacity_clamps_out_of_range() {
        let c = Rgba8::opaque(10, 20, 30);
        assert_eq!(c.with_opacity(-0.5).a, 0);
        assert_eq!(c.with_opacity(2.0).a, 255);
        assert_eq!(c.with_opacity(f64::NAN).a, 0);
    }

    #[test]
    fn debug_formats_as_hex() {
        use alloc::format;
        let c = Rgba8::new(26, 26, 26, 26);
        assert_eq!(format!("{c:?}"), "#1a1a1a1a");
    }
}
