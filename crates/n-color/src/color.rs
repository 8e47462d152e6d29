// SPDX-License-Identifier: MIT
//
// n-color Color value — four numbers and the invariants that hold them.
//
// A `Color` is three 8-bit sRGB channels plus an opacity in [0.0, 1.0].
// The channel range is enforced by the type (`u8`); the alpha range is
// enforced by every constructor, which clamps instead of rejecting. Once
// built, a `Color` never changes: every operation in this crate reads it
// and produces something new (a string, a tuple, an escape sequence).
//
// Single-character names (r, g, b, h, s, l, a) are the standard notation
// in color math and are kept throughout.
#![allow(clippy::many_single_char_names)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::space::{self, Hsl};
use crate::spec::StructuredSpec;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An immutable sRGB color with alpha.
///
/// Channels are `0..=255`; alpha is `0.0..=1.0`. Construction clamps any
/// out-of-range input into those bounds, so a `Color` is valid by
/// construction and can be rendered without further checks.
///
/// # Examples
///
/// ```
/// use n_color::Color;
///
/// let teal = Color::opaque(0, 128, 128);
/// assert_eq!(teal.hex(), "#008080");
///
/// // Alpha is clamped, never rejected.
/// let solid = Color::new(10, 20, 30, 5.0);
/// assert_eq!(solid.alpha(), 1.0);
///
/// // Unrecognized specs fall back to opaque black.
/// assert_eq!(Color::parse("not-a-color"), Color::BLACK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StructuredSpec")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    #[serde(rename = "a")]
    alpha: f64,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Opaque black, `(0, 0, 0, 1.0)`. This is also the parser's fallback.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Create an opaque color from 8-bit channels.
    #[inline]
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Create a color from 8-bit channels and an alpha, clamped to `[0, 1]`.
    ///
    /// A NaN alpha is treated as fully opaque.
    #[inline]
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: clamp_alpha(alpha),
        }
    }

    /// Create a color from wide integer channels, clamping each to `0..=255`.
    ///
    /// This is the entry point for structured input, where numbers arrive
    /// from an untyped source and may be negative or far too large.
    #[must_use]
    pub fn clamped(r: i32, g: i32, b: i32, alpha: f64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b), alpha)
    }

    /// Create an opaque color from HSL: hue in degrees, saturation and
    /// lightness in percent.
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let (r, g, b) = space::hsl_to_rgb(h, s, l);
        Self::opaque(r, g, b)
    }

    /// Create a color from HSL plus alpha (clamped to `[0, 1]`).
    #[must_use]
    pub fn from_hsla(h: f64, s: f64, l: f64, alpha: f64) -> Self {
        Self::from_hsl(h, s, l).with_alpha(alpha)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Red channel.
    #[inline]
    #[must_use]
    pub const fn r(self) -> u8 {
        self.r
    }

    /// Green channel.
    #[inline]
    #[must_use]
    pub const fn g(self) -> u8 {
        self.g
    }

    /// Blue channel.
    #[inline]
    #[must_use]
    pub const fn b(self) -> u8 {
        self.b
    }

    /// Opacity, always within `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub const fn alpha(self) -> f64 {
        self.alpha
    }

    /// The three channels as a tuple.
    #[inline]
    #[must_use]
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// The unrounded HSL coordinates of this color's channels.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        space::rgb_to_hsl(self.r, self.g, self.b)
    }

    // ─── Alpha ───────────────────────────────────────────────────────────

    /// Return a copy with the given alpha, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: clamp_alpha(alpha),
            ..self
        }
    }

    /// Whether alpha is exactly `1.0`.
    ///
    /// The comparison is exact on purpose: `css()` switches from hex to
    /// `rgba(...)` for any alpha that is not precisely one.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_opaque(self) -> bool {
        self.alpha == 1.0
    }
}

impl Default for Color {
    /// Default is opaque black, the same value the parser falls back to.
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    /// Renders the CSS shorthand: `#rrggbb` when opaque, `rgba(...)` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::opaque(r, g, b)
    }
}

// ─── Clamping ────────────────────────────────────────────────────────────────

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_channel(v: i32) -> u8 {
    // Safe: clamp guarantees 0 <= v <= 255 before the cast.
    v.clamp(0, 255) as u8
}

#[inline]
pub(crate) fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        1.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Construction ────────────────────────────────────────────────────

    #[test]
    fn opaque_has_full_alpha() {
        let c = Color::opaque(1, 2, 3);
        assert_eq!(c.to_rgb8(), (1, 2, 3));
        assert!(c.is_opaque());
    }

    #[test]
    fn default_is_opaque_black() {
        let c = Color::default();
        assert_eq!(c, Color::BLACK);
        assert_eq!(c.to_rgb8(), (0, 0, 0));
        assert!((c.alpha() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_clamps_alpha_high() {
        assert!((Color::new(0, 0, 0, 5.0).alpha() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_clamps_alpha_low() {
        assert!(Color::new(0, 0, 0, -0.5).alpha().abs() < f64::EPSILON);
    }

    #[test]
    fn new_nan_alpha_is_opaque() {
        assert!(Color::new(0, 0, 0, f64::NAN).is_opaque());
    }

    #[test]
    fn clamped_channels() {
        let c = Color::clamped(-20, 300, 128, 1.0);
        assert_eq!(c.to_rgb8(), (0, 255, 128));
    }

    #[test]
    fn clamped_extremes() {
        let c = Color::clamped(i32::MIN, i32::MAX, 0, 0.25);
        assert_eq!(c.to_rgb8(), (0, 255, 0));
        assert!((c.alpha() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn from_hsl_pure_green() {
        assert_eq!(Color::from_hsl(120.0, 100.0, 50.0).to_rgb8(), (0, 255, 0));
    }

    #[test]
    fn from_hsla_clamps_alpha() {
        let c = Color::from_hsla(0.0, 100.0, 50.0, 2.0);
        assert_eq!(c.to_rgb8(), (255, 0, 0));
        assert!(c.is_opaque());
    }

    // ── Alpha ───────────────────────────────────────────────────────────

    #[test]
    fn with_alpha_keeps_channels() {
        let c = Color::opaque(9, 8, 7).with_alpha(0.5);
        assert_eq!(c.to_rgb8(), (9, 8, 7));
        assert!(!c.is_opaque());
    }

    #[test]
    fn nearly_one_is_not_opaque() {
        assert!(!Color::new(0, 0, 0, 0.999_999).is_opaque());
    }

    // ── Equality & Display ──────────────────────────────────────────────

    #[test]
    fn equal_fields_are_equal() {
        assert_eq!(Color::new(1, 2, 3, 0.5), Color::new(1, 2, 3, 0.5));
        assert_ne!(Color::new(1, 2, 3, 0.5), Color::opaque(1, 2, 3));
    }

    #[test]
    fn display_uses_css_shorthand() {
        assert_eq!(Color::opaque(10, 20, 30).to_string(), "#0a141e");
        assert_eq!(
            Color::new(10, 20, 30, 0.5).to_string(),
            "rgba(10, 20, 30, 0.5)"
        );
    }

    #[test]
    fn from_tuple() {
        assert_eq!(Color::from((255, 0, 0)), Color::opaque(255, 0, 0));
    }

    #[test]
    fn color_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<Color>();
    }

    // ── Serde ───────────────────────────────────────────────────────────

    #[test]
    fn serializes_as_rgba_object() {
        let json = serde_json::to_value(Color::new(1, 2, 3, 0.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "r": 1, "g": 2, "b": 3, "a": 0.5 }));
    }

    #[test]
    fn deserializes_through_parser() {
        let c: Color = serde_json::from_str(r#"{ "r": 999, "g": -1, "b": 7, "a": 3 }"#).unwrap();
        assert_eq!(c, Color::opaque(255, 0, 7));
    }

    #[test]
    fn serde_roundtrip() {
        let original = Color::new(200, 100, 50, 0.25);
        let text = serde_json::to_string(&original).unwrap();
        let back: Color = serde_json::from_str(&text).unwrap();
        assert_eq!(back, original);
    }
}
