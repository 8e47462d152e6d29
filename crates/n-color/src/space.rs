// SPDX-License-Identifier: MIT
//
// RGB ↔ HSL conversion.
//
// Both directions are closed-form and trigonometry-free. `rgb_to_hsl`
// returns exact coordinates (hue in degrees, saturation and lightness in
// percent) so that feeding them straight back through `hsl_to_rgb`
// reproduces the original channels. Text output wants whole numbers, so
// `Hsl::rounded` is the single place where rounding happens.
//
// Pipeline:
//
//   (r, g, b) u8 ──rgb_to_hsl──▶ Hsl { h°, s%, l% } ──rounded──▶ (u16, u8, u8)
//        ▲                              │
//        └────────hsl_to_rgb────────────┘
#![allow(clippy::many_single_char_names)]

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in HSL coordinates.
///
/// - `h`: hue angle in degrees, `[0, 360)` when produced by [`rgb_to_hsl`]
/// - `s`: saturation in percent, `[0, 100]`
/// - `l`: lightness in percent, `[0, 100]`
///
/// Values are unrounded. Use [`Hsl::rounded`] for the integer triple that
/// CSS text output prints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Create an HSL triple (degrees, percent, percent).
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Round to whole degrees and whole percents.
    ///
    /// Hue is reported in `[0, 360)`: a hue that rounds up to 360 wraps to 0.
    /// Saturation and lightness are held in `[0, 100]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded(self) -> (u16, u8, u8) {
        // Safe: rem_euclid yields 0..360 and the clamps bound s, l to 0..=100.
        let h = (self.h.round() as i64).rem_euclid(360) as u16;
        let s = self.s.round().clamp(0.0, 100.0) as u8;
        let l = self.l.round().clamp(0.0, 100.0) as u8;
        (h, s, l)
    }

    /// Convert back to 8-bit sRGB channels.
    #[inline]
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        hsl_to_rgb(self.h, self.s, self.l)
    }
}

// ─── RGB → HSL ───────────────────────────────────────────────────────────────

/// Convert 8-bit channels to HSL.
///
/// Achromatic input (all channels equal) has hue and saturation 0. For
/// chromatic input the hue sector is chosen by the largest channel, with
/// a full turn added to the red sector when green is below blue so the
/// result stays non-negative.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    // Exact comparison: the inputs are k/255 for integer k, so equal
    // channels produce bit-identical floats.
    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(sector * 60.0, s * 100.0, l * 100.0)
}

// ─── HSL → RGB ───────────────────────────────────────────────────────────────

/// Convert HSL (hue in degrees, saturation and lightness in percent) to
/// 8-bit channels.
///
/// Uses the sector-free form `f(n) = l - a * max(-1, min(k - 3, 9 - k, 1))`
/// with `k = (n + h / 30) mod 12` and `a = s * min(l, 1 - l)`, sampled at
/// `n = 0, 8, 4` for red, green and blue. Any hue is accepted and wraps
/// around the circle. Results are rounded to the nearest integer and
/// clamped to `0..=255`, so saturation or lightness outside `[0, 100]`
/// still yields a valid color.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let s = s / 100.0;
    let l = l / 100.0;
    let a = s * l.min(1.0 - l);

    let f = |n: f64| {
        let k = (n + h / 30.0).rem_euclid(12.0);
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };

    (to_channel(f(0.0)), to_channel(f(8.0)), to_channel(f(4.0)))
}

/// Scale a unit value to a channel, rounding half away from zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    // NaN (from a NaN hue) saturates to 0.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
