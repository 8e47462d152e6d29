// SPDX-License-Identifier: MIT
//
// CSS-style text output.
//
// Every function here is a pure rendering of a `Color` into one of the
// familiar stylesheet notations:
//
//   hex   #rrggbb                 (lowercase, alpha dropped)
//   rgb   rgb(R, G, B)
//   rgba  rgba(R, G, B, A)
//   hsl   hsl(H, S%, L%)          (whole degrees and percents)
//   hsla  hsla(H, S%, L%, A)
//   css   hex when fully opaque, rgba otherwise
//
// Alpha is printed in general real-number notation: up to six significant
// digits with trailing zeros removed, so 1.0 is `1`, 0.5 is `0.5` and 1/3
// is `0.333333`.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::ColorError;

// ─── Format ──────────────────────────────────────────────────────────────────

/// A text notation [`Color::format`] can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    /// Hex when opaque, rgba otherwise.
    #[default]
    Css,
}

impl Format {
    /// Every notation, in display order.
    pub const ALL: [Self; 6] = [
        Self::Hex,
        Self::Rgb,
        Self::Rgba,
        Self::Hsl,
        Self::Hsla,
        Self::Css,
    ];

    /// The lowercase name used by `FromStr` and `Display`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Hsl => "hsl",
            Self::Hsla => "hsla",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ColorError::unknown_name("format", s))
    }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

impl Color {
    /// `#rrggbb`, lowercase. Alpha is not included.
    #[must_use]
    pub fn hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `rgb(R, G, B)`.
    #[must_use]
    pub fn rgb(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("rgb({r}, {g}, {b})")
    }

    /// `rgba(R, G, B, A)`.
    #[must_use]
    pub fn rgba(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("rgba({r}, {g}, {b}, {})", format_real(self.alpha()))
    }

    /// `hsl(H, S%, L%)` with whole degrees and percents.
    #[must_use]
    pub fn hsl(self) -> String {
        let (h, s, l) = self.to_hsl().rounded();
        format!("hsl({h}, {s}%, {l}%)")
    }

    /// `hsla(H, S%, L%, A)`.
    #[must_use]
    pub fn hsla(self) -> String {
        let (h, s, l) = self.to_hsl().rounded();
        format!("hsla({h}, {s}%, {l}%, {})", format_real(self.alpha()))
    }

    /// The CSS shorthand: [`hex`](Self::hex) when alpha is exactly 1.0,
    /// [`rgba`](Self::rgba) otherwise.
    #[must_use]
    pub fn css(self) -> String {
        if self.is_opaque() {
            self.hex()
        } else {
            self.rgba()
        }
    }

    /// Render in the chosen notation.
    #[must_use]
    pub fn format(self, format: Format) -> String {
        match format {
            Format::Hex => self.hex(),
            Format::Rgb => self.rgb(),
            Format::Rgba => self.rgba(),
            Format::Hsl => self.hsl(),
            Format::Hsla => self.hsla(),
            Format::Css => self.css(),
        }
    }
}

// ─── Real Numbers ────────────────────────────────────────────────────────────

const SIGNIFICANT_DIGITS: i32 = 6;

/// Format a real number with up to six significant digits, dropping
/// trailing zeros and a trailing decimal point.
///
/// Exponents below -4 (or at six and above) switch to scientific notation
/// (`1e-05`, `1.23457e+06`), matching the usual "general" float format.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_real(v: f64) -> String {
    if v.is_nan() {
        return String::from("nan");
    }
    if v.is_infinite() {
        return String::from(if v > 0.0 { "inf" } else { "-inf" });
    }
    if v == 0.0 {
        return String::from("0");
    }

    // Scientific form with SIGNIFICANT_DIGITS - 1 fraction digits gives the
    // decimal exponent after rounding (0.9999999 → 1.00000e0).
    let sci = format!("{v:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= SIGNIFICANT_DIGITS {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.unsigned_abs())
    } else {
        let decimals = usize::try_from(SIGNIFICANT_DIGITS - 1 - exp).unwrap_or(0);
        trim_fraction(&format!("{v:.decimals$}")).to_owned()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
