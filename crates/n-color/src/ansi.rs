// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation for colors.
//
// Pure functions that write SGR sequences to any `impl Write`, plus
// `String`-returning conveniences on `Color` for callers that just want
// the bytes. Nothing here probes the terminal: the caller picks the
// encoding (24-bit truecolor or the 256-color palette) and the layer
// (foreground or background).
//
// The 256-color palette:
//
//   0–15     standard + bright colors (never produced here)
//   16–231   6×6×6 RGB cube, index = 16 + 36·r + 6·g + b, each in 0..=5
//   232–255  24-step grayscale ramp
//
// Writer functions return `io::Result` propagated from the underlying
// writer. Writing into a `Vec<u8>` never fails.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::color::Color;
use crate::error::ColorError;

// ─── Palette ─────────────────────────────────────────────────────────────────

/// First index of the 6×6×6 color cube.
pub const CUBE_BASE: u8 = 16;

/// First index of the grayscale ramp.
pub const GRAY_BASE: u8 = 232;

/// Quantize 8-bit channels to a 256-color palette index.
///
/// Grays (all channels equal) use the grayscale ramp, except that values
/// below 8 snap to the cube's black (16) and values above 248 snap to the
/// cube's white (231). Everything else maps each channel to a cube level
/// with `round(v / 255 × 5)`.
///
/// ```
/// use n_color::ansi::palette_index;
///
/// assert_eq!(palette_index(255, 0, 0), 196);
/// assert_eq!(palette_index(0, 0, 0), 16);
/// assert_eq!(palette_index(128, 128, 128), 244);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn palette_index(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => CUBE_BASE,
            249..=255 => 231,
            // Safe: (v - 8) / 247 * 24 is at most 24 for v <= 248.
            v => GRAY_BASE + ((f64::from(v - 8) / 247.0) * 24.0).round() as u8,
        };
    }

    CUBE_BASE + 36 * cube_level(r) + 6 * cube_level(g) + cube_level(b)
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cube_level(v: u8) -> u8 {
    // Safe: v / 255 * 5 lies in 0.0..=5.0.
    (f64::from(v) / 255.0 * 5.0).round() as u8
}

// ─── Reset ───────────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── TrueColor ───────────────────────────────────────────────────────────────

/// Set the foreground to a 24-bit color (`ESC[38;2;R;G;Bm`).
#[inline]
pub fn fg_truecolor(w: &mut impl Write, color: Color) -> io::Result<()> {
    let (r, g, b) = color.to_rgb8();
    write!(w, "\x1b[38;2;{r};{g};{b}m")
}

/// Set the background to a 24-bit color (`ESC[48;2;R;G;Bm`).
#[inline]
pub fn bg_truecolor(w: &mut impl Write, color: Color) -> io::Result<()> {
    let (r, g, b) = color.to_rgb8();
    write!(w, "\x1b[48;2;{r};{g};{b}m")
}

// ─── 256-Color Palette ───────────────────────────────────────────────────────

/// Set the foreground to a palette index (`ESC[38;5;Nm`).
///
/// Always uses the extended form, even for indices below 16.
#[inline]
pub fn fg_256(w: &mut impl Write, idx: u8) -> io::Result<()> {
    write!(w, "\x1b[38;5;{idx}m")
}

/// Set the background to a palette index (`ESC[48;5;Nm`).
#[inline]
pub fn bg_256(w: &mut impl Write, idx: u8) -> io::Result<()> {
    write!(w, "\x1b[48;5;{idx}m")
}

// ─── Style ───────────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text styles that can prefix a wrapped string.
    ///
    /// ```
    /// use n_color::Style;
    ///
    /// let style = Style::BOLD | Style::UNDERLINE;
    /// assert!(style.contains(Style::BOLD));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Style: u8 {
        /// SGR 1, increased intensity.
        const BOLD      = 1 << 0;
        /// SGR 4, underline.
        const UNDERLINE = 1 << 1;
    }
}

/// Emit one SGR sequence per style: bold first, then underline.
///
/// Sequences are never merged into a single CSI: the output is `\x1b[1m\x1b[4m` rather than `\x1b[1;4m`.
pub fn style(w: &mut impl Write, style: Style) -> io::Result<()> {
    if style.contains(Style::BOLD) {
        w.write_all(b"\x1b[1m")?;
    }
    if style.contains(Style::UNDERLINE) {
        w.write_all(b"\x1b[4m")?;
    }
    Ok(())
}

// ─── Layer & Depth ───────────────────────────────────────────────────────────

/// Which side of the glyph a color sequence paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Layer {
    /// Text color (SGR 38).
    #[default]
    Foreground,
    /// Cell background (SGR 48).
    Background,
}

/// How a color is encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ColorDepth {
    /// 24-bit RGB (`2;R;G;B`).
    #[default]
    TrueColor,
    /// Nearest 256-color palette index (`5;N`).
    Palette256,
}

impl Layer {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
        }
    }
}

impl ColorDepth {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TrueColor => "truecolor",
            Self::Palette256 => "256",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layer {
    type Err = ColorError;

    /// Accepts `foreground`/`fg` and `background`/`bg`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "foreground" | "fg" => Ok(Self::Foreground),
            "background" | "bg" => Ok(Self::Background),
            _ => Err(ColorError::unknown_name("layer", s)),
        }
    }
}

impl FromStr for ColorDepth {
    type Err = ColorError;

    /// Accepts `truecolor`/`24bit` and `256`/`palette`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" => Ok(Self::TrueColor),
            "256" | "palette" => Ok(Self::Palette256),
            _ => Err(ColorError::unknown_name("depth", s)),
        }
    }
}

/// Emit the color sequence for the given layer and encoding.
pub fn color(w: &mut impl Write, color: Color, layer: Layer, depth: ColorDepth) -> io::Result<()> {
    match (layer, depth) {
        (Layer::Foreground, ColorDepth::TrueColor) => fg_truecolor(w, color),
        (Layer::Background, ColorDepth::TrueColor) => bg_truecolor(w, color),
        (Layer::Foreground, ColorDepth::Palette256) => fg_256(w, color.ansi256_index()),
        (Layer::Background, ColorDepth::Palette256) => bg_256(w, color.ansi256_index()),
    }
}

// ─── Wrap ────────────────────────────────────────────────────────────────────

/// Options for [`write_wrapped`] and [`Color::wrap`].
///
/// The default is a truecolor foreground with no styles.
///
/// ```
/// use n_color::{ColorDepth, Layer, Style, WrapOptions};
///
/// let opts = WrapOptions::new().background().palette256().bold();
/// assert_eq!(opts.layer, Layer::Background);
/// assert_eq!(opts.depth, ColorDepth::Palette256);
/// assert_eq!(opts.style, Style::BOLD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WrapOptions {
    pub layer: Layer,
    pub depth: ColorDepth,
    pub style: Style,
}

impl WrapOptions {
    /// Truecolor foreground, no styles.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layer: Layer::Foreground,
            depth: ColorDepth::TrueColor,
            style: Style::empty(),
        }
    }

    /// Paint the background instead of the foreground.
    #[inline]
    #[must_use]
    pub const fn background(self) -> Self {
        Self {
            layer: Layer::Background,
            ..self
        }
    }

    /// Encode through the 256-color palette instead of truecolor.
    #[inline]
    #[must_use]
    pub const fn palette256(self) -> Self {
        Self {
            depth: ColorDepth::Palette256,
            ..self
        }
    }

    /// Prefix with bold.
    #[inline]
    #[must_use]
    pub const fn bold(self) -> Self {
        Self {
            style: self.style.union(Style::BOLD),
            ..self
        }
    }

    /// Prefix with underline.
    #[inline]
    #[must_use]
    pub const fn underline(self) -> Self {
        Self {
            style: self.style.union(Style::UNDERLINE),
            ..self
        }
    }
}

/// Write `text` wrapped in styles, a color sequence and a trailing reset.
///
/// Output order is fixed: bold, underline, color, text, `ESC[0m`. Nothing
/// is nested or merged, so wrapping an already-wrapped string simply
/// concatenates sequences.
pub fn write_wrapped(
    w: &mut impl Write,
    c: Color,
    text: &str,
    opts: WrapOptions,
) -> io::Result<()> {
    style(w, opts.style)?;
    color(w, c, opts.layer, opts.depth)?;
    w.write_all(text.as_bytes())?;
    reset(w)
}

// ─── Color Conveniences ──────────────────────────────────────────────────────

impl Color {
    /// The nearest 256-color palette index. See [`palette_index`].
    #[inline]
    #[must_use]
    pub fn ansi256_index(self) -> u8 {
        let (r, g, b) = self.to_rgb8();
        palette_index(r, g, b)
    }

    /// Truecolor foreground sequence.
    #[must_use]
    pub fn ansi_truecolor(self) -> String {
        render(|w| fg_truecolor(w, self))
    }

    /// Truecolor background sequence.
    #[must_use]
    pub fn ansi_truecolor_bg(self) -> String {
        render(|w| bg_truecolor(w, self))
    }

    /// 256-color foreground sequence.
    #[must_use]
    pub fn ansi256(self) -> String {
        render(|w| fg_256(w, self.ansi256_index()))
    }

    /// 256-color background sequence.
    #[must_use]
    pub fn ansi256_bg(self) -> String {
        render(|w| bg_256(w, self.ansi256_index()))
    }

    /// Wrap `text` for terminal output. See [`write_wrapped`].
    ///
    /// ```
    /// use n_color::{Color, WrapOptions};
    ///
    /// let red = Color::opaque(255, 0, 0);
    /// assert_eq!(
    ///     red.wrap("x", WrapOptions::new().bold()),
    ///     "\x1b[1m\x1b[38;2;255;0;0mx\x1b[0m"
    /// );
    /// ```
    #[must_use]
    pub fn wrap(self, text: &str, opts: WrapOptions) -> String {
        render(|w| write_wrapped(w, self, text, opts))
    }
}

/// Run a writer function against an in-memory buffer.
fn render<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut buf = Vec::new();
    // Vec<u8> writes are infallible.
    let _ = f(&mut buf);
    // Every input is UTF-8 (escape bytes are ASCII), so this never replaces.
    String::from_utf8_lossy(&buf).into_owned()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
