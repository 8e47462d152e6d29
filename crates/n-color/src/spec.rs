// SPDX-License-Identifier: MIT
//
// Spec parser — every way a caller can describe a color.
//
// Two input shapes:
//
//   Text        "red", "  BLUE ", "#abc", "#0a141e"
//   Structured  { r, g, b, a? } or { h, s, l, a? }, usually from JSON
//
// Text is ASCII-lowercased, trimmed, looked up in a small table of named
// colors, and then read as a `#` hex literal (3 or 6 digits). Structured
// input is classified by key presence: the r/g/b triple wins over h/s/l
// when both are present, and a record with neither is `Unrecognized`.
//
// Failure policy: the lenient `parse` never fails. Anything it cannot read
// becomes opaque black, `Color::BLACK`, and a debug record is logged. The
// strict `try_parse` (and `str::parse::<Color>`) reports the same cases as
// a `ColorError` instead.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::color::Color;
use crate::error::ColorError;

// ─── Named Colors ────────────────────────────────────────────────────────────

/// Color names accepted by the text parser, with the hex literal each one
/// stands for. Lookup happens after lowercasing and trimming.
pub const NAMED_COLORS: [(&str, &str); 8] = [
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("green", "#00ff00"),
    ("yellow", "#ffff00"),
    ("orange", "#ffa500"),
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("gray", "#808080"),
];

/// Look up the hex literal for a lowercase color name.
#[must_use]
pub fn named(name: &str) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| *hex)
}

// ─── ColorSpec ───────────────────────────────────────────────────────────────

/// Anything the parser accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpec<'a> {
    /// A color name or `#` hex literal.
    Text(&'a str),
    /// An already-classified structured record.
    Structured(StructuredSpec),
}

impl<'a> From<&'a str> for ColorSpec<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for ColorSpec<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl From<StructuredSpec> for ColorSpec<'_> {
    fn from(spec: StructuredSpec) -> Self {
        Self::Structured(spec)
    }
}

// ─── StructuredSpec ──────────────────────────────────────────────────────────

/// A structured color record, classified by which keys it carries.
///
/// Numbers arrive from untyped sources (JSON, a scripting host), so the
/// channel fields are wide signed integers and `a` is kept raw. Clamping
/// happens when the record is turned into a [`Color`].
///
/// Deserializes from any JSON object:
///
/// ```
/// use n_color::StructuredSpec;
///
/// let spec: StructuredSpec = serde_json::from_str(r#"{ "h": 120, "s": 100, "l": 50 }"#).unwrap();
/// assert_eq!(spec, StructuredSpec::hsl(120, 100, 50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub enum StructuredSpec {
    /// `{ r, g, b, a? }` — channels clamp to `0..=255`.
    Rgb {
        r: i32,
        g: i32,
        b: i32,
        a: Option<f64>,
    },
    /// `{ h, s, l, a? }` — hue in degrees, saturation and lightness in percent.
    Hsl {
        h: i32,
        s: i32,
        l: i32,
        a: Option<f64>,
    },
    /// Neither key triple is present.
    Unrecognized,
}

impl StructuredSpec {
    /// An opaque RGB record.
    #[inline]
    #[must_use]
    pub const fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self::Rgb { r, g, b, a: None }
    }

    /// An RGB record with alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: i32, g: i32, b: i32, a: f64) -> Self {
        Self::Rgb { r, g, b, a: Some(a) }
    }

    /// An opaque HSL record.
    #[inline]
    #[must_use]
    pub const fn hsl(h: i32, s: i32, l: i32) -> Self {
        Self::Hsl { h, s, l, a: None }
    }

    /// An HSL record with alpha.
    #[inline]
    #[must_use]
    pub const fn hsla(h: i32, s: i32, l: i32, a: f64) -> Self {
        Self::Hsl { h, s, l, a: Some(a) }
    }

    /// Classify a JSON object by key presence.
    ///
    /// The r/g/b triple is checked first, then h/s/l. Other keys are ignored.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let has = |keys: [&str; 3]| keys.iter().all(|k| object.contains_key(*k));
        let field = |key: &str| object.get(key).map_or(0, |v| to_int(to_number(v)));
        let alpha = object.get("a").map(to_number);

        if has(["r", "g", "b"]) {
            Self::Rgb {
                r: field("r"),
                g: field("g"),
                b: field("b"),
                a: alpha,
            }
        } else if has(["h", "s", "l"]) {
            Self::Hsl {
                h: field("h"),
                s: field("s"),
                l: field("l"),
                a: alpha,
            }
        } else {
            Self::Unrecognized
        }
    }

    /// Classify any JSON value. Non-objects are `Unrecognized`.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        value
            .as_object()
            .map_or(Self::Unrecognized, Self::from_object)
    }

    /// Parse JSON text into a structured spec.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Json`] if the text is not valid JSON and
    /// [`ColorError::NotAnObject`] if it is valid JSON of another type.
    pub fn from_json_str(text: &str) -> Result<Self, ColorError> {
        let value: Value = serde_json::from_str(text)?;
        if value.is_object() {
            Ok(Self::from_json(&value))
        } else {
            Err(ColorError::NotAnObject)
        }
    }

    /// Build the color this record describes, or `None` if `Unrecognized`.
    #[must_use]
    pub fn to_color(self) -> Option<Color> {
        match self {
            Self::Rgb { r, g, b, a } => Some(Color::clamped(r, g, b, a.unwrap_or(1.0))),
            Self::Hsl { h, s, l, a } => Some(Color::from_hsla(
                f64::from(h),
                f64::from(s),
                f64::from(l),
                a.unwrap_or(1.0),
            )),
            Self::Unrecognized => None,
        }
    }
}

impl From<Map<String, Value>> for StructuredSpec {
    fn from(object: Map<String, Value>) -> Self {
        Self::from_object(&object)
    }
}

impl From<StructuredSpec> for Color {
    /// Unrecognized records become the default color.
    fn from(spec: StructuredSpec) -> Self {
        spec.to_color().unwrap_or_default()
    }
}

/// Loose number coercion for untyped field values.
///
/// Numbers pass through, booleans are 0 or 1, `null` and blank strings are
/// 0, numeric strings are parsed, and everything else is NaN.
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Truncate toward zero. NaN becomes 0; out-of-range values saturate.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn to_int(v: f64) -> i32 {
    v as i32
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a color spec, falling back to opaque black.
///
/// This is the forgiving entry point: unknown names, malformed hex
/// literals, empty strings and unrecognized records all produce
/// [`Color::BLACK`]. Callers that need to tell "black" from "could not
/// parse" should use [`try_parse`].
///
/// ```
/// use n_color::{parse, StructuredSpec};
///
/// assert_eq!(parse("RED").hex(), "#ff0000");
/// assert_eq!(parse("#abc").hex(), "#aabbcc");
/// assert_eq!(parse(StructuredSpec::rgba(10, 20, 30, 0.5)).css(), "rgba(10, 20, 30, 0.5)");
/// assert_eq!(parse("not-a-color").hex(), "#000000");
/// ```
#[must_use]
pub fn parse<'a>(spec: impl Into<ColorSpec<'a>>) -> Color {
    let spec = spec.into();
    resolve(spec).unwrap_or_else(|| {
        log::debug!("[spec] unrecognized color spec {spec:?}, falling back to black");
        Color::BLACK
    })
}

/// Parse a color spec, reporting anything unreadable as an error.
///
/// # Errors
///
/// Returns [`ColorError::InvalidSpec`] for text that is neither a known
/// name nor a 3- or 6-digit hex literal, and [`ColorError::UnsupportedShape`]
/// for a structured record with neither key triple.
pub fn try_parse<'a>(spec: impl Into<ColorSpec<'a>>) -> Result<Color, ColorError> {
    let spec = spec.into();
    resolve(spec).ok_or_else(|| match spec {
        ColorSpec::Text(text) => ColorError::invalid_spec(text),
        ColorSpec::Structured(_) => ColorError::UnsupportedShape,
    })
}

fn resolve(spec: ColorSpec<'_>) -> Option<Color> {
    match spec {
        ColorSpec::Text(text) => parse_text(text),
        ColorSpec::Structured(structured) => {
            log::trace!("[spec] structured {structured:?}");
            structured.to_color()
        }
    }
}

impl Color {
    /// Lenient parse. See [`parse`].
    #[must_use]
    pub fn parse<'a>(spec: impl Into<ColorSpec<'a>>) -> Self {
        parse(spec)
    }

    /// Strict parse. See [`try_parse`].
    ///
    /// # Errors
    ///
    /// Same as [`try_parse`].
    pub fn try_parse<'a>(spec: impl Into<ColorSpec<'a>>) -> Result<Self, ColorError> {
        try_parse(spec)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Strict text parse: unknown or malformed input is an error, not black.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse(s)
    }
}

// ─── Text ────────────────────────────────────────────────────────────────────

const WHITESPACE: [char; 4] = [' ', '\n', '\r', '\t'];

fn parse_text(input: &str) -> Option<Color> {
    let folded = input.to_ascii_lowercase();
    let value = folded.trim_matches(WHITESPACE);

    let literal = named(value).unwrap_or(value);
    if literal != value {
        log::trace!("[spec] named color {value:?} -> {literal}");
    }

    parse_hex(literal.strip_prefix('#')?)
}

/// Parse the digits of a hex literal (without `#`). Only `rgb` and
/// `rrggbb` are accepted; any other length or digit is rejected whole.
fn parse_hex(s: &str) -> Option<Color> {
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::opaque((r << 4) | r, (g << 4) | g, (b << 4) | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::opaque(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some((hi << 4) | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn structured(value: &Value) -> Color {
        parse(StructuredSpec::from_json(value))
    }

    // ── Named Colors ────────────────────────────────────────────────────

    #[test]
    fn named_red() {
        assert_eq!(parse("red").hex(), "#ff0000");
    }

    #[test]
    fn named_is_case_insensitive() {
        assert_eq!(parse("RED").hex(), "#ff0000");
        assert_eq!(parse("Orange").hex(), "#ffa500");
    }

    #[test]
    fn named_is_trimmed() {
        assert_eq!(parse("  blue ").hex(), "#0000ff");
        assert_eq!(parse("\tgray\r\n").hex(), "#808080");
    }

    #[test]
    fn every_named_color_resolves() {
        for (name, hex) in NAMED_COLORS {
            assert_eq!(parse(name).hex(), hex, "{name}");
            assert!(try_parse(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn unknown_name_is_not_named() {
        assert_eq!(named("purple"), None);
        assert_eq!(named("red"), Some("#ff0000"));
    }

    // ── Hex Literals ────────────────────────────────────────────────────

    #[test]
    fn short_hex_doubles_each_digit() {
        assert_eq!(parse("#abc").hex(), "#aabbcc");
        assert_eq!(parse("#f80").to_rgb8(), (255, 136, 0));
    }

    #[test]
    fn long_hex() {
        assert_eq!(parse("#0a141e").to_rgb8(), (10, 20, 30));
    }

    #[test]
    fn uppercase_hex() {
        assert_eq!(parse("#FFA500").to_rgb8(), (255, 165, 0));
    }

    #[test]
    fn hex_is_trimmed() {
        assert_eq!(parse("  #00ff00\n").to_rgb8(), (0, 255, 0));
    }

    #[test]
    fn text_specs_are_opaque() {
        assert!(parse("#123456").is_opaque());
        assert!(parse("white").is_opaque());
    }

    // ── Fallback ────────────────────────────────────────────────────────

    #[test]
    fn unknown_text_falls_back_to_black() {
        assert_eq!(parse("not-a-color").hex(), "#000000");
        assert_eq!(parse("not-a-color"), Color::BLACK);
    }

    #[test]
    fn empty_and_blank_fall_back() {
        assert_eq!(parse(""), Color::BLACK);
        assert_eq!(parse("   "), Color::BLACK);
        assert_eq!(parse("#"), Color::BLACK);
    }

    #[test]
    fn malformed_hex_falls_back_whole() {
        assert_eq!(parse("#12345"), Color::BLACK);
        assert_eq!(parse("#1234567"), Color::BLACK);
        assert_eq!(parse("#ggg"), Color::BLACK);
        assert_eq!(parse("#12zz56"), Color::BLACK);
        assert_eq!(parse("#ffff"), Color::BLACK);
    }

    #[test]
    fn hex_without_hash_is_rejected() {
        assert_eq!(parse("ff0000"), Color::BLACK);
    }

    #[test]
    fn non_ascii_is_rejected() {
        assert_eq!(parse("#é1"), Color::BLACK);
        assert_eq!(parse("rød"), Color::BLACK);
    }

    // ── Strict ──────────────────────────────────────────────────────────

    #[test]
    fn strict_accepts_valid_text() {
        assert_eq!(try_parse("#abc").unwrap(), Color::opaque(0xaa, 0xbb, 0xcc));
        assert_eq!("yellow".parse::<Color>().unwrap(), Color::opaque(255, 255, 0));
    }

    #[test]
    fn strict_rejects_unknown_text() {
        let err = try_parse("not-a-color").unwrap_err();
        assert!(matches!(err, ColorError::InvalidSpec { ref spec } if spec == "not-a-color"));
    }

    #[test]
    fn strict_from_str_rejects_malformed_hex() {
        assert!("#12345".parse::<Color>().is_err());
    }

    #[test]
    fn strict_accepts_black_by_name() {
        // Black is a real answer here, not the fallback.
        assert_eq!(try_parse("black").unwrap(), Color::BLACK);
    }

    #[test]
    fn strict_rejects_unrecognized_record() {
        let err = try_parse(StructuredSpec::Unrecognized).unwrap_err();
        assert!(matches!(err, ColorError::UnsupportedShape));
    }

    #[test]
    fn color_inherent_parsers_delegate() {
        assert_eq!(Color::parse("blue"), parse("blue"));
        assert!(Color::try_parse("nope").is_err());
    }

    // ── Structured RGB ──────────────────────────────────────────────────

    #[test]
    fn structured_rgb() {
        let c = parse(StructuredSpec::rgb(255, 0, 0));
        assert_eq!(c.to_rgb8(), (255, 0, 0));
        assert!(c.is_opaque());
    }

    #[test]
    fn structured_rgb_clamps_channels() {
        assert_eq!(parse(StructuredSpec::rgb(-5, 300, 128)).to_rgb8(), (0, 255, 128));
    }

    #[test]
    fn structured_alpha_clamps() {
        assert_eq!(
            parse(StructuredSpec::rgba(0, 0, 0, 5.0)).rgba(),
            "rgba(0, 0, 0, 1)"
        );
        assert_eq!(
            parse(StructuredSpec::rgba(0, 0, 0, -1.0)).rgba(),
            "rgba(0, 0, 0, 0)"
        );
    }

    #[test]
    fn structured_alpha_defaults_to_opaque() {
        assert_eq!(parse(StructuredSpec::rgb(10, 20, 30)).css(), "#0a141e");
        assert_eq!(
            parse(StructuredSpec::rgba(10, 20, 30, 0.5)).css(),
            "rgba(10, 20, 30, 0.5)"
        );
    }

    // ── Structured HSL ──────────────────────────────────────────────────

    #[test]
    fn structured_hsl() {
        assert_eq!(parse(StructuredSpec::hsl(120, 100, 50)).to_rgb8(), (0, 255, 0));
    }

    #[test]
    fn structured_hsla_keeps_alpha() {
        let c = parse(StructuredSpec::hsla(240, 100, 50, 0.25));
        assert_eq!(c.rgba(), "rgba(0, 0, 255, 0.25)");
    }

    #[test]
    fn structured_hsl_hue_is_not_clamped() {
        assert_eq!(
            parse(StructuredSpec::hsl(480, 100, 50)),
            parse(StructuredSpec::hsl(120, 100, 50))
        );
    }

    // ── JSON ────────────────────────────────────────────────────────────

    #[test]
    fn json_rgb_object() {
        let c = structured(&json!({ "r": 10, "g": 20, "b": 30, "a": 0.5 }));
        assert_eq!(c.css(), "rgba(10, 20, 30, 0.5)");
    }

    #[test]
    fn json_rgb_wins_over_hsl() {
        let c = structured(&json!({ "r": 255, "g": 0, "b": 0, "h": 240, "s": 100, "l": 50 }));
        assert_eq!(c.hex(), "#ff0000");
    }

    #[test]
    fn json_hsl_object() {
        let spec = StructuredSpec::from_json(&json!({ "h": 0, "s": 100, "l": 50 }));
        assert_eq!(spec, StructuredSpec::hsl(0, 100, 50));
    }

    #[test]
    fn json_partial_triples_are_unrecognized() {
        let spec = StructuredSpec::from_json(&json!({ "r": 1, "g": 2, "l": 3, "a": 0.5 }));
        assert_eq!(spec, StructuredSpec::Unrecognized);
        assert_eq!(parse(spec), Color::BLACK);
    }

    #[test]
    fn json_non_object_is_unrecognized() {
        assert_eq!(StructuredSpec::from_json(&json!([1, 2, 3])), StructuredSpec::Unrecognized);
        assert_eq!(StructuredSpec::from_json(&json!("red")), StructuredSpec::Unrecognized);
    }

    #[test]
    fn json_fractional_channels_truncate() {
        assert_eq!(structured(&json!({ "r": 10.9, "g": -0.5, "b": 254.99 })).to_rgb8(), (10, 0, 254));
    }

    #[test]
    fn json_loose_values_coerce() {
        let c = structured(&json!({ "r": "128", "g": true, "b": null }));
        assert_eq!(c.to_rgb8(), (128, 1, 0));
    }

    #[test]
    fn json_garbage_values_become_zero() {
        let c = structured(&json!({ "r": "abc", "g": [1], "b": { "x": 1 } }));
        assert_eq!(c.to_rgb8(), (0, 0, 0));
    }

    #[test]
    fn json_garbage_alpha_is_opaque() {
        assert!(structured(&json!({ "r": 1, "g": 2, "b": 3, "a": "oops" })).is_opaque());
    }

    #[test]
    fn json_huge_values_saturate_then_clamp() {
        let c = structured(&json!({ "r": 1e20, "g": -1e20, "b": 0 }));
        assert_eq!(c.to_rgb8(), (255, 0, 0));
    }

    #[test]
    fn json_text_entry_point() {
        let spec = StructuredSpec::from_json_str(r#"{ "r": 0, "g": 0, "b": 0, "a": 5 }"#).unwrap();
        assert_eq!(parse(spec).rgba(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn json_text_rejects_invalid_json() {
        assert!(matches!(
            StructuredSpec::from_json_str("{ r: 1 }").unwrap_err(),
            ColorError::Json(_)
        ));
    }

    #[test]
    fn json_text_rejects_non_objects() {
        assert!(matches!(
            StructuredSpec::from_json_str("[255, 0, 0]").unwrap_err(),
            ColorError::NotAnObject
        ));
    }

    #[test]
    fn deserialize_structured_spec() {
        let spec: StructuredSpec = serde_json::from_str(r#"{ "r": 1, "g": 2, "b": 3, "extra": true }"#).unwrap();
        assert_eq!(spec, StructuredSpec::rgb(1, 2, 3));
    }
}
