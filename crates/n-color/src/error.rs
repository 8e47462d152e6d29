// SPDX-License-Identifier: MIT
//
// Errors reported by the strict parsing entry points.
//
// The lenient parser never fails (it falls back to black), so these only
// surface from `try_parse`, the `FromStr` impls and the JSON helpers.

/// Why a color spec could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    /// Text that is neither a known color name nor a 3- or 6-digit `#` hex literal.
    #[error("invalid color spec `{spec}`: expected a color name or #rgb / #rrggbb")]
    InvalidSpec { spec: String },

    /// A structured record carrying neither an r/g/b nor an h/s/l key triple.
    #[error("unsupported color record: expected keys r, g, b or h, s, l")]
    UnsupportedShape,

    /// Valid JSON that is not an object.
    #[error("color record must be a JSON object")]
    NotAnObject,

    /// A rendering option name (format, layer, depth) that is not recognized.
    #[error("unknown {kind} `{name}`")]
    UnknownName { kind: &'static str, name: String },

    /// Structured spec text that is not valid JSON.
    #[error("malformed color record: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColorError {
    /// Creates an invalid-spec error for the given input text.
    pub fn invalid_spec(spec: impl Into<String>) -> Self {
        Self::InvalidSpec { spec: spec.into() }
    }

    /// Creates an unknown-name error for an option of the given kind.
    pub fn unknown_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_spec_message_names_input() {
        let msg = ColorError::invalid_spec("mauve").to_string();
        assert!(msg.contains("`mauve`"), "{msg}");
    }

    #[test]
    fn unknown_name_message() {
        assert_eq!(
            ColorError::unknown_name("depth", "16").to_string(),
            "unknown depth `16`"
        );
    }

    #[test]
    fn json_error_converts() {
        let err: ColorError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, ColorError::Json(_)));
        assert!(err.to_string().starts_with("malformed color record"));
    }
}
