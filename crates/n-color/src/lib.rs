// SPDX-License-Identifier: MIT
//
// n-color — parse, convert and render colors for terminals and stylesheets.
//
// A small, allocation-light color toolkit: one immutable `Color` value,
// a forgiving parser that turns names, hex literals and structured
// records into it, exact RGB ↔ HSL math, CSS-style text output, and the
// ANSI SGR sequences a terminal needs to paint with it.
//
// Data flow:
//
//   spec (text | structured) → spec::parse → Color
//                                             ├─→ format (hex, rgb, hsl, css)
//                                             ├─→ space  (RGB ↔ HSL)
//                                             └─→ ansi   (truecolor, 256, wrap)
//
// Everything past the parser is a pure function of a `Copy` value. There
// is no shared state, no I/O beyond the `impl Write` the caller hands in,
// and no terminal detection: the caller decides which encoding to emit.

pub mod ansi;
pub mod color;
pub mod error;
pub mod format;
pub mod space;
pub mod spec;

pub use ansi::{ColorDepth, Layer, Style, WrapOptions};
pub use color::Color;
pub use error::ColorError;
pub use format::Format;
pub use space::Hsl;
pub use spec::{ColorSpec, StructuredSpec, parse, try_parse};
