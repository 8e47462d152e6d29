// SPDX-License-Identifier: MIT
//
// ncolor — inspect a color from the command line.
//
// This binary is a thin front end over the n-color crate:
//
//   argv → clap → read_spec → Color → render → stdout
//
// A SPEC that starts with `{` is a JSON record ({"r":..,"g":..,"b":..} or
// {"h":..,"s":..,"l":..}); anything else is a name or a hex literal.
// Without --format every notation is listed, one per line:
//
//   hex   #ffa500
//   rgb   rgb(255, 165, 0)
//   ...
//   256   214
//
// By default unreadable input renders as black, the same as the library's
// lenient parser. --strict turns that into an error and exit status 1.

use std::fmt::Write as _;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use n_color::{Color, ColorDepth, ColorError, Format, StructuredSpec, WrapOptions};

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "ncolor", version)]
#[command(about = "Parse a color and print it as CSS text and ANSI escapes")]
struct Cli {
    /// Color name, `#rgb` / `#rrggbb` literal, or a JSON record
    spec: String,

    /// Print only this notation (hex, rgb, rgba, hsl, hsla, css)
    #[arg(long, short = 'f', value_parser = Format::from_str)]
    format: Option<Format>,

    /// Also print TEXT wrapped in the color's escape sequences
    #[arg(long, short = 't')]
    text: Option<String>,

    /// Escape encoding for --text (truecolor or 256)
    #[arg(long, default_value = "truecolor", value_parser = ColorDepth::from_str)]
    depth: ColorDepth,

    /// Paint the background instead of the foreground
    #[arg(long)]
    background: bool,

    /// Prefix the wrapped text with bold
    #[arg(long)]
    bold: bool,

    /// Prefix the wrapped text with underline
    #[arg(long)]
    underline: bool,

    /// Fail on unreadable input instead of falling back to black
    #[arg(long)]
    strict: bool,

    /// Print the parsed color as a JSON record instead of text notations
    #[arg(long)]
    json: bool,

    /// Write debug logs to PATH
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Collect the wrapping flags into library options.
    fn wrap_options(&self) -> WrapOptions {
        let mut opts = WrapOptions::new();
        if self.background {
            opts = opts.background();
        }
        if self.depth == ColorDepth::Palette256 {
            opts = opts.palette256();
        }
        if self.bold {
            opts = opts.bold();
        }
        if self.underline {
            opts = opts.underline();
        }
        opts
    }
}

// ─── Input ──────────────────────────────────────────────────────────────────

/// True if the argument should be read as a JSON record.
fn is_structured(raw: &str) -> bool {
    raw.trim_start().starts_with('{')
}

/// Turn the positional argument into a color.
///
/// Lenient mode never fails: malformed JSON is logged and falls back to
/// black like any other unreadable input.
fn read_spec(raw: &str, strict: bool) -> Result<Color, ColorError> {
    if !is_structured(raw) {
        return if strict {
            n_color::try_parse(raw)
        } else {
            Ok(n_color::parse(raw))
        };
    }

    match StructuredSpec::from_json_str(raw) {
        Ok(spec) if strict => n_color::try_parse(spec),
        Ok(spec) => Ok(n_color::parse(spec)),
        Err(e) if strict => Err(e),
        Err(e) => {
            log::debug!("[cli] {e}, falling back to black");
            Ok(Color::BLACK)
        }
    }
}

// ─── Output ─────────────────────────────────────────────────────────────────

/// Everything the binary prints for one color, newline-terminated.
fn render(cli: &Cli, color: Color) -> Result<String, ColorError> {
    let mut out = String::new();

    // Writing to a String cannot fail.
    if cli.json {
        let _ = writeln!(out, "{}", serde_json::to_string(&color)?);
    } else if let Some(format) = cli.format {
        let _ = writeln!(out, "{}", color.format(format));
    } else {
        for format in Format::ALL {
            let _ = writeln!(out, "{:<5} {}", format.name(), color.format(format));
        }
        let _ = writeln!(out, "{:<5} {}", "256", color.ansi256_index());
    }

    if let Some(text) = &cli.text {
        let _ = writeln!(out, "{}", color.wrap(text, cli.wrap_options()));
    }

    Ok(out)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn init_logging(path: &Path) {
    let file = File::create(path).unwrap_or_else(|e| {
        eprintln!("ncolor: cannot create log file {}: {e}", path.display());
        process::exit(1);
    });
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
        eprintln!("ncolor: failed to initialize logging: {e}");
        process::exit(1);
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path);
    }

    let output = read_spec(&cli.spec, cli.strict).and_then(|color| {
        log::debug!("[cli] {:?} → {color:?}", cli.spec);
        render(&cli, color)
    });

    match output {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("ncolor: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
