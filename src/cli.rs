//! Command-line argument parsing
//!
//! Supports:
//! - One-shot conversion of text arguments or stdin
//! - A line-oriented serve loop that follows config edits
//! - Showing the config location and effective ignore list, and replacing it

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::convert::ConversionMode;
use crate::editable::{FieldKind, FlatSurface, RopeBuffer, Selection, StringBuffer};
use crate::surface::Surface;

/// Selection-aware case conversion
#[derive(Parser, Debug)]
#[command(name = "recase", version, about = "Selection-aware case conversion")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert TEXT (or stdin) and print the result
    Convert {
        /// title, upper or lower
        #[arg(value_name = "MODE")]
        mode: ConversionMode,

        /// Text to convert; joined with spaces. Reads stdin when omitted
        #[arg(value_name = "TEXT")]
        text: Vec<String>,

        /// Only convert characters START..END (character offsets)
        #[arg(long, value_name = "START..END", value_parser = parse_selection)]
        select: Option<Selection>,

        /// Ignore list to use instead of the configured one
        #[arg(long, value_name = "LIST")]
        ignore: Option<String>,

        /// Config file to read the ignore list from
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Read `<mode> <text>` lines from stdin, printing each conversion
    Serve {
        /// Config file to read (and watch) the ignore list from
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Show the config file path and the effective ignore list
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,

        /// Config file to inspect or edit
        #[arg(long, value_name = "PATH", global = true)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Replace the ignore list, e.g. `recase config set "LLC, Ltd., GmbH"`
    Set {
        /// Comma-separated tokens to keep as written; surrounding blanks are trimmed
        #[arg(value_name = "LIST")]
        list: String,
    },
}

/// Parse `START..END` into a selection
pub fn parse_selection(s: &str) -> Result<Selection, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got '{}'", s))?;
    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid selection start '{}'", start))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid selection end '{}'", end))?;
    Ok(Selection::new(start, end))
}

/// Split a serve line into its mode and the text to convert
pub fn parse_serve_line(line: &str) -> Result<(ConversionMode, &str), String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (mode, text) = line.split_once(' ').unwrap_or((line, ""));
    let mode = mode.parse().map_err(|e| format!("{}", e))?;
    Ok((mode, text))
}

/// Build a flat surface for `text`: multi-line text gets a text area
pub fn flat_surface(text: &str, select: Option<Selection>) -> Surface {
    if text.contains('\n') {
        let field = FlatSurface::new(RopeBuffer::from_text(text), FieldKind::TextArea);
        Surface::TextArea(match select {
            Some(selection) => field.with_selection(selection),
            None => field,
        })
    } else {
        let field = FlatSurface::new(StringBuffer::from_text(text), FieldKind::Text);
        Surface::Input(match select {
            Some(selection) => field.with_selection(selection),
            None => field,
        })
    }
}

/// Config path from `--config`, or the default location
pub fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(crate::config_paths::config_file)
}
