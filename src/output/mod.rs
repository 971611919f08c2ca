//
//  atlassian-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting Module
//!
//! Renders command results either as human readable text or as JSON.
//!
//! ## Output Formats
//!
//! | Format | Flag | Use |
//! |--------|------|-----|
//! | Table | (default) | Interactive terminal use |
//! | JSON | `--json` | Scripting, piping into `jq` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_api::output::{OutputFormat, OutputWriter, TableOutput};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct PageRow {
//!     id: String,
//!     title: String,
//! }
//!
//! impl TableOutput for PageRow {
//!     fn print_table(&self, _color: bool) {
//!         println!("{:<12} {}", self.id, self.title);
//!     }
//! }
//!
//! let writer = OutputWriter::new(OutputFormat::Table);
//! writer.write(&PageRow { id: "123".into(), title: "Roadmap".into() })?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Color Support
//!
//! Colors follow [`console::colors_enabled`], which honors `NO_COLOR`,
//! `CLICOLOR_FORCE` and whether stdout is a terminal.

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// How command results are rendered.
///
/// Selected once per invocation from the global `--json` flag.
///
/// # Variants
///
/// * `Table` - Text, tables and `key: value` fields (default)
/// * `Json` - Pretty-printed JSON on stdout, nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable text and tables.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Maps the `--json` flag to a format.
    ///
    /// # Parameters
    ///
    /// * `json` - Whether `--json` was given
    ///
    /// # Returns
    ///
    /// [`OutputFormat::Json`] when `json` is set, [`OutputFormat::Table`]
    /// otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use atlassian_api::output::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
    /// assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
    /// ```
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes results and status messages in the selected format.
///
/// Results go to stdout. Warnings go to stderr so they never corrupt JSON
/// output. Informational and success messages are dropped in JSON mode.
///
/// # Example
///
/// ```rust,no_run
/// use atlassian_api::output::{OutputFormat, OutputWriter};
///
/// let output = OutputWriter::new(OutputFormat::Table);
/// output.write_success("Created page Roadmap (42)");
/// output.write_warning("TLS certificate verification is disabled");
/// ```
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer, detecting color support.
    ///
    /// # Parameters
    ///
    /// * `format` - The output format for results
    ///
    /// # Returns
    ///
    /// A writer whose color setting follows [`console::colors_enabled`].
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Whether colored output is enabled.
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// The selected format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns `true` for [`OutputFormat::Json`].
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes a single value.
    ///
    /// # Parameters
    ///
    /// * `value` - The result, rendered through [`TableOutput`] in table
    ///   mode and through `serde` in JSON mode
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization or the stdout write fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of values.
    ///
    /// # Parameters
    ///
    /// * `values` - The results, printed one after another in table mode
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization or the stdout write fails.
    ///
    /// # Notes
    ///
    /// JSON output is a single array, so an empty list prints `[]`.
    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values)?,
            OutputFormat::Table => {
                for value in values {
                    value.print_table(self.color);
                }
            }
        }
        Ok(())
    }

    /// Writes a warning message to stderr, in every format.
    ///
    /// # Parameters
    ///
    /// * `msg` - The message, printed after a `warning:` prefix
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Writes an informational message to stdout.
    ///
    /// # Parameters
    ///
    /// * `msg` - The message, printed as is
    ///
    /// # Notes
    ///
    /// Suppressed in JSON mode.
    pub fn write_info(&self, msg: &str) {
        if !self.is_json() {
            println!("{}", msg);
        }
    }

    /// Writes a success message to stdout, prefixed with a check mark.
    ///
    /// # Parameters
    ///
    /// * `msg` - The message
    ///
    /// # Notes
    ///
    /// Suppressed in JSON mode.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.is_json() {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Human readable rendering of a result.
///
/// Implemented by every type a command hands to [`OutputWriter::write`] or
/// [`OutputWriter::write_list`].
///
/// # Example
///
/// ```rust
/// use atlassian_api::output::{print_field, TableOutput};
///
/// struct SpaceRow {
///     key: String,
///     name: String,
/// }
///
/// impl TableOutput for SpaceRow {
///     fn print_table(&self, color: bool) {
///         print_field("Key", &self.key, color);
///         print_field("Name", &self.name, color);
///     }
/// }
/// ```
pub trait TableOutput {
    /// Prints the value as text.
    ///
    /// # Parameters
    ///
    /// * `color` - Whether styling is enabled
    fn print_table(&self, color: bool);
}

/// Prints a `key: value` line, dimming the key when color is enabled.
///
/// # Parameters
///
/// * `key` - The field label, including any indentation
/// * `value` - The field value
/// * `color` - Whether to dim the label
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
