//
//  atlassian-api
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Tabular output for content listings, built on `comfy_table`.
//!
//! ## Features
//!
//! - Builder pattern for headers and rows
//! - Color detection that can be overridden per table
//! - Status coloring for Confluence content states
//! - Yes/No rendering of booleans
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_api::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["ID", "TITLE", "VERSION"])
//!     .row(["123", "Roadmap", "4"])
//!     .print();
//! ```
//!
//! ## Notes
//!
//! Tables use UTF-8 box-drawing borders and are arranged dynamically to fit
//! the terminal width.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates an empty table with the standard style.
///
/// The table uses the UTF-8 full border preset and dynamic content
/// arrangement.
///
/// # Returns
///
/// A new [`Table`] with no header and no rows.
///
/// # Example
///
/// ```rust
/// use atlassian_api::output::create_table;
///
/// let mut table = create_table();
/// table.set_header(vec!["KEY", "NAME"]);
/// table.add_row(vec!["DOCS", "Documentation"]);
/// assert!(table.to_string().contains("Documentation"));
/// ```
///
/// # Notes
///
/// Most callers want [`TableBuilder`] instead.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent builder for result tables.
///
/// # Features
///
/// - Chained calls for headers and rows
/// - Cyan headers when color is enabled
/// - Any iterator of string-like cells is accepted
///
/// # Example
///
/// ```rust
/// use atlassian_api::output::TableBuilder;
///
/// let table = TableBuilder::new()
///     .color(false)
///     .headers(["ID", "TITLE"])
///     .rows([["1", "Roadmap"], ["2", "Release notes"]])
///     .build();
/// assert!(table.to_string().contains("Release notes"));
/// ```
///
/// # Notes
///
/// Color support is detected when the builder is created. Call
/// [`color`](TableBuilder::color) before [`headers`](TableBuilder::headers)
/// to override it, since header styling is applied immediately.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    /// Creates a builder, detecting color support.
    ///
    /// # Returns
    ///
    /// A builder wrapping [`create_table`] with color taken from
    /// [`console::colors_enabled`].
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Overrides color detection.
    ///
    /// # Parameters
    ///
    /// * `enabled` - `true` to style headers, `false` for plain text
    ///
    /// # Returns
    ///
    /// The builder, for chaining.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the header row. Headers are cyan when color is enabled.
    ///
    /// # Parameters
    ///
    /// * `headers` - Column titles, in display order
    ///
    /// # Returns
    ///
    /// The builder, for chaining.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let header_cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(header_cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    /// Appends a row.
    ///
    /// # Parameters
    ///
    /// * `cells` - Cell values, one per column
    ///
    /// # Returns
    ///
    /// The builder, for chaining.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    /// Appends several rows.
    ///
    /// # Parameters
    ///
    /// * `rows` - An iterator of rows, each an iterator of cell values
    ///
    /// # Returns
    ///
    /// The builder, for chaining.
    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(Into::into).collect();
            self.table.add_row(row);
        }
        self
    }

    /// Prints the table to stdout, consuming the builder.
    pub fn print(self) {
        println!("{}", self.table);
    }

    /// Returns the underlying table.
    ///
    /// # Returns
    ///
    /// The configured [`Table`], for rendering to a string or further
    /// customization.
    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a Confluence content status.
///
/// # Parameters
///
/// * `status` - The status string, e.g. `current` or `trashed`
/// * `color` - Whether to apply color
///
/// # Returns
///
/// The status, styled by meaning when `color` is set:
///
/// | Status | Color |
/// |--------|-------|
/// | `current` | Green |
/// | `draft`, `historical` | Yellow |
/// | `trashed`, `deleted`, `archived` | Red |
///
/// Other values are returned unchanged.
///
/// # Example
///
/// ```rust
/// use atlassian_api::output::format_status;
///
/// assert_eq!(format_status("current", false), "current");
/// ```
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "current" => style(status).green().to_string(),
        "draft" | "historical" => style(status).yellow().to_string(),
        "trashed" | "deleted" | "archived" => style(status).red().to_string(),
        _ => status.to_string(),
    }
}

/// Renders a boolean as `Yes`/`No`.
///
/// # Parameters
///
/// * `value` - The boolean to render
/// * `color` - Whether to color `Yes` green and dim `No`
///
/// # Returns
///
/// `"Yes"` or `"No"`, possibly styled.
///
/// # Example
///
/// ```rust
/// use atlassian_api::output::format_bool;
///
/// assert_eq!(format_bool(true, false), "Yes");
/// assert_eq!(format_bool(false, false), "No");
/// ```
pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}
