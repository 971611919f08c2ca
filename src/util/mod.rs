//
//  atlassian-api
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Utility functions shared by the CLI commands.
//!
//! - Time formatting for version and history output
//! - Text truncation for table cells
//! - Reading page bodies from arguments, files or stdin
//! - Opening pages in the browser

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};

/// Formats a timestamp in local time as `YYYY-MM-DD HH:MM:SS`.
pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = (*timestamp).into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Formats a timestamp relative to now, e.g. `3 days ago`.
pub fn format_relative_time(timestamp: &DateTime<Utc>) -> String {
    relative_to(timestamp, &Utc::now())
}

fn relative_to(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(*timestamp).num_seconds();
    if diff < 0 {
        return "in the future".to_string();
    }

    let (count, unit) = match diff {
        0..=59 => return "just now".to_string(),
        60..=3599 => (diff / 60, "minute"),
        3600..=86_399 => (diff / 3600, "hour"),
        86_400..=604_799 => (diff / 86_400, "day"),
        604_800..=2_591_999 => (diff / 604_800, "week"),
        2_592_000..=31_535_999 => (diff / 2_592_000, "month"),
        _ => (diff / 31_536_000, "year"),
    };
    format!("{} {}{} ago", count, unit, if count == 1 { "" } else { "s" })
}

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Resolves a page body given inline or as a file.
///
/// A file path of `-` reads stdin. Exactly one source must be given.
pub fn read_body(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(body), None) => Ok(body.to_string()),
        (None, Some(path)) if path == Path::new("-") => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read body from stdin")?;
            Ok(body)
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read body from {}", path.display())),
        (Some(_), Some(_)) => bail!("Use either --body or --body-file, not both"),
        (None, None) => bail!("A body is required: use --body or --body-file"),
    }
}

/// Joins a base URL and a relative UI link such as `/x/AbCd`.
pub fn join_link(base: &str, link: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), link.trim_start_matches('/'))
}

/// Opens `url` in the default browser.
pub fn open_browser(url: &str) -> Result<()> {
    webbrowser::open(url).with_context(|| format!("Failed to open {url} in the browser"))?;
    Ok(())
}
