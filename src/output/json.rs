//
//  atlassian-api
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON output helpers.

use serde::Serialize;
use std::io::Write;

/// Prints `value` to stdout as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    write_json_to(&mut std::io::stdout().lock(), value)
}

/// Writes `value` to `writer` as pretty JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
