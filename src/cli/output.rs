//! JSON output of action results.

use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Serialize `value` as one JSON document followed by a newline.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
