//! Minimal CSV writer with append-safe, header-once semantics

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Appends rows to a CSV file, writing the header first when the file is
/// new or empty. Parent directories are created as needed.
pub fn append_rows(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        super::ensure_directory(parent)?;
    }

    let needs_header = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = BufWriter::new(file);

    if needs_header {
        write_row(&mut out, headers.iter().map(|h| h.to_string()))?;
    }
    for row in rows {
        write_row(&mut out, row.iter().cloned())?;
    }

    out.flush()
}

fn write_row<W: Write>(out: &mut W, fields: impl Iterator<Item = String>) -> io::Result<()> {
    let line = fields
        .map(|f| escape_field(&f))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{}", line)
}

/// Quotes a field when it contains a comma, quote, or line break; embedded
/// quotes are doubled.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
