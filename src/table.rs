//! Plain-text time tables.
//!
//! One line per measured size, tab separated, no header:
//!
//! ```text
//! N	time	avg_ob	min_ob	max_ob
//! ```
//!
//! `time` has six decimals (seconds per operation) and `avg_ob` two.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::timing::TimeRecord;

/// Render one record as a table line, without the trailing newline.
pub fn format_row(r: &TimeRecord) -> String {
    format!(
        "{}\t{:.6}\t{:.2}\t{}\t{}",
        r.n, r.time, r.average_ob, r.min_ob, r.max_ob
    )
}

/// Write `records` to `path`, replacing any existing file.
///
/// The table is written to a temporary file next to `path` and renamed into
/// place once complete, so `path` never holds a partial table.
pub fn save_time_table(path: impl AsRef<Path>, records: &[TimeRecord]) -> Result<()> {
    let path = path.as_ref();
    if records.is_empty() {
        return Err(Error::InvalidArgument("time table is empty"));
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut w = BufWriter::new(tmp.as_file());
        for r in records {
            writeln!(w, "{}", format_row(r))?;
        }
        w.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    tracing::info!(path = %path.display(), rows = records.len(), "saved time table");
    Ok(())
}

/// Read a table written by [`save_time_table`].
///
/// `n_elems` is not stored in the file and comes back as zero.
pub fn read_time_table(path: impl AsRef<Path>) -> Result<Vec<TimeRecord>> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_row(i + 1, l))
        .collect()
}

fn parse_row(line: usize, text: &str) -> Result<TimeRecord> {
    let bad = |reason: String| Error::Parse { line, reason };

    let fields: Vec<&str> = text.split('\t').collect();
    if fields.len() != 5 {
        return Err(bad(format!("expected 5 fields, found {}", fields.len())));
    }
    let int = |i: usize| -> Result<usize> {
        fields[i]
            .trim()
            .parse()
            .map_err(|e| bad(format!("field {}: {e}", i + 1)))
    };
    let float = |i: usize| -> Result<f64> {
        fields[i]
            .trim()
            .parse()
            .map_err(|e| bad(format!("field {}: {e}", i + 1)))
    };

    Ok(TimeRecord {
        n: int(0)?,
        n_elems: 0,
        time: float(1)?,
        average_ob: float(2)?,
        min_ob: int(3)?,
        max_ob: int(4)?,
    })
}
