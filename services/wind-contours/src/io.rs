//! Reading decoded sample slices and writing JSON output.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use contour_engine::TimeSlice;
use serde::Serialize;
use tracing::info;

/// Read the decoder hand-off: a JSON list of `{timestamp, data: [{x, y, u, v}]}`.
pub fn read_slices(path: &Path) -> Result<Vec<TimeSlice>> {
    let file = File::open(path).with_context(|| format!("Failed to open input {}", path.display()))?;
    let slices: Vec<TimeSlice> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse input {}", path.display()))?;

    info!(
        file = %path.display(),
        slices = slices.len(),
        samples = slices.iter().map(TimeSlice::len).sum::<usize>(),
        "Read time slices"
    );
    Ok(slices)
}

/// Write `value` as JSON to `output`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>, pretty: bool) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?;
            write_to(value, BufWriter::new(file), pretty)
                .with_context(|| format!("Failed to write output {}", path.display()))?;
            info!(file = %path.display(), "Wrote output");
        }
        None => {
            let stdout = io::stdout();
            write_to(value, BufWriter::new(stdout.lock()), pretty).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn write_to<T: Serialize, W: Write>(value: &T, mut writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_compact() {
        let mut buf = Vec::new();
        write_to(&vec![1.5, 2.0], &mut buf, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[1.5,2.0]");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_slices(Path::new("/nonexistent/harmony.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open input"));
    }
}
