//! CSV serialization of parsed benchmark records.

use std::io::Write;

use anyhow::{Context, Result};

use crate::parse::ParseError;
use crate::record::BenchRecord;

/// CSV column names, in [`BenchRecord`] field order.
const COLUMNS: [&str; 4] = ["utime", "stime", "rtime", "maxrss"];

/// Write `records` to `sink` as CSV: one header row, then one data row per
/// record in sequence order.
///
/// Rows are written as records arrive; the stream is never materialized in
/// memory. The first `Err` in the stream aborts the run, leaving the rows
/// already written intact. Returns the number of data rows written.
pub fn write_csv<W, I>(records: I, sink: W) -> Result<u64>
where
    W: Write,
    I: IntoIterator<Item = Result<BenchRecord, ParseError>>,
{
    // Header handling is explicit so an empty record stream still gets a
    // header row; serde serialization follows the struct's field order.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer
        .write_record(COLUMNS)
        .context("Failed to write CSV header")?;

    let mut rows = 0u64;
    for record in records {
        let record = record.context("Malformed benchmark input")?;
        writer
            .serialize(&record)
            .context("Failed to write CSV row")?;
        rows += 1;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(rows)
}
