//! benchcsv library - parsing ffmpeg `-benchmark` log output into CSV.
//!
//! ffmpeg's `-benchmark` flag logs each run as two consecutive lines, one
//! with CPU/wall timings and one with peak memory. This library pairs those
//! lines back up, parses them into records, and serializes the records as
//! CSV with a fixed `utime,stime,rtime,maxrss` column order.
//!
//! # Modules
//!
//! - [`parse`] - line normalization, the two line patterns, pair parsing
//! - [`pairing`] - lazy two-at-a-time pairing of the line stream
//! - [`record`] - the parsed benchmark record type
//! - [`report`] - CSV emission
//!
//! # Example
//!
//! ```
//! use benchcsv::{normalize_line, PairedRecords, TracingDiagnostics, write_csv};
//!
//! let input = "bench: utime=0.12s stime=0.03s rtime=0.20s\nbench: maxrss=51200\n";
//! let lines = input
//!     .lines()
//!     .filter_map(|line| normalize_line(line).map(str::to_string));
//!
//! let mut out = Vec::new();
//! let rows = write_csv(PairedRecords::new(lines, TracingDiagnostics), &mut out).unwrap();
//! assert_eq!(rows, 1);
//! assert_eq!(out, b"utime,stime,rtime,maxrss\n0.12,0.03,0.2,51200\n");
//! ```

pub mod pairing;
pub mod parse;
pub mod record;
pub mod report;

// Re-export for convenience
pub use pairing::{Diagnostics, PairedRecords, TracingDiagnostics};
pub use parse::{extract, normalize_line, parse_pair, LineKind, ParseError};
pub use record::BenchRecord;
pub use report::write_csv;
