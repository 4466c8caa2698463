//! Line normalization and pattern extraction for ffmpeg `-benchmark` output.
//!
//! ffmpeg emits one benchmark event as two consecutive log lines:
//!
//! ```text
//! bench: utime=0.12s stime=0.03s rtime=0.20s
//! bench: maxrss=51200
//! ```
//!
//! This module turns one such pair into a [`BenchRecord`]. Grouping lines
//! into pairs is handled by [`crate::pairing`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::record::BenchRecord;

/// Static regex for the timing line. Compiled once at first use.
/// Pattern: bench: utime={float}s stime={float}s rtime={float}s
static TIMING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bench: utime=([\d.]+)s stime=([\d.]+)s rtime=([\d.]+)s")
        .expect("Invalid timing line regex pattern")
});

/// Static regex for the peak memory line. Compiled once at first use.
/// Pattern: bench: maxrss={int}
static MAXRSS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bench: maxrss=(\d+)").expect("Invalid maxrss line regex pattern"));

/// Which of the two fixed line shapes a line was expected to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// First line of a pair: user/system/real time.
    Timing,
    /// Second line of a pair: peak resident set size.
    Maxrss,
}

impl LineKind {
    /// Human-readable shape of the expected line, for diagnostics.
    fn expected_shape(&self) -> &'static str {
        match self {
            LineKind::Timing => "bench: utime=<float>s stime=<float>s rtime=<float>s",
            LineKind::Maxrss => "bench: maxrss=<int>",
        }
    }
}

/// Parse error types.
#[derive(Debug)]
pub enum ParseError {
    /// A line does not contain the substring expected for its position in
    /// the pair.
    PatternMismatch { kind: LineKind, line: String },
    /// The pair parser was handed a group whose length is not exactly two.
    MalformedPair { count: usize },
    /// A captured substring failed numeric conversion.
    InvalidNumber { field: &'static str, value: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::PatternMismatch { kind, line } => {
                write!(
                    f,
                    "line does not match \"{}\": \"{line}\"",
                    kind.expected_shape()
                )
            }
            ParseError::MalformedPair { count } => {
                write!(f, "expected 2 lines of ffmpeg benchmark, got {count}")
            }
            ParseError::InvalidNumber { field, value } => {
                write!(f, "{field}: \"{value}\" is not a valid number")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Strip surrounding whitespace and newlines from a raw input line.
///
/// Returns `None` for lines that are blank after trimming; those are
/// dropped from the stream entirely and never count toward pairing.
pub fn normalize_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Extract the numeric capture groups for `kind` from a normalized line.
///
/// The pattern is searched anywhere in the line; captures come back in
/// pattern declaration order.
pub fn extract(line: &str, kind: LineKind) -> Result<Vec<&str>, ParseError> {
    let re = match kind {
        LineKind::Timing => &TIMING_RE,
        LineKind::Maxrss => &MAXRSS_RE,
    };
    let caps = re.captures(line).ok_or_else(|| ParseError::PatternMismatch {
        kind,
        line: line.to_string(),
    })?;
    Ok(caps.iter().skip(1).flatten().map(|m| m.as_str()).collect())
}

/// Parse one timing line plus one maxrss line into a [`BenchRecord`].
///
/// The slice must hold exactly two normalized lines in arrival order.
pub fn parse_pair(lines: &[&str]) -> Result<BenchRecord, ParseError> {
    let &[timing, maxrss] = lines else {
        return Err(ParseError::MalformedPair { count: lines.len() });
    };

    let caps = extract(timing, LineKind::Timing)?;
    let utime = parse_field("utime", caps[0])?;
    let stime = parse_field("stime", caps[1])?;
    let rtime = parse_field("rtime", caps[2])?;

    let caps = extract(maxrss, LineKind::Maxrss)?;
    let maxrss = parse_field("maxrss", caps[0])?;

    Ok(BenchRecord {
        utime,
        stime,
        rtime,
        maxrss,
    })
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
