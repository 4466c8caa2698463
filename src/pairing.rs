//! Pairing sequencer: groups normalized lines two at a time and yields one
//! parsed record per complete pair.
//!
//! The sequencer is a pull-based iterator, so records can be consumed (and
//! written out) before the next input line is read. That keeps memory flat
//! on unbounded input. It is a single forward pass and not restartable.

use crate::parse::{parse_pair, ParseError};
use crate::record::BenchRecord;

/// Sink for non-fatal diagnostics raised while sequencing.
///
/// The pipeline never talks to the global logger directly; the binary
/// installs [`TracingDiagnostics`], tests install a collecting impl.
pub trait Diagnostics {
    /// Input ended with `line` still waiting for its partner.
    fn trailing_line(&mut self, line: &str);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn trailing_line(&mut self, line: &str) {
        (**self).trailing_line(line);
    }
}

/// Forwards diagnostics to the `tracing` subscriber at warn level.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn trailing_line(&mut self, line: &str) {
        tracing::warn!("unpaired line left at end of input: \"{line}\"");
    }
}

/// Iterator adapter producing one [`BenchRecord`] per two input lines.
///
/// Holds at most one pending line. A trailing unpaired line at end of
/// input is reported through the [`Diagnostics`] sink and discarded; it
/// never corrupts the records already yielded. A parse failure is yielded
/// as `Err` at the position its pair was due, after which the iterator is
/// exhausted (malformed pairs are not skipped).
pub struct PairedRecords<I, D> {
    lines: I,
    pending: Option<String>,
    diagnostics: D,
    failed: bool,
}

impl<I, D> PairedRecords<I, D>
where
    I: Iterator<Item = String>,
    D: Diagnostics,
{
    /// Wrap an iterator of normalized (non-blank) lines.
    pub fn new(lines: I, diagnostics: D) -> Self {
        PairedRecords {
            lines,
            pending: None,
            diagnostics,
            failed: false,
        }
    }
}

impl<I, D> Iterator for PairedRecords<I, D>
where
    I: Iterator<Item = String>,
    D: Diagnostics,
{
    type Item = Result<BenchRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for line in self.lines.by_ref() {
            match self.pending.take() {
                None => self.pending = Some(line),
                Some(first) => {
                    let result = parse_pair(&[first.as_str(), line.as_str()]);
                    self.failed = result.is_err();
                    return Some(result);
                }
            }
        }

        if let Some(line) = self.pending.take() {
            self.diagnostics.trailing_line(&line);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CollectedDiagnostics {
        trailing: Vec<String>,
    }

    impl Diagnostics for CollectedDiagnostics {
        fn trailing_line(&mut self, line: &str) {
            self.trailing.push(line.to_string());
        }
    }

    fn lines(input: &[&str]) -> impl Iterator<Item = String> {
        input
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_even_input_yields_all_pairs() {
        let mut diag = CollectedDiagnostics::default();
        let records: Vec<_> = PairedRecords::new(
            lines(&[
                "bench: utime=1.0s stime=0.5s rtime=1.5s",
                "bench: maxrss=1024",
                "bench: utime=2.0s stime=1.0s rtime=3.0s",
                "bench: maxrss=2048",
            ]),
            &mut diag,
        )
        .collect::<Result<_, _>>()
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].maxrss, 1024);
        assert_eq!(records[1].maxrss, 2048);
        assert_eq!(records[0].utime, 1.0);
        assert_eq!(records[1].rtime, 3.0);
        assert!(diag.trailing.is_empty());
    }

    #[test]
    fn test_trailing_line_reported_not_fatal() {
        let mut diag = CollectedDiagnostics::default();
        let records: Vec<_> = PairedRecords::new(
            lines(&[
                "bench: utime=1.0s stime=0.5s rtime=1.5s",
                "bench: maxrss=1024",
                "bench: utime=2.0s stime=1.0s rtime=3.0s",
            ]),
            &mut diag,
        )
        .collect::<Result<_, _>>()
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].maxrss, 1024);
        assert_eq!(
            diag.trailing,
            vec!["bench: utime=2.0s stime=1.0s rtime=3.0s".to_string()]
        );
    }

    #[test]
    fn test_parse_failure_propagates_and_fuses() {
        let mut diag = CollectedDiagnostics::default();
        let mut records = PairedRecords::new(
            lines(&[
                "bench: utime=1.0s stime=0.5s rtime=1.5s",
                "bench: maxrss=1024",
                "not a bench line",
                "bench: maxrss=2048",
            ]),
            &mut diag,
        );

        assert!(records.next().unwrap().is_ok());
        assert!(records.next().unwrap().is_err());
        assert!(records.next().is_none());
    }

    #[test]
    fn test_records_produced_lazily() {
        // The first record must come out before the iterator touches the
        // third input line.
        let mut diag = CollectedDiagnostics::default();
        let mut pulled = 0;
        let source = lines(&[
            "bench: utime=1.0s stime=0.5s rtime=1.5s",
            "bench: maxrss=1024",
            "bench: utime=2.0s stime=1.0s rtime=3.0s",
            "bench: maxrss=2048",
        ])
        .inspect(|_| pulled += 1);

        let mut records = PairedRecords::new(source, &mut diag);
        let first = records.next().unwrap().unwrap();
        assert_eq!(first.maxrss, 1024);
        drop(records);
        assert_eq!(pulled, 2);
    }

    #[test]
    fn test_empty_input() {
        let mut diag = CollectedDiagnostics::default();
        let mut records = PairedRecords::new(lines(&[]), &mut diag);
        assert!(records.next().is_none());
        assert!(diag.trailing.is_empty());
    }
}
