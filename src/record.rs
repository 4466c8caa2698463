use serde::Serialize;

/// One parsed benchmark event, assembled from a timing line and the maxrss
/// line that follows it.
///
/// The declared field order is the CSV column order; the emitter derives its
/// columns from it rather than naming them a second time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchRecord {
    /// User CPU time in seconds.
    pub utime: f64,
    /// System CPU time in seconds.
    pub stime: f64,
    /// Real (wall clock) time in seconds.
    pub rtime: f64,
    /// Peak resident set size, in the units ffmpeg reports (kilobytes).
    pub maxrss: u64,
}
