use crate::stats::ReadLengthHistogram;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutoffError {
    #[error(
        "invalid coverage target: genome size {genome_size} × coverage {coverage} \
         is not a positive base count"
    )]
    InvalidTarget { genome_size: u64, coverage: f64 },

    #[error(
        "malformed statistics row:
line {line_no}
    `{line}`
expected `<length>: <count> <% reads> <% bases> <average>`, as emitted by `DBstats -b1 -u`"
    )]
    MalformedStats { line_no: usize, line: String },

    #[error("no read-length records found in the statistics report")]
    EmptyInput,

    #[error(
        "not enough bases for the desired coverage: needed {target}, but only {total} are \
         available across all read lengths
suggestion: lower --coverage, or check that the statistics report covers the full read set"
    )]
    CoverageUnreachable { target: u64, total: u128 },
}

/// Desired total of retained bases: `genome_size × coverage`, truncated to an
/// integer. Fails fast when either input is non-positive or the product does
/// not fit a base count.
pub fn coverage_target(genome_size: u64, coverage: f64) -> Result<u64, CutoffError> {
    let target = genome_size as f64 * coverage;
    if genome_size == 0 || !(coverage > 0.0) || !target.is_finite() || target > u64::MAX as f64 {
        return Err(CutoffError::InvalidTarget {
            genome_size,
            coverage,
        });
    }
    Ok(target as u64)
}

/// Calculate the length cutoff needed for at least `target` bases, given the
/// report text of `DBstats -b1 -u`.
///
/// Reads are taken longest-first: scanning the histogram in descending length
/// order, the cutoff is the length at which the running base total first
/// reaches `target`. Retaining only reads at or above the result therefore
/// meets the target with the least data, and no larger cutoff would meet it.
pub fn compute(target: u64, stats_text: &str) -> Result<u64, CutoffError> {
    let histogram = ReadLengthHistogram::from_report(stats_text)?;
    from_histogram(target, &histogram)
}

/// Cutoff selection over an already-parsed histogram.
pub fn from_histogram(target: u64, histogram: &ReadLengthHistogram) -> Result<u64, CutoffError> {
    // A zero target needs no bases at all: every read is retained, so the
    // cutoff is the shortest recorded length. The scan below would instead
    // stop at the longest.
    if target == 0 {
        return Ok(histogram.shortest_len());
    }

    let mut subtotal: u128 = 0;
    for &(len, count) in histogram.bins() {
        subtotal += len as u128 * count as u128;
        if subtotal >= target as u128 {
            return Ok(len);
        }
    }

    Err(CutoffError::CoverageUnreachable {
        target,
        total: subtotal,
    })
}
