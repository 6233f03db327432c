//! Parsing of the read-length distribution emitted by `DBstats -b1 -u`.
//!
//! The report carries a preamble (read and base totals, base composition)
//! followed by a distribution table, one row per length bucket:
//!
//! ```text
//!   Distribution of Read Lengths (Bin size = 1)
//!
//!         Bin:      Count  % Reads  % Bases     Average
//!      45,000:          1      0.0      0.0      45,688
//!      44,999:          3      0.0      0.1      44,999
//! ```
//!
//! Only the `Bin` and `Count` columns are consumed; integers may carry comma
//! grouping. The upstream layout is an external contract, so the rest of the
//! crate sees the report only as descending `(length, count)` pairs — a
//! column-order change stays inside this module.

use crate::cutoff::CutoffError;
use regex::Regex;

/// Shape of one histogram row: `<length>: <count> <% reads> <% bases> <average>`.
const ROW_PATTERN: &str = r"^\s*(\S+):\s+(\S+)\s+\S+\s+\S+\s+\S+\s*$";

/// Marks the column-header row of the distribution table. Everything before
/// it is preamble; everything after it must be a histogram row.
const TABLE_HEADER: &str = "Bin:";

/// Read-length counts, normalized to descending length order.
#[derive(Debug)]
pub struct ReadLengthHistogram {
    bins: Vec<(u64, u64)>,
}

impl ReadLengthHistogram {
    /// Parse a captured `DBstats` report.
    ///
    /// Rows appearing after the `Bin:` column header are validated strictly:
    /// any non-blank line that is not a well-formed row is an error naming
    /// that line. When no header is present, the whole text is taken as bare
    /// rows under the same strict rule.
    pub fn from_report(text: &str) -> Result<Self, CutoffError> {
        let row = Regex::new(ROW_PATTERN).expect("static pattern");
        let has_header = text
            .lines()
            .any(|l| l.trim_start().starts_with(TABLE_HEADER));

        let mut bins: Vec<(u64, u64)> = Vec::new();
        let mut in_table = !has_header;

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if !in_table {
                in_table = line.trim_start().starts_with(TABLE_HEADER);
                continue;
            }

            let malformed = || CutoffError::MalformedStats {
                line_no: idx + 1,
                line: line.trim().to_string(),
            };

            let caps = row.captures(line).ok_or_else(malformed)?;
            let len = grouped_int(&caps[1]).ok_or_else(malformed)?;
            let count = grouped_int(&caps[2]).ok_or_else(malformed)?;
            bins.push((len, count));
        }

        if bins.is_empty() {
            return Err(CutoffError::EmptyInput);
        }

        // DBstats emits longest-first already, but the order is part of the
        // external contract and is not assumed
        bins.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        Ok(ReadLengthHistogram { bins })
    }

    /// `(length, count)` pairs, longest first.
    pub fn bins(&self) -> &[(u64, u64)] {
        &self.bins
    }

    /// Shortest recorded read length. `from_report` rejects empty reports,
    /// so at least one bin is always present.
    pub fn shortest_len(&self) -> u64 {
        self.bins.last().map_or(0, |&(len, _)| len)
    }
}

/// Parse a non-negative integer with optional comma grouping, e.g. `45,000`.
fn grouped_int(field: &str) -> Option<u64> {
    field.replace(',', "").parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::ReadLengthHistogram;
    use crate::cutoff::CutoffError;
    use indoc::indoc;

    const REPORT: &str = indoc! {"
        Statistics for all reads of length 500 bases or more

              160,328 reads        out of         163,424  ( 98.1%)
        1,254,398,289 base pairs   out of   1,268,281,871  ( 98.9%)

                7,824 average read length
                5,217 standard deviation

          Base composition: 0.264(A) 0.247(C) 0.279(G) 0.211(T)

          Distribution of Read Lengths (Bin size = 1)

                Bin:      Count  % Reads  % Bases     Average
             45,000:          1      0.0      0.0      45,688
             44,999:          3      0.0      0.1      44,999
             44,998:          2      0.0      0.1      44,998
    "};

    #[test]
    fn parses_full_report() {
        let hist = ReadLengthHistogram::from_report(REPORT).unwrap();
        assert_eq!(
            hist.bins(),
            &[(45_000, 1), (44_999, 3), (44_998, 2)]
        );
        assert_eq!(hist.shortest_len(), 44_998);
    }

    #[test]
    fn accepts_bare_rows_and_sorts_descending() {
        let text = "1000: 5 0.0 0.0 1000\n3000: 2 0.0 0.0 3000\n2000: 3 0.0 0.0 2000";
        let hist = ReadLengthHistogram::from_report(text).unwrap();
        assert_eq!(hist.bins(), &[(3000, 2), (2000, 3), (1000, 5)]);
    }

    #[test]
    fn malformed_row_names_the_line() {
        let text = "1000: 5 0.0 0.0 1000\nabc xyz\n2000: 3 0.0 0.0 2000";
        let err = ReadLengthHistogram::from_report(text).unwrap_err();
        match err {
            CutoffError::MalformedStats { line_no, line } => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "abc xyz");
            }
            other => panic!("expected MalformedStats, got {other:?}"),
        }
    }

    #[test]
    fn garbage_after_table_header_is_malformed() {
        let text = format!("{REPORT}        not a row at all\n");
        assert!(matches!(
            ReadLengthHistogram::from_report(&text),
            Err(CutoffError::MalformedStats { .. })
        ));
    }

    #[test]
    fn non_numeric_fields_are_malformed() {
        // right shape, but the count is not a number
        let text = "1000: five 0.0 0.0 1000";
        assert!(matches!(
            ReadLengthHistogram::from_report(text),
            Err(CutoffError::MalformedStats { .. })
        ));
    }

    #[test]
    fn negative_count_is_malformed() {
        let text = "1000: -5 0.0 0.0 1000";
        assert!(matches!(
            ReadLengthHistogram::from_report(text),
            Err(CutoffError::MalformedStats { .. })
        ));
    }

    #[test]
    fn empty_text_has_no_records() {
        assert!(matches!(
            ReadLengthHistogram::from_report(""),
            Err(CutoffError::EmptyInput)
        ));
        assert!(matches!(
            ReadLengthHistogram::from_report("\n   \n"),
            Err(CutoffError::EmptyInput)
        ));
    }

    #[test]
    fn header_without_rows_has_no_records() {
        let text = "  Distribution of Read Lengths (Bin size = 1)\n\n        Bin:      Count  % Reads  % Bases     Average\n";
        assert!(matches!(
            ReadLengthHistogram::from_report(text),
            Err(CutoffError::EmptyInput)
        ));
    }
}
