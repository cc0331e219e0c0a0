//! Classify calendar lines by day and order them
//!
//! Every line is tested against every day of the window and every notation of
//! that day. Each hit yields one [`MatchResult`], so a line written with two
//! notations for the same day is reported twice. The results are then stably
//! sorted by day offset: lines for the same day keep the order they were found
//! in.

use std::io::Write;

use tracing::trace;

use crate::error::Result;
use crate::rules::{DayRuleSet, Notation};

/// A line that mentions a day of the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// 1-based offset of the matched day from the reference date
    pub day_offset: usize,
    /// Which notation recognized the date
    pub notation: Notation,
    /// The line exactly as it appeared in the input
    pub line: &'a str,
}

/// Find every line mentioning a day of the window, ordered by day
///
/// Matching is case-insensitive; the returned lines keep their original case.
pub fn classify<'a, I>(rules: &[DayRuleSet], lines: I) -> Vec<MatchResult<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut results = Vec::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }
        let lowered = line.to_lowercase();

        for set in rules {
            for notation in set.matching(&lowered) {
                trace!(offset = set.day_offset(), ?notation, line, "date match");
                results.push(MatchResult {
                    day_offset: set.day_offset(),
                    notation,
                    line,
                });
            }
        }
    }

    // sort_by_key is stable, keeping discovery order within a day
    results.sort_by_key(|m| m.day_offset);
    results
}

/// Write matched lines, one per line, with no annotation
pub fn write_matches<W: Write>(out: &mut W, matches: &[MatchResult<'_>]) -> Result<()> {
    for m in matches {
        writeln!(out, "{}", m.line)?;
    }
    Ok(())
}
