//! Calendar files: where they are, reading them, and running each one
//! through the classifier

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, info, warn};

use crate::classify::{classify, write_matches};
use crate::error::{Error, Result};
use crate::rules::DayRuleSet;

/// Location of the default calendar, relative to the home directory
pub const DEFAULT_CALENDAR: &str = "lib/calendar";

/// The calendar file read when no files are given: `$HOME/lib/calendar`
pub fn default_calendar_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CALENDAR))
        .ok_or(Error::NoHomeDirectory)
}

/// Expand glob patterns in input paths
///
/// Arguments keep their command-line order. Matches of a single pattern are
/// sorted so expansion is deterministic.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        // Check if pattern contains glob characters
        if !(pattern.contains('*') || pattern.contains('?') || pattern.contains('[')) {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let entries = glob(pattern).map_err(|e| Error::InvalidGlob(format!("{}: {}", pattern, e)))?;
        let mut matched = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => matched.push(path),
                Err(e) => warn!(pattern = %pattern, error = %e, "glob error"),
            }
        }
        if matched.is_empty() {
            return Err(Error::NoFilesMatched(pattern.clone()));
        }
        matched.sort();
        paths.extend(matched);
    }

    Ok(paths)
}

/// Read a whole calendar file
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_calendar(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the matching lines of one calendar's text, ordered by day
///
/// Records are split on `\n` only, so a `\r` from CRLF files stays part of
/// the line and is echoed back unchanged. Returns the number of lines written.
pub fn filter_text<W: Write>(text: &str, rules: &[DayRuleSet], out: &mut W) -> Result<usize> {
    let matches = classify(rules, text.split('\n'));
    write_matches(out, &matches)?;
    Ok(matches.len())
}

/// Run every file through the classifier, one after another
///
/// Each file is sorted on its own and written before the next is read. The
/// first unreadable file stops the run; output for earlier files has already
/// been written.
pub fn filter_files<W: Write>(paths: &[PathBuf], rules: &[DayRuleSet], out: &mut W) -> Result<usize> {
    info!(files = paths.len(), days = rules.len(), "filtering calendars");

    let mut total = 0;
    for path in paths {
        let text = read_calendar(path)?;
        let written = filter_text(&text, rules, out)?;
        out.flush()?;
        debug!(path = %path.display(), matches = written, "calendar done");
        total += written;
    }

    Ok(total)
}
