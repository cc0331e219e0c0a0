//! Per-day date matchers
//!
//! Each day in the window gets a [`DayRuleSet`]: three regular expressions
//! recognizing that one calendar date as `apr 26`, `26 april` and `4/26`.
//! Matchers run against lower-cased text, so the templates only need
//! lower-case letters.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::debug;

use crate::date::window;
use crate::error::Result;

/// Largest window the command line accepts, about ten years of days
pub const MAX_DAYS: u32 = 3660;

/// A way of writing a calendar date in a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Month name then day: `apr 26`, `April 26`
    MonthDay,
    /// Day then month name: `26 apr`, `26 April`
    DayMonth,
    /// Month number, slash, day number: `4/26`
    Numeric,
}

impl Notation {
    /// All notations, in the order a line is tested against them
    pub const ALL: [Notation; 3] = [Notation::MonthDay, Notation::DayMonth, Notation::Numeric];

    /// Regular expression source recognizing `date` in this notation
    ///
    /// Only the first three letters of the month name are significant; any
    /// further letters are accepted. Numbers carry no leading zeros.
    pub fn pattern(self, date: NaiveDate) -> String {
        let month = date.month();
        let day = date.day();
        let abbrev = date.format("%b").to_string().to_lowercase();

        match self {
            Notation::MonthDay => format!(r"(?:^|[^a-z]){abbrev}[a-z]* {day}(?:$|[^0-9])"),
            Notation::DayMonth => format!(r"(?:^|[^0-9]){day} {abbrev}[a-z]*"),
            // A leading "digit/" lets "4/26" match inside "3/4/26".
            Notation::Numeric => format!(r"(?:^|[^0-9]|[0-9]/){month}/{day}(?:$|[^0-9])"),
        }
    }
}

/// One compiled date pattern
#[derive(Debug, Clone)]
pub struct Matcher {
    notation: Notation,
    regex: Regex,
}

impl Matcher {
    /// Compile the matcher for `date` written in `notation`
    pub fn new(notation: Notation, date: NaiveDate) -> Result<Self> {
        let regex = Regex::new(&notation.pattern(date))?;
        Ok(Self { notation, regex })
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    /// The compiled pattern source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Test an already lower-cased line
    pub fn is_match(&self, lowered: &str) -> bool {
        self.regex.is_match(lowered)
    }
}

/// The matchers for a single day of the window
#[derive(Debug, Clone)]
pub struct DayRuleSet {
    day_offset: usize,
    date: NaiveDate,
    matchers: [Matcher; 3],
}

impl DayRuleSet {
    /// Build the rules for `date`, the `day_offset`-th day of the window (1-based)
    pub fn new(day_offset: usize, date: NaiveDate) -> Result<Self> {
        let [month_day, day_month, numeric] = Notation::ALL;
        let matchers = [
            Matcher::new(month_day, date)?,
            Matcher::new(day_month, date)?,
            Matcher::new(numeric, date)?,
        ];
        Ok(Self { day_offset, date, matchers })
    }

    pub fn day_offset(&self) -> usize {
        self.day_offset
    }

    /// The calendar date all three matchers recognize
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn matchers(&self) -> &[Matcher; 3] {
        &self.matchers
    }

    /// Notations that match `lowered`, once per matching matcher, in notation order
    pub fn matching<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = Notation> + 'a {
        self.matchers
            .iter()
            .filter(move |m| m.is_match(lowered))
            .map(Matcher::notation)
    }
}

/// Build one [`DayRuleSet`] per day for `days` days starting at `today`
///
/// Offset `k` (1-based) recognizes `today + (k - 1)` days. A window of zero
/// days yields no rules.
pub fn build_rule_sets(today: NaiveDate, days: usize) -> Result<Vec<DayRuleSet>> {
    let rules = window(today, days)
        .enumerate()
        .map(|(i, date)| DayRuleSet::new(i + 1, date))
        .collect::<Result<Vec<_>>>()?;

    for set in &rules {
        debug!(
            offset = set.day_offset(),
            date = %set.date(),
            patterns = ?set.matchers().iter().map(Matcher::as_str).collect::<Vec<_>>(),
            "built day rules"
        );
    }

    Ok(rules)
}
