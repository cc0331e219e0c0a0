//! Planner Library
//!
//! Finds lines in plain-text calendar files that mention today or one of the
//! next few days, and returns them in day order.
//! This library provides functionality to:
//! - Build per-day date matchers for `apr 26`, `26 april` and `4/26`
//! - Classify lines by the day they mention and sort them by day
//! - Resolve reference date expressions such as `today` or `friday+1`
//! - Locate, expand and read calendar files
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use planner::{build_rule_sets, classify};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 4, 26).unwrap();
//! let rules = build_rule_sets(today, 2).unwrap();
//!
//! let lines = ["4/27 dentist", "Meet Bob apr 26", "unrelated line"];
//! let found: Vec<_> = classify(&rules, lines).into_iter().map(|m| m.line).collect();
//! assert_eq!(found, vec!["Meet Bob apr 26", "4/27 dentist"]);
//! ```

pub mod error;
pub mod date;
pub mod rules;
pub mod classify;
pub mod source;
pub mod logging;

// Re-export commonly used items
pub use error::{Error, Result};
pub use rules::{build_rule_sets, DayRuleSet, Notation};
pub use classify::{classify, MatchResult};
