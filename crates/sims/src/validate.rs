//! Candidate record validation.
//!
//! The API always checks required fields. Gmail format and year level are
//! checked by the browser before submission; [`ValidationPolicy::Strict`]
//! repeats those checks on the server.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::record::StudentRecord;

/// Pattern a gmail address must match. Case-insensitive, like the client.
const GMAIL_PATTERN: &str = r"(?i)^[^@\s]+@gmail\.com$";

fn gmail_regex() -> &'static Regex {
    static GMAIL: OnceLock<Regex> = OnceLock::new();
    GMAIL.get_or_init(|| Regex::new(GMAIL_PATTERN).expect("gmail pattern is valid"))
}

/// How much of a candidate record the server checks on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Only `studentId`, `fullName` and `gmail` presence.
    #[default]
    Presence,
    /// Presence plus gmail pattern and positive year level.
    Strict,
}

impl ValidationPolicy {
    /// Map the `validation.strict` config flag to a policy.
    #[must_use]
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Presence
        }
    }

    /// Validate a candidate record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFields`] first, then in strict mode
    /// [`Error::InvalidGmail`] or [`Error::InvalidYearLevel`].
    pub fn check(self, record: &StudentRecord) -> Result<()> {
        if record.missing_required() {
            return Err(Error::MissingFields);
        }
        if self == Self::Presence {
            return Ok(());
        }
        let gmail = record.gmail.text();
        if !is_gmail(&gmail) {
            return Err(Error::InvalidGmail {
                gmail: gmail.into_owned(),
            });
        }
        let year_level = record.year_level.text();
        if !is_positive_number(&year_level) {
            return Err(Error::InvalidYearLevel {
                year_level: year_level.into_owned(),
            });
        }
        Ok(())
    }
}

/// Check an address against the gmail pattern.
#[must_use]
pub fn is_gmail(address: &str) -> bool {
    gmail_regex().is_match(address)
}

/// Check that a value parses as a number greater than zero.
///
/// Surrounding whitespace is ignored; an empty value is not positive.
#[must_use]
pub fn is_positive_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|n| !n.is_nan() && n > 0.0)
}
