//! View filters over an already-loaded collection.
//!
//! These mirror the filters the browser page offers. They never touch the
//! store; callers load the collection first and filter the result.

use crate::record::StudentRecord;

/// A view filter over student records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordFilter {
    /// Every record.
    #[default]
    All,
    /// Case-insensitive substring match on name, program or gender.
    Text(String),
    /// Records whose gender equals the given value, ignoring case.
    Gender(String),
}

impl RecordFilter {
    /// Filter on free text. Surrounding whitespace in `query` is ignored.
    #[must_use]
    pub fn text(query: impl AsRef<str>) -> Self {
        Self::Text(query.as_ref().trim().to_lowercase())
    }

    /// Only records with gender "male".
    #[must_use]
    pub fn male() -> Self {
        Self::Gender("male".to_string())
    }

    /// Only records with gender "female".
    #[must_use]
    pub fn female() -> Self {
        Self::Gender("female".to_string())
    }

    /// Check a single record.
    #[must_use]
    pub fn matches(&self, record: &StudentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Text(query) => [&record.full_name, &record.program, &record.gender]
                .iter()
                .any(|field| field.text().to_lowercase().contains(query.as_str())),
            Self::Gender(gender) => record.gender_is(gender),
        }
    }

    /// Keep the matching records, preserving order.
    #[must_use]
    pub fn apply(&self, records: Vec<StudentRecord>) -> Vec<StudentRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
