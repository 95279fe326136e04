//! Core record types for sims.
//!
//! This module defines [`StudentRecord`], the unit entity stored by the
//! service, along with its JSON representation, and [`Field`], the value of
//! one known record field.

use std::borrow::Cow;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// The value of one known field, kept exactly as it appeared in the JSON.
///
/// A field may be absent, `null`, a string, a number or a boolean. It is
/// written back with its original type and omitted when it was absent, so a
/// data file the service did not write survives a load and save unchanged.
/// Comparisons and display go through [`Field::text`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field(Option<Value>);

impl Field {
    /// A field that was not present.
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    /// Check whether the field was not present at all.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// The raw JSON value, if present.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    /// String form of the value, as the browser client would print it.
    ///
    /// Strings are returned as is, numbers in their shortest form (`2.0`
    /// reads as `"2"`), booleans as `"true"`/`"false"`. Absent and `null`
    /// read as the empty string.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match &self.0 {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(Value::Number(n)) => Cow::Owned(number_text(n)),
            Some(Value::Bool(b)) => Cow::Borrowed(if *b { "true" } else { "false" }),
            // Containers never get past deserialization.
            None | Some(Value::Null | Value::Array(_) | Value::Object(_)) => Cow::Borrowed(""),
        }
    }

    /// Check whether the string form is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Self(Some(Value::String(s.to_string())))
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Self(Some(Value::String(s)))
    }
}

impl From<Option<String>> for Field {
    fn from(s: Option<String>) -> Self {
        s.map_or_else(Self::absent, Self::from)
    }
}

/// Compares the string form, so `1001` equals `"1001"`.
impl PartialEq<str> for Field {
    fn eq(&self, other: &str) -> bool {
        self.text() == other
    }
}

impl PartialEq<&str> for Field {
    fn eq(&self, other: &&str) -> bool {
        self.text() == *other
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            value @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
                Ok(Self(Some(value)))
            }
            other => Err(D::Error::custom(format!(
                "expected a string or number, found {other}"
            ))),
        }
    }
}

/// A single student as stored in the data file and exchanged over HTTP.
///
/// Known fields are [`Field`]s and keep whatever scalar type they arrived
/// with. Any fields the service does not know about are kept in
/// [`StudentRecord::extra`] and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Unique key across the collection.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub student_id: Field,

    /// Display name.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub full_name: Field,

    /// Expected to be "male" or "female", not enforced.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub gender: Field,

    /// Contact address, expected to be a gmail.com address.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub gmail: Field,

    /// Degree program.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub program: Field,

    /// Year level, a positive number.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub year_level: Field,

    /// University name.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub university: Field,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StudentRecord {
    /// Create a record with the three required fields set.
    #[must_use]
    pub fn new(
        student_id: impl Into<Field>,
        full_name: impl Into<Field>,
        gmail: impl Into<Field>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            full_name: full_name.into(),
            gmail: gmail.into(),
            ..Self::default()
        }
    }

    /// Check whether any of `studentId`, `fullName` or `gmail` is empty.
    #[must_use]
    pub fn missing_required(&self) -> bool {
        self.student_id.is_empty() || self.full_name.is_empty() || self.gmail.is_empty()
    }

    /// Check whether this record's id, in string form, equals `student_id`.
    #[must_use]
    pub fn has_id(&self, student_id: &str) -> bool {
        self.student_id == student_id
    }

    /// Case-insensitive comparison of the gender field.
    #[must_use]
    pub fn gender_is(&self, gender: &str) -> bool {
        self.gender.text().to_lowercase() == gender.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ann() -> StudentRecord {
        StudentRecord {
            gender: "female".into(),
            program: "CS".into(),
            year_level: "2".into(),
            university: "X".into(),
            ..StudentRecord::new("S1", "Ann Lee", "ann@gmail.com")
        }
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let value = serde_json::to_value(ann()).unwrap();
        assert_eq!(
            value,
            json!({
                "studentId": "S1",
                "fullName": "Ann Lee",
                "gender": "female",
                "gmail": "ann@gmail.com",
                "program": "CS",
                "yearLevel": "2",
                "university": "X"
            })
        );
    }

    #[test]
    fn test_deserialize_full_record() {
        let record: StudentRecord = serde_json::from_value(json!({
            "studentId": "S1",
            "fullName": "Ann Lee",
            "gender": "female",
            "gmail": "ann@gmail.com",
            "program": "CS",
            "yearLevel": "2",
            "university": "X"
        }))
        .unwrap();
        assert_eq!(record, ann());
    }

    #[test]
    fn test_numbers_keep_their_type() {
        let input = json!({"studentId": 42, "yearLevel": 3, "gmail": "a@gmail.com"});
        let record: StudentRecord = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(record.student_id, "42");
        assert_eq!(record.year_level, "3");
        assert_eq!(record.student_id.value(), Some(&json!(42)));
        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn test_number_text_matches_browser_form() {
        let record: StudentRecord =
            serde_json::from_str(r#"{"studentId": 2.0, "yearLevel": 1.5, "program": -7}"#)
                .unwrap();
        assert_eq!(record.student_id.text(), "2");
        assert_eq!(record.year_level.text(), "1.5");
        assert_eq!(record.program.text(), "-7");
        assert!(record.has_id("2"));
        assert!(!record.has_id("2.0"));
    }

    #[test]
    fn test_booleans_read_as_words() {
        let record: StudentRecord = serde_json::from_value(json!({"program": true})).unwrap();
        assert_eq!(record.program.text(), "true");
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"program": true}));
    }

    #[test]
    fn test_missing_and_null_fields_are_empty() {
        let record: StudentRecord =
            serde_json::from_value(json!({"studentId": "S1", "gmail": null})).unwrap();
        assert_eq!(record.student_id, "S1");
        assert!(record.full_name.is_empty());
        assert!(record.full_name.is_absent());
        assert!(record.gmail.is_empty());
        assert!(!record.gmail.is_absent());
        assert!(record.missing_required());
    }

    #[test]
    fn test_absent_fields_are_not_written_back() {
        let input = json!({"studentId": "S1", "gmail": null, "yearLevel": 2});
        let record: StudentRecord = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn test_nested_value_is_rejected() {
        let result = serde_json::from_value::<StudentRecord>(json!({"studentId": {"a": 1}}));
        assert!(result.is_err());
        let result = serde_json::from_value::<StudentRecord>(json!({"gmail": ["a"]}));
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_fields_are_preserved() {
        let input = json!({
            "studentId": "S1",
            "fullName": "Ann Lee",
            "gmail": "ann@gmail.com",
            "section": "B"
        });
        let record: StudentRecord = serde_json::from_value(input).unwrap();
        assert_eq!(record.extra.get("section"), Some(&json!("B")));

        let output = serde_json::to_value(&record).unwrap();
        assert_eq!(output["section"], json!("B"));
    }

    #[test]
    fn test_missing_required() {
        assert!(!ann().missing_required());
        assert!(StudentRecord::new("", "Ann", "ann@gmail.com").missing_required());
        assert!(StudentRecord::new("S1", "", "ann@gmail.com").missing_required());
        assert!(StudentRecord::new("S1", "Ann", "").missing_required());
    }

    #[test]
    fn test_has_id_is_exact() {
        let record = ann();
        assert!(record.has_id("S1"));
        assert!(!record.has_id("s1"));
        assert!(!record.has_id("S1 "));
    }

    #[test]
    fn test_gender_is_case_insensitive() {
        let mut record = ann();
        record.gender = "Female".into();
        assert!(record.gender_is("female"));
        assert!(!record.gender_is("male"));
    }

    #[test]
    fn test_field_from_option() {
        assert!(Field::from(None::<String>).is_absent());
        assert_eq!(Field::from(Some("x".to_string())), "x");
        assert_eq!(Field::absent().to_string(), "");
    }
}
