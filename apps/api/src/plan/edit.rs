//! Single-field edits to a [`PlanRecord`].

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::models::plan::PlanRecord;
use crate::plan::PlanError;

/// Names of the editable fields, spelled as they appear in the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    FirstName,
    LastName,
    Field,
    Position,
    Company,
    CompanyUrl,
    Requirements,
    Location,
    Reason,
    JobOptions,
    SelectedJobOption,
    SignatureData,
    Date,
}

impl PlanField {
    pub const ALL: [PlanField; 13] = [
        PlanField::FirstName,
        PlanField::LastName,
        PlanField::Field,
        PlanField::Position,
        PlanField::Company,
        PlanField::CompanyUrl,
        PlanField::Requirements,
        PlanField::Location,
        PlanField::Reason,
        PlanField::JobOptions,
        PlanField::SelectedJobOption,
        PlanField::SignatureData,
        PlanField::Date,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlanField::FirstName => "firstName",
            PlanField::LastName => "lastName",
            PlanField::Field => "field",
            PlanField::Position => "position",
            PlanField::Company => "company",
            PlanField::CompanyUrl => "companyUrl",
            PlanField::Requirements => "requirements",
            PlanField::Location => "location",
            PlanField::Reason => "reason",
            PlanField::JobOptions => "jobOptions",
            PlanField::SelectedJobOption => "selectedJobOption",
            PlanField::SignatureData => "signatureData",
            PlanField::Date => "date",
        }
    }
}

impl fmt::Display for PlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanField {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| PlanError::UnknownField(s.to_string()))
    }
}

/// Replacement of exactly one field. Values are not validated beyond their type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEdit {
    FirstName(String),
    LastName(String),
    Field(String),
    Position(String),
    Company(String),
    CompanyUrl(String),
    Requirements(Vec<String>),
    Location(String),
    Reason(String),
    JobOptions(Vec<String>),
    SelectedJobOption(String),
    SignatureData(Option<String>),
    Date(String),
}

impl PlanEdit {
    pub fn field(&self) -> PlanField {
        match self {
            PlanEdit::FirstName(_) => PlanField::FirstName,
            PlanEdit::LastName(_) => PlanField::LastName,
            PlanEdit::Field(_) => PlanField::Field,
            PlanEdit::Position(_) => PlanField::Position,
            PlanEdit::Company(_) => PlanField::Company,
            PlanEdit::CompanyUrl(_) => PlanField::CompanyUrl,
            PlanEdit::Requirements(_) => PlanField::Requirements,
            PlanEdit::Location(_) => PlanField::Location,
            PlanEdit::Reason(_) => PlanField::Reason,
            PlanEdit::JobOptions(_) => PlanField::JobOptions,
            PlanEdit::SelectedJobOption(_) => PlanField::SelectedJobOption,
            PlanEdit::SignatureData(_) => PlanField::SignatureData,
            PlanEdit::Date(_) => PlanField::Date,
        }
    }

    /// Builds an edit from a wire field name and a JSON value.
    ///
    /// List fields accept either an array of strings or one string with a line per item.
    pub fn from_json(name: &str, value: Value) -> Result<Self, PlanError> {
        let field: PlanField = name.parse()?;
        let edit = match field {
            PlanField::FirstName => PlanEdit::FirstName(expect_string(field, value)?),
            PlanField::LastName => PlanEdit::LastName(expect_string(field, value)?),
            PlanField::Field => PlanEdit::Field(expect_string(field, value)?),
            PlanField::Position => PlanEdit::Position(expect_string(field, value)?),
            PlanField::Company => PlanEdit::Company(expect_string(field, value)?),
            PlanField::CompanyUrl => PlanEdit::CompanyUrl(expect_string(field, value)?),
            PlanField::Requirements => PlanEdit::Requirements(expect_list(field, value)?),
            PlanField::Location => PlanEdit::Location(expect_string(field, value)?),
            PlanField::Reason => PlanEdit::Reason(expect_string(field, value)?),
            PlanField::JobOptions => PlanEdit::JobOptions(expect_list(field, value)?),
            PlanField::SelectedJobOption => {
                PlanEdit::SelectedJobOption(expect_string(field, value)?)
            }
            PlanField::SignatureData => match value {
                Value::Null => PlanEdit::SignatureData(None),
                Value::String(s) => PlanEdit::SignatureData(Some(s)),
                _ => return Err(invalid(field, "a string or null")),
            },
            PlanField::Date => PlanEdit::Date(expect_string(field, value)?),
        };
        Ok(edit)
    }

    /// Returns a copy of `record` with this edit's field replaced.
    pub fn apply(self, record: &PlanRecord) -> PlanRecord {
        let mut next = record.clone();
        match self {
            PlanEdit::FirstName(v) => next.first_name = v,
            PlanEdit::LastName(v) => next.last_name = v,
            PlanEdit::Field(v) => next.field = v,
            PlanEdit::Position(v) => next.position = v,
            PlanEdit::Company(v) => next.company = v,
            PlanEdit::CompanyUrl(v) => next.company_url = v,
            PlanEdit::Requirements(v) => next.requirements = v,
            PlanEdit::Location(v) => next.location = v,
            PlanEdit::Reason(v) => next.reason = v,
            PlanEdit::JobOptions(v) => next.job_options = v,
            PlanEdit::SelectedJobOption(v) => next.selected_job_option = v,
            PlanEdit::SignatureData(v) => next.signature_data = v,
            PlanEdit::Date(v) => next.date = v,
        }
        next
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

fn invalid(field: PlanField, expected: &'static str) -> PlanError {
    PlanError::InvalidValue {
        field: field.name(),
        expected,
    }
}

fn expect_string(field: PlanField, value: Value) -> Result<String, PlanError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(invalid(field, "a string")),
    }
}

fn expect_list(field: PlanField, value: Value) -> Result<Vec<String>, PlanError> {
    match value {
        Value::String(s) => Ok(split_lines(&s)),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(invalid(field, "an array of strings")),
            })
            .collect(),
        _ => Err(invalid(field, "an array of strings")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PlanRecord {
        PlanRecord::with_date("October 14, 2026")
    }

    #[test]
    fn test_field_names_round_trip_through_from_str() {
        for field in PlanField::ALL {
            assert_eq!(field.name().parse::<PlanField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = PlanEdit::from_json("salary", json!("100")).unwrap_err();
        assert!(matches!(err, PlanError::UnknownField(name) if name == "salary"));
    }

    #[test]
    fn test_apply_replaces_only_one_field() {
        let before = sample();
        let after = PlanEdit::Location("Mombasa".to_string()).apply(&before);
        assert_eq!(after.location, "Mombasa");
        assert_eq!(before.location, "Nairobi, Kenya");

        let mut expected = before.clone();
        expected.location = "Mombasa".to_string();
        assert_eq!(after, expected);
    }

    #[test]
    fn test_string_field_rejects_number() {
        let err = PlanEdit::from_json("firstName", json!(42)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidValue { field: "firstName", .. }));
    }

    #[test]
    fn test_list_field_accepts_array() {
        let edit = PlanEdit::from_json("jobOptions", json!(["A", "B"])).unwrap();
        assert_eq!(
            edit,
            PlanEdit::JobOptions(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn test_list_field_splits_text_on_newlines() {
        let edit = PlanEdit::from_json("requirements", json!("Degree\n\nLicense")).unwrap();
        assert_eq!(
            edit,
            PlanEdit::Requirements(vec![
                "Degree".to_string(),
                String::new(),
                "License".to_string()
            ])
        );
    }

    #[test]
    fn test_list_field_rejects_mixed_array() {
        assert!(PlanEdit::from_json("requirements", json!(["ok", 1])).is_err());
    }

    #[test]
    fn test_signature_accepts_null_and_string() {
        assert_eq!(
            PlanEdit::from_json("signatureData", Value::Null).unwrap(),
            PlanEdit::SignatureData(None)
        );
        assert_eq!(
            PlanEdit::from_json("signatureData", json!("data:image/png;base64,AA==")).unwrap(),
            PlanEdit::SignatureData(Some("data:image/png;base64,AA==".to_string()))
        );
        assert!(PlanEdit::from_json("signatureData", json!(true)).is_err());
    }

    #[test]
    fn test_selection_is_not_checked_against_options() {
        let after = PlanEdit::SelectedJobOption("Astronaut".to_string()).apply(&sample());
        assert_eq!(after.selected_job_option, "Astronaut");
        assert!(!after.has_listed_selection());
    }

    #[test]
    fn test_edit_reports_its_field() {
        assert_eq!(
            PlanEdit::Requirements(vec![]).field(),
            PlanField::Requirements
        );
        assert_eq!(PlanField::SignatureData.to_string(), "signatureData");
    }
}
