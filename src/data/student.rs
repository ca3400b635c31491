use serde::{Deserialize, Serialize};
use std::fmt;

/// A student as the backend returns it.
///
/// Every field is defaulted as the backend omits `null`s entirely, and the
/// backend-internal `id` it also sends is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub unique_number: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
}

impl Student {
    pub fn unique_number(&self) -> Option<UniqueNumber> {
        UniqueNumber::new(&self.unique_number)
    }
}

/// Key of an existing student, used in single-resource URLs.
///
/// Kept byte for byte as the backend reported it, surrounding whitespace included, so that
/// `"S1 "` and `"S1"` address different records. Whitespace-only keys are not keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueNumber(String);

impl UniqueNumber {
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let raw = raw.as_ref();
        (!raw.trim().is_empty()).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Only a truly empty input counts as blank. Anything else, whitespace included, is sent as typed.
fn blank_to_none(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Fields of the "add" form, exactly as the browser submits them.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AddStudentForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub birth_date: Option<String>,
    pub group_name: Option<String>,
    pub unique_number: Option<String>,
}

/// POST body: all six keys are always present, blanks become `null`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub birth_date: Option<String>,
    pub group_name: Option<String>,
    pub unique_number: Option<String>,
}

impl From<AddStudentForm> for NewStudent {
    fn from(form: AddStudentForm) -> Self {
        Self {
            first_name: blank_to_none(form.first_name),
            last_name: blank_to_none(form.last_name),
            patronymic: blank_to_none(form.patronymic),
            birth_date: blank_to_none(form.birth_date),
            group_name: blank_to_none(form.group_name),
            unique_number: blank_to_none(form.unique_number),
        }
    }
}

/// Fields of the "update" form. `unique_number` is the hidden input filled in by the prefill.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateStudentForm {
    pub unique_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub birth_date: Option<String>,
    pub group_name: Option<String>,
}

impl UpdateStudentForm {
    pub fn into_parts(self) -> (Option<UniqueNumber>, StudentChanges) {
        let unique_number = self.unique_number.as_deref().and_then(UniqueNumber::new);
        let changes = StudentChanges {
            first_name: blank_to_none(self.first_name),
            last_name: blank_to_none(self.last_name),
            patronymic: blank_to_none(self.patronymic),
            birth_date: blank_to_none(self.birth_date),
            group_name: blank_to_none(self.group_name),
        };
        (unique_number, changes)
    }
}

/// PUT body: a missing field means "leave unchanged" and is left out of the JSON.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

/// Body of a successful mutation. The backend sometimes answers `200` with an `error` instead.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ApiMessage {
    pub message: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_form_blanks_become_nulls() {
        let form = AddStudentForm {
            first_name: Some("Ann".into()),
            last_name: Some(String::new()),
            patronymic: None,
            birth_date: Some(String::new()),
            group_name: Some("G1".into()),
            unique_number: Some("S1".into()),
        };

        let body = serde_json::to_value(NewStudent::from(form)).unwrap();
        assert_eq!(
            body,
            json!({
                "firstName": "Ann",
                "lastName": null,
                "patronymic": null,
                "birthDate": null,
                "groupName": "G1",
                "uniqueNumber": "S1",
            })
        );
    }

    #[test]
    fn whitespace_is_sent_as_typed() {
        let form = AddStudentForm {
            first_name: Some(" ".into()),
            group_name: Some(" G1 ".into()),
            unique_number: Some("S1 ".into()),
            ..Default::default()
        };

        let body = serde_json::to_value(NewStudent::from(form)).unwrap();
        assert_eq!(body["firstName"], json!(" "));
        assert_eq!(body["groupName"], json!(" G1 "));
        assert_eq!(body["uniqueNumber"], json!("S1 "));

        let changes = UpdateStudentForm {
            unique_number: Some("S1".into()),
            last_name: Some("  ".into()),
            ..Default::default()
        }
        .into_parts()
        .1;
        assert_eq!(
            serde_json::to_value(changes).unwrap(),
            json!({ "lastName": "  " })
        );
    }

    #[test]
    fn update_form_omits_untouched_fields() {
        let form = UpdateStudentForm {
            unique_number: Some("S1".into()),
            group_name: Some("G2".into()),
            first_name: Some(String::new()),
            ..Default::default()
        };

        let (unique_number, changes) = form.into_parts();
        assert_eq!(unique_number.as_ref().map(UniqueNumber::as_str), Some("S1"));
        assert_eq!(
            serde_json::to_value(changes).unwrap(),
            json!({ "groupName": "G2" })
        );
    }

    #[test]
    fn blank_unique_number_is_rejected() {
        assert!(UniqueNumber::new("").is_none());
        assert!(UniqueNumber::new("   ").is_none());
        assert_eq!(UniqueNumber::new(" S1 ").unwrap().as_str(), " S1 ");

        let (unique_number, _) = UpdateStudentForm::default().into_parts();
        assert!(unique_number.is_none());
    }

    #[test]
    fn student_tolerates_missing_fields_and_backend_id() {
        let student: Student = serde_json::from_value(json!({
            "id": 4,
            "firstName": "Ann",
            "birthDate": "2000-01-01",
            "patronymic": null,
        }))
        .unwrap();

        assert_eq!(student.first_name.as_deref(), Some("Ann"));
        assert_eq!(student.patronymic, None);
        assert_eq!(student.group_name, None);
        assert!(student.unique_number().is_none());
    }
}
