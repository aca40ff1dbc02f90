use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use super::ClientError;
use crate::utils::email::{validate_email_pattern, validate_not_blank};

pub const OTHER_COLLEGE: &str = "other";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub email: String,
}

/// The college picker form. `college` is a known identifier or `"other"`,
/// in which case `custom_college_name` names it.
#[derive(Clone, Debug, Default, Validate)]
#[validate(schema(function = "validate_custom_college"))]
pub struct CollegeSelection {
    #[validate(custom(function = "validate_not_blank"))]
    pub college: String,
    pub custom_college_name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub student_name: String,
    #[validate(custom(function = "validate_email_pattern"))]
    pub student_email: String,
}

fn validate_custom_college(selection: &CollegeSelection) -> Result<(), ValidationError> {
    if selection.college.trim() == OTHER_COLLEGE && selection.custom_college_name.trim().is_empty()
    {
        let mut err = ValidationError::new("custom_college_required");
        err.message = Some("Please enter your college name.".into());
        return Err(err);
    }
    Ok(())
}

impl CollegeSelection {
    /// Validate the form and turn it into the college to browse and the
    /// student posting from it.
    pub fn resolve(&self) -> Result<(String, Student), ClientError> {
        self.validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let college = if self.college.trim() == OTHER_COLLEGE {
            self.custom_college_name.trim()
        } else {
            self.college.trim()
        };
        let student = Student {
            name: self.student_name.trim().to_string(),
            email: self.student_email.trim().to_string(),
        };
        Ok((college.to_string(), student))
    }
}

/// What the board remembers between runs, so a returning student skips the
/// college picker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPrefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_college: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_student: Option<Student>,
}

impl ClientPrefs {
    pub fn default_path() -> PathBuf {
        PathBuf::from(".campus-lost-found.json")
    }

    /// Missing file means no saved choice yet.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ClientError> {
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn clear(path: &Path) -> Result<(), ClientError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.selected_college.is_some() && self.current_student.is_some()
    }
}
