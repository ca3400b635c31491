use reqwest::StatusCode;
use snafu::Snafu;
use std::{fmt, num::ParseIntError};

pub type RosterResult<T> = Result<T, RosterError>;

/// The backend call an error happened in, used to prefix dialog text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    LoadStudents,
    FetchStudent,
    AddStudent,
    UpdateStudent,
    DeleteStudent,
}

impl Operation {
    /// Shown when the backend acknowledges a change without saying anything itself.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::LoadStudents | Self::FetchStudent => "Done",
            Self::AddStudent => "Student added",
            Self::UpdateStudent => "Student updated",
            Self::DeleteStudent => "Student deleted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoadStudents => "Error loading students",
            Self::FetchStudent => "Error loading student details",
            Self::AddStudent => "Error adding student",
            Self::UpdateStudent => "Error updating student",
            Self::DeleteStudent => "Error deleting student",
        })
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse backend URL {:?}", original))]
    ParseUrl {
        source: url::ParseError,
        original: String,
    },
    #[snafu(display("Backend URL {:?} cannot have path segments", original))]
    BaseUrlCannotBeABase { original: String },
    #[snafu(display("Unable to parse request timeout {:?}", original))]
    ParseTimeout {
        source: ParseIntError,
        original: String,
    },
    #[snafu(display("Unable to build HTTP client"))]
    BuildClient { source: reqwest::Error },
    #[snafu(display("Error: unique number is not set"))]
    MissingUniqueNumber,
    #[snafu(display("{}: {}", operation, source))]
    Transport {
        source: reqwest::Error,
        operation: Operation,
    },
    #[snafu(display("{}: {}", operation, body))]
    Rejected {
        operation: Operation,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("{}: unexpected response {:?}", operation, body))]
    Decode {
        source: serde_json::Error,
        operation: Operation,
        body: String,
    },
}

impl RosterError {
    /// Local failures never reached the network.
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::MissingUniqueNumber)
    }
}
