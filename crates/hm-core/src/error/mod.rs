use error_location::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid user type: {value} {location}")]
    InvalidUserType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid profile status: {value} {location}")]
    InvalidProfileStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid onboarding status: {value} {location}")]
    InvalidOnboardingStatus {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
