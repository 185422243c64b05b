//! Multi-step business workflows spanning the identity provider and the
//! profile store.

pub mod onboarding;
pub mod provisioning;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Invalid field '{field}': {message}")]
    InvalidPayload { field: &'static str, message: String },

    #[error("Submitted user id does not match the authenticated session")]
    IdentityMismatch,

    #[error("Step '{step}' failed: {message}")]
    Upstream { step: &'static str, message: String },

    /// Earlier steps were rolled back, but the overall submission failed.
    #[error("Step '{step}' failed after partial progress: {message}")]
    PartialFailure { step: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
