//! JSON API surface.
//!
//! These routes are skipped by the page middleware; authentication
//! happens per-handler via the `Session` extractor (webhooks verify a
//! payload signature instead).

pub mod error;
pub mod extractors;
pub mod onboarding;
pub mod partners;
pub mod profile;
pub mod webhooks;

pub use error::{ApiError, Result};
