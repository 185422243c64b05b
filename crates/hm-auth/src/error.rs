use error_location::ErrorLocation;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown role in identity metadata: {value} {location}")]
    UnknownRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Identity not found: {user_id} {location}")]
    IdentityNotFound {
        user_id: String,
        location: ErrorLocation,
    },

    #[error("Identity provider unavailable: {message} {location}")]
    ProviderUnavailable {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, AuthError>;
