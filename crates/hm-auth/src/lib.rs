pub mod claims;
pub mod error;
pub mod http_provider;
pub mod identity_provider;
pub mod in_memory_provider;
pub mod jwt_validator;
pub mod webhook;


pub use claims::Claims;
pub use error::{AuthError, Result};
pub use http_provider::HttpIdentityProvider;
pub use identity_provider::{Identity, IdentityProvider, parse_role};
pub use in_memory_provider::InMemoryIdentityProvider;
pub use jwt_validator::JwtValidator;
pub use webhook::{WEBHOOK_SIGNATURE_HEADER, sign_payload, verify_signature};
