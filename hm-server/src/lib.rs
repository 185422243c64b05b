pub mod api;
pub mod authz;
pub mod error;
pub mod gate;
pub mod health;
pub mod logger;
pub mod pages;
pub mod routes;
pub mod state;
pub mod workflows;

pub use error::{Result, ServerError};
pub use routes::build_router;
pub use state::AppState;
