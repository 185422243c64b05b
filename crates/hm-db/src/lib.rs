pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::hotel_profile_repository::HotelProfileRepository;
pub use repositories::partner_profile_repository::PartnerProfileRepository;
pub use repositories::user_profile_repository::UserProfileRepository;
