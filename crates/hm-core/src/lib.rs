pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::hotel_profile::HotelProfile;
pub use models::onboarding_status::OnboardingStatus;
pub use models::partner_profile::PartnerProfile;
pub use models::profile_status::ProfileStatus;
pub use models::role::Role;
pub use models::user_profile::UserProfile;
pub use models::user_type::UserType;
