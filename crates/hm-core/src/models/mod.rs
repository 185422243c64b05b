pub mod hotel_profile;
pub mod onboarding_status;
pub mod partner_profile;
pub mod profile_status;
pub mod role;
pub mod user_profile;
pub mod user_type;
