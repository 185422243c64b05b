pub mod hotel_profile_repository;
pub mod partner_profile_repository;
pub mod user_profile_repository;
