use crate::{HotelProfile, OnboardingStatus, ProfileStatus, UserProfile, UserType};

#[test]
fn test_new_profile_defaults_to_pending() {
    let profile = UserProfile::new(
        "user_123".to_string(),
        UserType::Hotel,
        "Ada".to_string(),
        "Lovelace".to_string(),
        "ada@example.com".to_string(),
    );

    assert_eq!(profile.status, ProfileStatus::Pending);
    assert_eq!(profile.onboarding_status, OnboardingStatus::Pending);
    assert!(!profile.is_onboarded());
}

#[test]
fn test_is_onboarded() {
    let mut profile = UserProfile::new(
        "user_123".to_string(),
        UserType::Hotel,
        "Ada".to_string(),
        "Lovelace".to_string(),
        "ada@example.com".to_string(),
    );
    profile.onboarding_status = OnboardingStatus::Completed;

    assert!(profile.is_onboarded());
}

#[test]
fn test_placeholder_hotel_owner() {
    let hotel = HotelProfile::placeholder("user_123".to_string(), "ada@example.com".to_string());

    assert_eq!(hotel.owner_id, "user_123");
    assert_eq!(hotel.hotel_name, "My Hotel");
    assert_eq!(hotel.email, "ada@example.com");
}
