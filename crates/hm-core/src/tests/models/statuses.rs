use crate::{OnboardingStatus, ProfileStatus, UserType};

use std::str::FromStr;

#[test]
fn test_profile_status_round_trip() {
    assert_eq!(ProfileStatus::Pending.as_str(), "pending");
    assert_eq!(ProfileStatus::Active.as_str(), "active");
    assert_eq!(
        ProfileStatus::from_str("active").unwrap(),
        ProfileStatus::Active
    );
    assert!(ProfileStatus::from_str("disabled").is_err());
}

#[test]
fn test_profile_status_default() {
    assert_eq!(ProfileStatus::default(), ProfileStatus::Pending);
}

#[test]
fn test_onboarding_status_round_trip() {
    assert_eq!(OnboardingStatus::Pending.as_str(), "pending");
    assert_eq!(OnboardingStatus::Completed.as_str(), "completed");
    assert_eq!(
        OnboardingStatus::from_str("completed").unwrap(),
        OnboardingStatus::Completed
    );
    assert!(OnboardingStatus::from_str("done").is_err());
}

#[test]
fn test_user_type_from_str() {
    assert_eq!(UserType::from_str("hotel").unwrap(), UserType::Hotel);
    assert_eq!(UserType::from_str("admin").unwrap(), UserType::Admin);
    assert_eq!(UserType::from_str("partner").unwrap(), UserType::Partner);
    assert!(UserType::from_str("guest").is_err());
}
