use crate::{Role, UserType};

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::HotelOwner.as_str(), "hotel_owner");
    assert_eq!(Role::Partner.as_str(), "partner");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("hotel_owner").unwrap(), Role::HotelOwner);
    assert_eq!(Role::from_str("partner").unwrap(), Role::Partner);
    assert!(Role::from_str("superuser").is_err());
    assert!(Role::from_str("").is_err());
}

#[test]
fn test_role_home_path() {
    assert_eq!(Role::Admin.home_path(), "/admin");
    assert_eq!(Role::HotelOwner.home_path(), "/dashboard");
    assert_eq!(Role::Partner.home_path(), "/partner-dashboard");
}

#[test]
fn test_user_type_from_role() {
    assert_eq!(UserType::from(Role::Admin), UserType::Admin);
    assert_eq!(UserType::from(Role::HotelOwner), UserType::Hotel);
    assert_eq!(UserType::from(Role::Partner), UserType::Partner);
}
