//! Onboarding form workflow.
//!
//! Step order matters: the profile is read first, the identity
//! provider's display name is updated second, and only then are the
//! profile and hotel rows written. A failure after the provider write
//! triggers a compensating Pending/Pending update on the profile; the
//! provider name change itself is not unwound.

use crate::AppState;
use crate::workflows::{Result as WorkflowResult, WorkflowError};

use hm_auth::IdentityProvider as _;
use hm_core::{HotelProfile, OnboardingStatus, ProfileStatus, UserProfile, UserType};
use hm_db::{HotelProfileRepository, UserProfileRepository};

use chrono::Utc;
use log::{error, info, warn};
use uuid::Uuid;

/// Validated onboarding form fields.
#[derive(Debug, Clone)]
pub struct OnboardingSubmission {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: String,
    pub hotel_name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
}

impl OnboardingSubmission {
    /// Field-level validation, checked before any write.
    pub fn validate(&self) -> WorkflowResult<()> {
        require_min(&self.first_name, 1, "firstName")?;
        require_min(&self.last_name, 1, "lastName")?;
        require_min(&self.hotel_name, 2, "hotelName")?;
        require_min(&self.phone_number, 7, "phoneNumber")?;
        require_min(&self.address, 1, "address")?;
        require_min(&self.city, 1, "city")?;
        require_min(&self.country, 2, "country")?;

        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(WorkflowError::InvalidPayload {
                    field: "email",
                    message: "must be a valid email address".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn require_min(value: &str, min: usize, field: &'static str) -> WorkflowResult<()> {
    if value.trim().chars().count() < min {
        return Err(WorkflowError::InvalidPayload {
            field,
            message: format!("must be at least {} character(s)", min),
        });
    }
    Ok(())
}

/// Run the onboarding submission for an authenticated caller.
///
/// `session_id` is the id resolved from the session; the submission's
/// `user_id` must match it.
pub async fn submit(
    state: &AppState,
    session_id: &str,
    submission: &OnboardingSubmission,
) -> WorkflowResult<Uuid> {
    submission.validate()?;

    if submission.user_id != session_id {
        warn!(
            "Onboarding: submission for {} rejected, session is {}",
            submission.user_id, session_id
        );
        return Err(WorkflowError::IdentityMismatch);
    }

    let users = UserProfileRepository::new(state.pool.clone());
    let hotels = HotelProfileRepository::new(state.pool.clone());

    // (a) read the existing profile, if provisioning got there first
    let existing = users
        .find_by_id(&submission.user_id)
        .await
        .map_err(|e| WorkflowError::Upstream {
            step: "read profile",
            message: e.to_string(),
        })?;

    // (b) display name in the identity provider
    state
        .identity
        .update_name(&submission.user_id, &submission.first_name, &submission.last_name)
        .await
        .map_err(|e| WorkflowError::Upstream {
            step: "update identity name",
            message: e.to_string(),
        })?;

    let email = match &submission.email {
        Some(email) => email.clone(),
        None => existing
            .as_ref()
            .map(|p| p.email.clone())
            .unwrap_or_default(),
    };

    // (c) write the profile row
    let profile_write = match &existing {
        Some(_) => {
            users
                .update_onboarded(
                    &submission.user_id,
                    &submission.first_name,
                    &submission.last_name,
                    &email,
                    &submission.phone_number,
                )
                .await
        }
        None => {
            let mut profile = UserProfile::new(
                submission.user_id.clone(),
                UserType::Hotel,
                submission.first_name.clone(),
                submission.last_name.clone(),
                email.clone(),
            );
            profile.phone_number = Some(submission.phone_number.clone());
            profile.status = ProfileStatus::Active;
            profile.onboarding_status = OnboardingStatus::Completed;
            users.insert_if_absent(&profile).await.map(|_| ())
        }
    };

    if let Err(e) = profile_write {
        error!(
            "Onboarding: profile write failed for {}: {}",
            submission.user_id, e
        );
        revert_profile(&users, &submission.user_id).await;
        return Err(WorkflowError::PartialFailure {
            step: "update profile",
            message: e.to_string(),
        });
    }

    // (d) the hotel row; the owner_id uniqueness constraint absorbs
    // concurrent resubmission.
    let hotel = HotelProfile {
        id: Uuid::new_v4(),
        owner_id: submission.user_id.clone(),
        hotel_name: submission.hotel_name.clone(),
        email: email.clone(),
        phone: submission.phone_number.clone(),
        address: submission.address.clone(),
        city: submission.city.clone(),
        state: submission.state.clone(),
        country: submission.country.clone(),
        postal_code: submission.postal_code.clone(),
        created_at: Utc::now(),
    };

    match hotels.insert_if_absent(&hotel).await {
        Ok(true) => {
            info!(
                "Onboarding: completed for {}, hotel {}",
                submission.user_id, hotel.id
            );
            Ok(hotel.id)
        }
        Ok(false) => {
            // Resubmission: the owner already has a hotel, return its id.
            match hotels.find_by_owner(&submission.user_id).await {
                Ok(Some(existing_hotel)) => {
                    info!(
                        "Onboarding: {} resubmitted, existing hotel {} returned",
                        submission.user_id, existing_hotel.id
                    );
                    Ok(existing_hotel.id)
                }
                Ok(None) => {
                    // Conflict with no surviving row (concurrent delete)
                    error!(
                        "Onboarding: hotel conflict but no row for {}",
                        submission.user_id
                    );
                    revert_profile(&users, &submission.user_id).await;
                    Err(WorkflowError::PartialFailure {
                        step: "create hotel profile",
                        message: "hotel row vanished during submission".to_string(),
                    })
                }
                Err(e) => {
                    error!(
                        "Onboarding: hotel lookup failed for {}: {}",
                        submission.user_id, e
                    );
                    revert_profile(&users, &submission.user_id).await;
                    Err(WorkflowError::PartialFailure {
                        step: "create hotel profile",
                        message: e.to_string(),
                    })
                }
            }
        }
        Err(e) => {
            error!(
                "Onboarding: hotel insert failed for {}: {}",
                submission.user_id, e
            );
            revert_profile(&users, &submission.user_id).await;
            Err(WorkflowError::PartialFailure {
                step: "create hotel profile",
                message: e.to_string(),
            })
        }
    }
}

/// Best-effort compensating update back to Pending/Pending. Its own
/// failure is logged only.
async fn revert_profile(users: &UserProfileRepository, user_id: &str) {
    if let Err(e) = users
        .set_statuses(user_id, ProfileStatus::Pending, OnboardingStatus::Pending)
        .await
    {
        warn!("Onboarding: compensating revert failed for {}: {}", user_id, e);
    }
}
