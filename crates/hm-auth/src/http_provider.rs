//! HTTP client for the hosted identity provider's server-side API.

use crate::{AuthError, Identity, IdentityProvider, Result as AuthErrorResult, parse_role};

use hm_core::Role;

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde_json::{Value, json};

/// Identity provider client with a per-call timeout.
///
/// Authenticates with the provider's secret key; these endpoints are
/// privileged and must never be reachable with a publishable key.
pub struct HttpIdentityProvider {
    base_url: String,
    secret_key: String,
    client: ReqwestClient,
}

impl HttpIdentityProvider {
    #[track_caller]
    pub fn new(base_url: &str, secret_key: &str, timeout_secs: u64) -> AuthErrorResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AuthError::ProviderUnavailable {
                message: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.secret_key)
    }

    /// Execute a request, mapping transport and non-2xx failures
    #[track_caller]
    async fn execute(
        &self,
        user_id: &str,
        req: reqwest::RequestBuilder,
    ) -> AuthErrorResult<Value> {
        let response = req
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnavailable {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AuthError::IdentityNotFound {
                user_id: user_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if !status.is_success() {
            return Err(AuthError::ProviderUnavailable {
                message: format!("provider returned HTTP {}", status),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::ProviderUnavailable {
                message: format!("invalid provider response: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn fetch(&self, user_id: &str) -> AuthErrorResult<Identity> {
        let req = self.request(Method::GET, &format!("/v1/users/{}", user_id));
        let body = self.execute(user_id, req).await?;

        let email_addresses = body["email_addresses"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry["email_address"].as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let role = parse_role(body["public_metadata"]["role"].as_str())?;

        Ok(Identity {
            id: body["id"].as_str().unwrap_or(user_id).to_string(),
            email_addresses,
            first_name: body["first_name"].as_str().map(String::from),
            last_name: body["last_name"].as_str().map(String::from),
            role,
        })
    }

    async fn set_role(&self, user_id: &str, role: Role) -> AuthErrorResult<()> {
        let req = self
            .request(Method::PATCH, &format!("/v1/users/{}/metadata", user_id))
            .json(&json!({ "public_metadata": { "role": role.as_str() } }));
        self.execute(user_id, req).await?;
        Ok(())
    }

    async fn clear_role(&self, user_id: &str) -> AuthErrorResult<()> {
        // A null value removes the key from public metadata
        let req = self
            .request(Method::PATCH, &format!("/v1/users/{}/metadata", user_id))
            .json(&json!({ "public_metadata": { "role": Value::Null } }));
        self.execute(user_id, req).await?;
        Ok(())
    }

    async fn update_name(
        &self,
        user_id: &str,
        first_name: &str,
        last_name: &str,
    ) -> AuthErrorResult<()> {
        let req = self
            .request(Method::PATCH, &format!("/v1/users/{}", user_id))
            .json(&json!({ "first_name": first_name, "last_name": last_name }));
        self.execute(user_id, req).await?;
        Ok(())
    }
}
