/*
[INPUT]:  Explicit credential and request parameters
[OUTPUT]: Raw ApiReply values for API key, hosting plan and channel endpoints
[POS]:    HTTP layer - user endpoints (require a session token)
[UPDATE]: When adding new user endpoints or changing request bodies
*/

// ### User Endpoints
//
// These are single transport calls. Re-authentication is layered on top by
// `ReauthPolicy`; nothing here retries.

use reqwest::Method;

use crate::auth::Credential;
use crate::http::{ConsumerHostClient, Result};
use crate::types::{ApiKey, ApiReply, ChannelState, CreateHostingPlan, HostingPlan, NewApiKey};

impl ConsumerHostClient {
    /// List the consumer's API keys
    ///
    /// GET /users/apikeys
    pub async fn list_api_keys(
        &self,
        credential: Option<&Credential>,
    ) -> Result<ApiReply<Vec<ApiKey>>> {
        let builder = self.request(Method::GET, &["users", "apikeys"], credential)?;
        self.send_json(builder).await
    }

    /// Create a new API key
    ///
    /// POST /users/apikeys/new
    pub async fn create_api_key(
        &self,
        credential: Option<&Credential>,
        params: &NewApiKey,
    ) -> Result<ApiReply<ApiKey>> {
        let builder = self.request(Method::POST, &["users", "apikeys", "new"], credential)?;
        self.send_json(builder.json(params)).await
    }

    /// Delete an API key
    ///
    /// POST /users/apikeys/:id/delete
    pub async fn delete_api_key(
        &self,
        credential: Option<&Credential>,
        api_key_id: u64,
    ) -> Result<ApiReply<serde_json::Value>> {
        let id = api_key_id.to_string();
        let builder = self.request(
            Method::POST,
            &["users", "apikeys", id.as_str(), "delete"],
            credential,
        )?;
        self.send_json(builder.json(&serde_json::json!({}))).await
    }

    /// Create a hosting plan priced against the consumer contract
    ///
    /// POST /users/hosting-plans
    pub async fn create_hosting_plan(
        &self,
        credential: Option<&Credential>,
        params: &CreateHostingPlan,
    ) -> Result<ApiReply<HostingPlan>> {
        let builder = self.request(Method::POST, &["users", "hosting-plans"], credential)?;
        self.send_json(builder.json(params)).await
    }

    /// List the consumer's hosting plans
    ///
    /// GET /users/hosting-plans
    pub async fn list_hosting_plans(
        &self,
        credential: Option<&Credential>,
    ) -> Result<ApiReply<Vec<HostingPlan>>> {
        let builder = self.request(Method::GET, &["users", "hosting-plans"], credential)?;
        self.send_json(builder).await
    }

    /// Fetch a payment-channel snapshot
    ///
    /// GET /users/channels/:channelId/state
    pub async fn channel_state(
        &self,
        credential: Option<&Credential>,
        channel_id: &str,
    ) -> Result<ApiReply<ChannelState>> {
        let builder = self.request(
            Method::GET,
            &["users", "channels", channel_id, "state"],
            credential,
        )?;
        self.send_json(builder).await
    }
}
