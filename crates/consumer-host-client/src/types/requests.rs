/*
[INPUT]:  Caller parameters for consumer host operations
[OUTPUT]: Serializable request bodies and query parameters
[POS]:    Data layer - request definitions for API communication
[UPDATE]: When endpoints accept new parameters
*/

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::models::u256_string;

/// Body of `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub consumer: String,
    pub timestamp: u64,
    pub chain_id: u64,
    pub signature: String,
}

/// Body of `POST /users/apikeys/new`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApiKey {
    pub name: String,
}

impl NewApiKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Body of `POST /users/hosting-plans`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostingPlan {
    pub deployment_id: String,
    #[serde(with = "u256_string")]
    pub price: U256,
    /// Plan lifetime in seconds
    pub expiration: u64,
    /// Spending cap, in number of channels
    pub maximum: u32,
}

/// Path and query of `GET /projects/:projectId`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    pub project_id: String,
    pub deployment: Option<String>,
}

impl ProjectQuery {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            deployment: None,
        }
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = Some(deployment.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_names() {
        let request = LoginRequest {
            consumer: "0xABC".to_string(),
            timestamp: 1_700_000_000_000,
            chain_id: 137,
            signature: "0xsig".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "consumer": "0xABC",
                "timestamp": 1_700_000_000_000u64,
                "chainId": 137,
                "signature": "0xsig",
            })
        );
    }

    #[test]
    fn test_create_hosting_plan_wire_names() {
        let request = CreateHostingPlan {
            deployment_id: "QmCid".to_string(),
            price: U256::from(1_000_000_000_000_000_000u64),
            expiration: 86_400,
            maximum: 2,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["deploymentId"], "QmCid");
        assert_eq!(value["price"], "1000000000000000000");
        assert_eq!(value["expiration"], 86_400);
        assert_eq!(value["maximum"], 2);
    }
}
