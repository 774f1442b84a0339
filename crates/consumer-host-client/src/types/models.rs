/*
[INPUT]:  Consumer host JSON payloads
[OUTPUT]: Typed Rust structs for API keys, hosting plans, channels and indexers
[POS]:    Data layer - entity definitions for API communication
[UPDATE]: When API schema changes or new entities added
*/

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// API key owned by the logged-in consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: u64,
    pub user_id: u64,
    pub name: String,
    pub value: String,
    pub times: u64,
    pub created_at: String,
    pub updated_at: String,
}

/// Deployment a hosting plan is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDeployment {
    pub id: u64,
    /// Deployment CID
    pub deployment: String,
    #[serde(default)]
    pub deployment_id: Option<u64>,
    pub project_id: u64,
    pub version: String,
    pub is_actived: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Hosting plan linking a deployment, price, expiration and spending cap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingPlan {
    pub id: u64,
    pub user_id: u64,
    pub deployment: PlanDeployment,
    /// Per-channel state, serialized by the server
    pub channels: String,
    pub maximum: u32,
    #[serde(with = "u256_string")]
    pub price: U256,
    pub spent: String,
    pub expired_at: String,
    pub is_actived: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Payment-channel snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelState {
    pub channel_id: String,
    pub consumer_sign: String,
    pub indexer_sign: String,
    pub is_final: bool,
    pub spent: String,
}

/// One indexer's flex plan for a project deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexerFlexPlan {
    pub id: u64,
    pub deployment_id: u64,
    pub indexer_id: u64,
    pub indexer: String,
    pub price: String,
    pub max_time: u64,
    pub block_height: String,
    pub status: i32,
    pub status_at: String,
    pub score: i64,
    pub reality: i64,
    pub is_active: bool,
    pub create_at: String,
    pub updated_at: String,
    pub online: bool,
    pub price_token: String,
}

/// Indexers serving a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectIndexers {
    pub indexers: Vec<IndexerFlexPlan>,
}

/// Login exchange result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Serde adapter for token amounts: decimal string out, string or number in.
pub(crate) mod u256_string {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text
                .trim()
                .parse::<U256>()
                .map_err(|e| de::Error::custom(format!("invalid amount {text}: {e}"))),
            Raw::Number(number) => Ok(U256::from(number)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_state_camel_case() {
        let json = r#"{
            "channelId": "0x01",
            "consumerSign": "0xaa",
            "indexerSign": "0xbb",
            "isFinal": false,
            "spent": "100"
        }"#;
        let state: ChannelState = serde_json::from_str(json).unwrap();
        assert_eq!(state.channel_id, "0x01");
        assert!(!state.is_final);
    }

    #[test]
    fn test_hosting_plan_price_accepts_string_and_number() {
        let plan = |price: &str| {
            format!(
                r#"{{
                "id": 1, "user_id": 2,
                "deployment": {{
                    "id": 3, "deployment": "QmCid", "deployment_id": 3, "project_id": 4,
                    "version": "v1", "is_actived": true,
                    "created_at": "2023-01-01T00:00:00", "updated_at": "2023-01-01T00:00:00"
                }},
                "channels": "", "maximum": 2, "price": {price}, "spent": "0",
                "expired_at": "2023-02-01T00:00:00", "is_actived": true,
                "created_at": "2023-01-01T00:00:00", "updated_at": "2023-01-01T00:00:00"
            }}"#
            )
        };

        let from_text: HostingPlan =
            serde_json::from_str(&plan(r#""1000000000000000000000""#)).unwrap();
        assert_eq!(
            from_text.price,
            "1000000000000000000000".parse::<U256>().unwrap()
        );

        let from_number: HostingPlan = serde_json::from_str(&plan("42")).unwrap();
        assert_eq!(from_number.price, U256::from(42u64));

        let out = serde_json::to_value(&from_number).unwrap();
        assert_eq!(out["price"], "42");
    }
}
