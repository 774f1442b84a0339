/*
[INPUT]:  Consumer address, wall-clock time, domain name and chain id
[OUTPUT]: EIP-712 login message and its signing digest
[POS]:    Auth layer - typed-structured-data login payload
[UPDATE]: When the login message type or domain fields change
*/

use std::borrow::Cow;
use std::str::FromStr;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct, sol};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::http::{ConsumerHostError, Result};

const DEFAULT_DOMAIN_NAME: &str = "Subquery";
const DEFAULT_CHAIN_ID: u64 = 137;

sol! {
    /// Wire type name is part of the type hash; the server expects `messageType`.
    #[allow(non_camel_case_types)]
    struct messageType {
        address consumer;
        uint256 timestamp;
    }
}

/// EIP-712 domain used for consumer host login. Only `name` and `chainId` are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginDomain {
    pub name: String,
    pub chain_id: u64,
}

impl LoginDomain {
    pub fn new(name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            chain_id,
        }
    }

    pub fn to_eip712(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            None,
            Some(U256::from(self.chain_id)),
            None,
            None,
        )
    }
}

impl Default for LoginDomain {
    fn default() -> Self {
        Self::new(DEFAULT_DOMAIN_NAME, DEFAULT_CHAIN_ID)
    }
}

/// Message signed once per login and exchanged for a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginMessage {
    pub consumer: String,
    /// Milliseconds since the unix epoch
    pub timestamp: u64,
}

impl LoginMessage {
    pub fn new(consumer: impl Into<String>, timestamp: u64) -> Self {
        Self {
            consumer: consumer.into(),
            timestamp,
        }
    }

    /// Build a message stamped with the current time
    pub fn now(consumer: impl Into<String>) -> Self {
        let timestamp = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        Self::new(consumer, timestamp)
    }

    fn to_typed(&self) -> Result<messageType> {
        let consumer = Address::from_str(self.consumer.trim()).map_err(|e| {
            ConsumerHostError::Config(format!("Invalid consumer address {}: {e}", self.consumer))
        })?;
        Ok(messageType {
            consumer,
            timestamp: U256::from(self.timestamp),
        })
    }
}

/// EIP-712 digest a wallet signs for this message and domain
pub fn signing_hash(message: &LoginMessage, domain: &LoginDomain) -> Result<B256> {
    let typed = message.to_typed()?;
    Ok(typed.eip712_signing_hash(&domain.to_eip712()))
}
