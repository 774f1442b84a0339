/*
[INPUT]:  Login message and EIP-712 domain
[OUTPUT]: Typed-data signature string for authentication
[POS]:    Auth layer - wallet connector abstraction
[UPDATE]: When adding new wallet types or changing signature format
*/

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::http::{ConsumerHostError, Result};

use super::typed_data::{LoginDomain, LoginMessage};

/// Message surfaced when the wallet declines to sign
pub const REJECT_SIGN_MSG: &str = "User denied message signature";

/// Trait for wallet signing operations
///
/// The trait is async so that signing can wait on user interaction
/// (hardware wallets, confirmation prompts) for as long as it takes.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Get the wallet address
    fn address(&self) -> &str;

    /// Sign the login message as EIP-712 typed data
    ///
    /// Returns a hex-encoded signature (0x...). A user refusal must be
    /// reported as `ConsumerHostError::SignatureRejected`.
    async fn sign_login(&self, message: &LoginMessage, domain: &LoginDomain) -> Result<String>;
}

/// Mock wallet signer for testing
#[derive(Debug)]
pub struct MockWalletSigner {
    address: String,
    signature: Option<String>,
    sign_calls: AtomicUsize,
    last_message: Mutex<Option<LoginMessage>>,
}

impl MockWalletSigner {
    /// Create a new mock signer with predetermined signature
    pub fn new(address: &str, signature: &str) -> Self {
        Self {
            address: address.to_string(),
            signature: Some(signature.to_string()),
            sign_calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
        }
    }

    /// Create a mock signer that always refuses to sign
    pub fn rejecting(address: &str) -> Self {
        Self {
            signature: None,
            ..Self::new(address, "")
        }
    }

    /// Number of signature requests received so far
    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    /// Last message the wallet was asked to sign
    pub fn last_message(&self) -> Option<LoginMessage> {
        self.last_message
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl WalletSigner for MockWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_login(&self, message: &LoginMessage, _domain: &LoginDomain) -> Result<String> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_message
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(message.clone());

        self.signature
            .clone()
            .ok_or_else(|| ConsumerHostError::SignatureRejected {
                message: REJECT_SIGN_MSG.to_string(),
            })
    }
}
