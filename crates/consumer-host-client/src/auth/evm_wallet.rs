/*
[INPUT]:  EVM private key (hex string)
[OUTPUT]: EIP-712 login signatures and checksummed wallet address
[POS]:    Auth layer - local EVM wallet implementation
[UPDATE]: When signing logic or EVM address formatting changes
*/

use std::str::FromStr;

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::auth::WalletSigner;
use crate::auth::typed_data::{self, LoginDomain, LoginMessage};
use crate::http::{ConsumerHostError, Result};

/// Signer backed by a local secp256k1 key
pub struct EvmWalletSigner {
    signer: PrivateKeySigner,
    address: String,
}

impl EvmWalletSigner {
    /// Create a new EVM wallet signer from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let private_key_hex = private_key_hex.trim();
        let private_key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| ConsumerHostError::Config(format!("Invalid EVM private key: {e}")))?;

        let address = signer.address().to_checksum(None);

        Ok(Self { signer, address })
    }
}

impl std::fmt::Debug for EvmWalletSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmWalletSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletSigner for EvmWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_login(&self, message: &LoginMessage, domain: &LoginDomain) -> Result<String> {
        let hash = typed_data::signing_hash(message, domain)?;
        let signature = self.signer.sign_hash(&hash).await.map_err(|e| {
            ConsumerHostError::Authentication {
                message: format!("Failed to sign login message: {e}"),
            }
        })?;

        // [r, s, v]
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Signature};

    const TEST_PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[tokio::test]
    async fn test_evm_wallet_signs_recoverable_login() {
        let signer = EvmWalletSigner::new(TEST_PK).unwrap();
        assert_eq!(signer.address(), TEST_ADDRESS);

        let domain = LoginDomain::default();
        let message = LoginMessage::new(signer.address(), 1_700_000_000_000);
        let signature = signer.sign_login(&message, &domain).await.unwrap();

        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 132); // 0x + 65 bytes * 2

        let bytes = hex::decode(&signature[2..]).unwrap();
        let parsed = Signature::try_from(bytes.as_slice()).unwrap();
        let hash = typed_data::signing_hash(&message, &domain).unwrap();
        let recovered = parsed.recover_address_from_prehash(&hash).unwrap();

        assert_eq!(recovered, Address::from_str(TEST_ADDRESS).unwrap());
    }

    #[test]
    fn test_evm_wallet_signer_no_prefix() {
        let signer = EvmWalletSigner::new(&TEST_PK[2..]).unwrap();
        assert_eq!(signer.address(), TEST_ADDRESS);
    }

    #[test]
    fn test_evm_wallet_signer_invalid_key() {
        let err = EvmWalletSigner::new("not-a-key").unwrap_err();
        assert!(matches!(err, ConsumerHostError::Config(_)));
    }
}
