/*
[INPUT]:  CONSUMER_HOST_ENDPOINT (optional), well-known test key
[OUTPUT]: Console output of the login status and cached accounts
[POS]:    Examples - wallet login and token cache demonstration
[UPDATE]: When ConsumerHostServices or token store API changes
*/

//! Example: wallet login against a consumer host
//!
//! Connects a local EVM wallet, which triggers auto-login, then lists the
//! accounts with a cached token.

use std::sync::Arc;

use consumer_host_client::{
    ConsumerHostClient, ConsumerHostServices, EvmWalletSigner, FileTokenStore, LoginDomain,
    ServicesOptions, WalletSigner,
};

// Test key - DO NOT USE IN PRODUCTION
const TEST_EVM_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = std::env::var("CONSUMER_HOST_ENDPOINT")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    println!("=== Consumer Host Login Example ===");

    let client = ConsumerHostClient::new(&endpoint)?;
    let store = Arc::new(FileTokenStore::new("./.consumer-host/tokens"));
    let services = ConsumerHostServices::new(
        client,
        store.clone(),
        LoginDomain::default(),
        ServicesOptions::default(),
    );

    let wallet = Arc::new(EvmWalletSigner::new(TEST_EVM_KEY)?);
    println!("Wallet: {}", wallet.address());

    match services.connect(wallet).await {
        Some(status) => println!("Login status: {} ({})", status.status, status.msg),
        None => println!("Auto-login disabled"),
    }

    println!("Cached accounts: {:?}", store.list_stored_accounts());
    Ok(())
}
