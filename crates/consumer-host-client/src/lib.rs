/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public consumer host client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod notify;
pub mod services;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthManager,
    Credential,
    EvmWalletSigner,
    FileTokenStore,
    LoginDomain,
    LoginMessage,
    LoginStatus,
    MemoryTokenStore,
    MockWalletSigner,
    Session,
    TokenStore,
    WalletSigner,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    ConsumerHostClient,
    ConsumerHostError,
    ReauthPolicy,
    Result,
};

pub use notify::{Notification, Notifier, TracingNotifier};
pub use services::{ConsumerHostServices, ServicesOptions};

// Re-export all types
pub use types::*;

pub use alloy_primitives::U256;
