/*
[INPUT]:  Wallet signers, login domain and token storage
[OUTPUT]: Session credentials, login status and auth errors
[POS]:    Auth layer - handles consumer host authentication
[UPDATE]: When auth flow or signature methods change
*/

pub mod evm_wallet;
pub mod manager;
pub mod session;
pub mod token_store;
pub mod typed_data;
pub mod wallet;

pub use evm_wallet::EvmWalletSigner;
pub use manager::{AuthManager, LoginStatus};
pub use session::{Credential, Session, SessionToken};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, token_key};
pub use typed_data::{LoginDomain, LoginMessage, signing_hash};
pub use wallet::{MockWalletSigner, WalletSigner};
