/*
[INPUT]:  Wallet signer, HTTP client and token store
[OUTPUT]: Login status and an installed session credential
[POS]:    Auth layer - orchestrates the signature-based login flow
[UPDATE]: When login endpoint, message shape or caching rules change
*/

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::http::{ConsumerHostClient, ConsumerHostError, Result};
use crate::types::{ApiReply, LoginRequest, TokenResponse};

use super::typed_data::{LoginDomain, LoginMessage};
use super::wallet::REJECT_SIGN_MSG;
use super::{Credential, Session, TokenStore, WalletSigner};

pub const USE_CACHE_MSG: &str = "use cache";
pub const OK_MSG: &str = "ok";
pub const TOKEN_REQUEST_FAILED_MSG: &str = "Failed to request token of consumer host.";
pub const NOT_CONNECTED_MSG: &str = "No wallet connected";

/// Outcome of a login attempt. Login never errors; failures are reported here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginStatus {
    pub status: bool,
    pub msg: String,
}

impl LoginStatus {
    pub fn used_cache() -> Self {
        Self {
            status: true,
            msg: USE_CACHE_MSG.to_string(),
        }
    }

    pub fn ok() -> Self {
        Self {
            status: true,
            msg: OK_MSG.to_string(),
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            status: false,
            msg: msg.into(),
        }
    }

    pub fn not_connected() -> Self {
        Self::failed(NOT_CONNECTED_MSG)
    }
}

/// Manages the login flow and owns the session credential
pub struct AuthManager {
    client: ConsumerHostClient,
    store: Arc<dyn TokenStore>,
    session: Session,
    domain: LoginDomain,
    relogin_lock: Mutex<()>,
}

impl AuthManager {
    pub fn new(
        client: ConsumerHostClient,
        store: Arc<dyn TokenStore>,
        domain: LoginDomain,
    ) -> Self {
        Self {
            client,
            store,
            session: Session::new(),
            domain,
            relogin_lock: Mutex::new(()),
        }
    }

    /// Get the session credential slot
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the durable token cache
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// EIP-712 domain used for login signatures
    pub fn domain(&self) -> &LoginDomain {
        &self.domain
    }

    /// Sign a fresh login message and exchange it for a token
    ///
    /// POST /login
    pub async fn request_token(&self, wallet: &dyn WalletSigner) -> Result<String> {
        let account = wallet.address().to_string();
        let message = LoginMessage::now(&account);

        let signature = wallet.sign_login(&message, &self.domain).await?;
        if signature.is_empty() {
            return Err(ConsumerHostError::Authentication {
                message: "wallet returned an empty signature".to_string(),
            });
        }

        let body = LoginRequest {
            consumer: message.consumer,
            timestamp: message.timestamp,
            chain_id: self.domain.chain_id,
            signature,
        };

        let builder = self.client.request(Method::POST, &["login"], None)?;
        let reply: ApiReply<TokenResponse> = self.client.send_json(builder.json(&body)).await?;

        if !reply.status.is_success() && !reply.is_error() {
            return Err(ConsumerHostError::Authentication {
                message: format!("login rejected with status {}", reply.status),
            });
        }

        let token = reply.into_result()?.token;
        if token.is_empty() {
            return Err(ConsumerHostError::invalid_response(
                reqwest::StatusCode::OK,
                "login reply carried an empty token",
            ));
        }
        Ok(token)
    }

    /// Log the wallet in.
    ///
    /// Without `refresh`, a cached token for the account is installed and no
    /// request is made.
    pub async fn login(&self, wallet: &dyn WalletSigner, refresh: bool) -> LoginStatus {
        let account = wallet.address();

        if !refresh {
            if let Some(token) = self.store.load(account) {
                debug!(account, "using cached consumer host token");
                self.session.set_token(account, token);
                return LoginStatus::used_cache();
            }
        }

        match self.request_token(wallet).await {
            Ok(token) => {
                if let Err(err) = self.store.save(account, &token) {
                    warn!(account, error = %err, "failed to cache consumer host token");
                }
                self.session.set_token(account, token);
                info!(account, refresh, "consumer host login succeeded");
                LoginStatus::ok()
            }
            Err(err) => {
                warn!(account, refresh, error = %err, "consumer host login failed");
                LoginStatus::failed(failure_message(&err))
            }
        }
    }

    /// Forced re-login after the server rejected `rejected`.
    ///
    /// Concurrent callers are serialised; if another caller already replaced
    /// the rejected credential, its token is reused without a new signature.
    pub async fn relogin(
        &self,
        wallet: &dyn WalletSigner,
        rejected: Option<&Credential>,
    ) -> LoginStatus {
        let _guard = self.relogin_lock.lock().await;
        let account = wallet.address();

        if let Some(current) = self.session.credential_for(account) {
            if rejected != Some(&current) {
                debug!(account, "credential already refreshed by a concurrent login");
                return LoginStatus::ok();
            }
        }

        self.login(wallet, true).await
    }
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("client", &self.client)
            .field("store", &self.store)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

fn failure_message(err: &ConsumerHostError) -> String {
    match err {
        ConsumerHostError::SignatureRejected { .. } => REJECT_SIGN_MSG.to_string(),
        ConsumerHostError::Api { message, .. } => message.clone(),
        _ => TOKEN_REQUEST_FAILED_MSG.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryTokenStore, MockWalletSigner};
    use crate::types::ErrorCode;

    fn manager(endpoint: &str) -> (AuthManager, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let client = ConsumerHostClient::new(endpoint).unwrap();
        let manager = AuthManager::new(client, store.clone(), LoginDomain::default());
        (manager, store)
    }

    #[test]
    fn test_failure_message_mapping() {
        let rejected = ConsumerHostError::SignatureRejected {
            message: "whatever".to_string(),
        };
        assert_eq!(failure_message(&rejected), "User denied message signature");

        let api = ConsumerHostError::Api {
            code: ErrorCode::UserNotApproved,
            message: "Forbidden: user not approved.".to_string(),
        };
        assert_eq!(failure_message(&api), "Forbidden: user not approved.");

        assert_eq!(
            failure_message(&ConsumerHostError::Config("x".to_string())),
            TOKEN_REQUEST_FAILED_MSG
        );
    }

    #[tokio::test]
    async fn test_login_rejected_signature_reports_failure() {
        // unroutable endpoint: the flow must stop at the wallet
        let (manager, store) = manager("http://127.0.0.1:9");
        let wallet = MockWalletSigner::rejecting("0xABC");

        let status = manager.login(&wallet, false).await;

        assert_eq!(status, LoginStatus::failed("User denied message signature"));
        assert_eq!(wallet.sign_calls(), 1);
        assert!(store.load("0xABC").is_none());
        assert!(manager.session().credential().is_none());
    }

    #[tokio::test]
    async fn test_relogin_reuses_refreshed_credential() {
        let (manager, _store) = manager("http://127.0.0.1:9");
        let wallet = MockWalletSigner::new("0xABC", "0xsig");

        manager.session().set_token("0xABC", "fresh".to_string());
        let stale = Credential::new("stale");

        let status = manager.relogin(&wallet, Some(&stale)).await;

        assert!(status.status);
        assert_eq!(wallet.sign_calls(), 0);
    }
}
