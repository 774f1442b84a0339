/*
[INPUT]:  A single transport call, the auth manager and the connected wallet
[OUTPUT]: The final ApiReply after at most one forced re-login
[POS]:    HTTP layer - bounded re-authentication decorator
[UPDATE]: When the retry budget or re-login trigger changes
*/

use std::future::Future;

use tracing::{debug, warn};

use crate::auth::{AuthManager, Credential, WalletSigner};
use crate::http::Result;
use crate::types::ApiReply;

const DEFAULT_MAX_REAUTH: u32 = 1;

/// Re-login-and-retry policy around one transport call.
///
/// Only the synthetic "not login" code triggers a re-login. Transport errors
/// are returned as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReauthPolicy {
    max_reauth: u32,
}

impl Default for ReauthPolicy {
    fn default() -> Self {
        Self {
            max_reauth: DEFAULT_MAX_REAUTH,
        }
    }
}

impl ReauthPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy that never re-authenticates
    pub fn disabled() -> Self {
        Self { max_reauth: 0 }
    }

    pub fn max_reauth(&self) -> u32 {
        self.max_reauth
    }

    /// Run `call` with the session credential, re-logging in on "not login".
    pub async fn execute<T, F, Fut>(
        &self,
        auth: &AuthManager,
        wallet: Option<&dyn WalletSigner>,
        mut call: F,
    ) -> Result<ApiReply<T>>
    where
        F: FnMut(Option<Credential>) -> Fut,
        Fut: Future<Output = Result<ApiReply<T>>>,
    {
        let mut attempt = 0;
        loop {
            let credential = match wallet {
                Some(wallet) => auth.session().credential_for(wallet.address()),
                None => None,
            };
            let reply = call(credential.clone()).await?;

            if !reply.is_not_logged_in() {
                return Ok(reply);
            }
            if attempt >= self.max_reauth {
                debug!(attempt, "re-login budget exhausted");
                return Ok(reply);
            }
            let Some(wallet) = wallet else {
                debug!("not logged in and no wallet connected");
                return Ok(reply);
            };

            attempt += 1;
            let status = auth.relogin(wallet, credential.as_ref()).await;
            if !status.status {
                warn!(account = wallet.address(), msg = %status.msg, "re-login failed");
                return Ok(reply);
            }
            debug!(account = wallet.address(), attempt, "retrying after re-login");
        }
    }
}
