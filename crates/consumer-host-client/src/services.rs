/*
[INPUT]:  Connected wallet, consumer host client, token store and options
[OUTPUT]: Authenticated consumer host operations returning raw replies
[POS]:    Facade - the surface page code and the CLI consume
[UPDATE]: When adding operations or changing alert/auto-login behaviour
*/

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use alloy_primitives::U256;
use tracing::{debug, info};

use crate::auth::{
    AuthManager, Credential, LoginDomain, LoginStatus, TokenStore, WalletSigner,
};
use crate::http::{ConsumerHostClient, ConsumerHostError, ReauthPolicy, Result};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::types::{
    ApiKey, ApiReply, ChannelState, CreateHostingPlan, HostingPlan, NewApiKey, ProjectIndexers,
    ProjectQuery,
};

/// Behaviour switches for `ConsumerHostServices`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicesOptions {
    /// Surface error replies through the notifier
    pub alert: bool,
    /// Log in automatically whenever a wallet is connected
    pub auto_login: bool,
}

impl Default for ServicesOptions {
    fn default() -> Self {
        Self {
            alert: false,
            auto_login: true,
        }
    }
}

/// Wallet-authenticated access to the consumer host
pub struct ConsumerHostServices {
    client: ConsumerHostClient,
    auth: AuthManager,
    wallet: RwLock<Option<Arc<dyn WalletSigner>>>,
    options: ServicesOptions,
    retry: ReauthPolicy,
    notifier: Arc<dyn Notifier>,
}

impl ConsumerHostServices {
    pub fn new(
        client: ConsumerHostClient,
        store: Arc<dyn TokenStore>,
        domain: LoginDomain,
        options: ServicesOptions,
    ) -> Self {
        let auth = AuthManager::new(client.clone(), store, domain);
        Self {
            client,
            auth,
            wallet: RwLock::new(None),
            options,
            retry: ReauthPolicy::default(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Replace the notification sink
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the re-authentication policy
    pub fn with_retry_policy(mut self, retry: ReauthPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    pub fn options(&self) -> ServicesOptions {
        self.options
    }

    /// Address of the connected wallet
    pub fn account(&self) -> Option<String> {
        self.current_wallet().map(|wallet| wallet.address().to_string())
    }

    fn current_wallet(&self) -> Option<Arc<dyn WalletSigner>> {
        self.wallet
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Connect a wallet, running auto-login when enabled.
    ///
    /// Returns the login status when auto-login ran.
    pub async fn connect(&self, wallet: Arc<dyn WalletSigner>) -> Option<LoginStatus> {
        let account = wallet.address().to_string();
        if self.auth.session().account().as_deref() != Some(account.as_str()) {
            self.auth.session().clear();
        }
        *self.wallet.write().unwrap_or_else(PoisonError::into_inner) = Some(wallet);
        info!(account = %account, "wallet connected");

        if !self.options.auto_login {
            return None;
        }
        Some(self.login(false).await)
    }

    /// Drop the connected wallet and its in-memory credential
    pub fn disconnect(&self) {
        *self.wallet.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.auth.session().clear();
    }

    /// Log the connected wallet in; `refresh` bypasses the token cache
    pub async fn login(&self, refresh: bool) -> LoginStatus {
        match self.current_wallet() {
            Some(wallet) => self.auth.login(wallet.as_ref(), refresh).await,
            None => LoginStatus::not_connected(),
        }
    }

    /// Sign and exchange a login message without touching the cache
    pub async fn request_token(&self) -> Result<String> {
        let wallet = self.current_wallet().ok_or(ConsumerHostError::NotConnected)?;
        self.auth.request_token(wallet.as_ref()).await
    }

    async fn call<T, F, Fut>(&self, operation: &'static str, call: F) -> Result<ApiReply<T>>
    where
        F: FnMut(Option<Credential>) -> Fut,
        Fut: Future<Output = Result<ApiReply<T>>>,
    {
        let wallet = self.current_wallet();
        let reply = self.retry.execute(&self.auth, wallet.as_deref(), call).await?;

        if let Some(err) = reply.error() {
            debug!(operation, code = err.code.code(), "consumer host error reply");
            if self.options.alert {
                self.notifier.notify(&Notification::from(err));
            }
        }
        Ok(reply)
    }

    pub async fn list_api_keys(&self) -> Result<ApiReply<Vec<ApiKey>>> {
        let client = &self.client;
        self.call("list_api_keys", move |credential| async move {
            client.list_api_keys(credential.as_ref()).await
        })
        .await
    }

    pub async fn create_api_key(&self, name: &str) -> Result<ApiReply<ApiKey>> {
        let client = &self.client;
        let params = NewApiKey::new(name);
        let params = &params;
        self.call("create_api_key", move |credential| async move {
            client.create_api_key(credential.as_ref(), params).await
        })
        .await
    }

    pub async fn delete_api_key(&self, api_key_id: u64) -> Result<ApiReply<serde_json::Value>> {
        let client = &self.client;
        self.call("delete_api_key", move |credential| async move {
            client.delete_api_key(credential.as_ref(), api_key_id).await
        })
        .await
    }

    pub async fn create_hosting_plan(
        &self,
        params: &CreateHostingPlan,
    ) -> Result<ApiReply<HostingPlan>> {
        let client = &self.client;
        self.call("create_hosting_plan", move |credential| async move {
            client.create_hosting_plan(credential.as_ref(), params).await
        })
        .await
    }

    /// Convenience wrapper building the hosting plan body
    pub async fn create_hosting_plan_for(
        &self,
        deployment_id: &str,
        price: U256,
        expiration: u64,
        maximum: u32,
    ) -> Result<ApiReply<HostingPlan>> {
        let params = CreateHostingPlan {
            deployment_id: deployment_id.to_string(),
            price,
            expiration,
            maximum,
        };
        self.create_hosting_plan(&params).await
    }

    pub async fn list_hosting_plans(&self) -> Result<ApiReply<Vec<HostingPlan>>> {
        let client = &self.client;
        self.call("list_hosting_plans", move |credential| async move {
            client.list_hosting_plans(credential.as_ref()).await
        })
        .await
    }

    pub async fn channel_state(&self, channel_id: &str) -> Result<ApiReply<ChannelState>> {
        let client = &self.client;
        self.call("channel_state", move |credential| async move {
            client.channel_state(credential.as_ref(), channel_id).await
        })
        .await
    }

    pub async fn project_indexers(
        &self,
        query: &ProjectQuery,
    ) -> Result<ApiReply<ProjectIndexers>> {
        let client = &self.client;
        self.call("project_indexers", move |credential| async move {
            client.project_indexers(credential.as_ref(), query).await
        })
        .await
    }
}

impl std::fmt::Debug for ConsumerHostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumerHostServices")
            .field("account", &self.account())
            .field("options", &self.options)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
