/*
[INPUT]:  Local EVM wallet and terminal user
[OUTPUT]: Confirmed login signatures and styled notifications
[POS]:    Terminal adapters for the wallet and notifier seams
[UPDATE]: When prompt wording or notification styling changes
*/

use async_trait::async_trait;
use console::style;
use consumer_host_client::auth::wallet::REJECT_SIGN_MSG;
use consumer_host_client::{
    ConsumerHostError, EvmWalletSigner, LoginDomain, LoginMessage, Notification, Notifier,
    WalletSigner,
};
use dialoguer::Confirm;

/// Wallet that asks the terminal user before every signature
#[derive(Debug)]
pub struct ConfirmingWallet {
    inner: EvmWalletSigner,
}

impl ConfirmingWallet {
    pub fn new(inner: EvmWalletSigner) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl WalletSigner for ConfirmingWallet {
    fn address(&self) -> &str {
        self.inner.address()
    }

    async fn sign_login(
        &self,
        message: &LoginMessage,
        domain: &LoginDomain,
    ) -> consumer_host_client::Result<String> {
        let prompt = format!(
            "Sign consumer host login for {} ({} on chain {})?",
            message.consumer, domain.name, domain.chain_id
        );
        let approved = tokio::task::spawn_blocking(move || {
            Confirm::new().with_prompt(prompt).default(false).interact()
        })
        .await
        .map_err(|e| ConsumerHostError::Authentication {
            message: format!("signature prompt aborted: {e}"),
        })?
        .map_err(|e| ConsumerHostError::Authentication {
            message: format!("signature prompt failed: {e}"),
        })?;

        if !approved {
            return Err(ConsumerHostError::SignatureRejected {
                message: REJECT_SIGN_MSG.to_string(),
            });
        }
        self.inner.sign_login(message, domain).await
    }
}

/// Prints notifications to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        eprintln!("{}: {}", style("error").red().bold(), notification.description);
    }
}
