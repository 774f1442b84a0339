/*
[INPUT]:  CLI arguments, configuration sources, wallet private key from env
[OUTPUT]: Consumer host operations printed as JSON
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod config;
mod prompt;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use consumer_host_client::{
    ApiBody, ApiReply, ConsumerHostClient, ConsumerHostServices, EvmWalletSigner, FileTokenStore,
    ProjectQuery, ServicesOptions, U256, WalletSigner,
};

use crate::config::CliConfig;
use crate::prompt::{ConfirmingWallet, ConsoleNotifier};

#[derive(Parser, Debug)]
#[command(name = "consumer-host", version, about = "Consumer host API client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Environment variable holding the wallet private key
    #[arg(long = "private-key-env", default_value = "CONSUMER_HOST_PRIVATE_KEY")]
    private_key_env: String,
    /// Ask for confirmation before signing
    #[arg(long = "confirm-sign")]
    confirm_sign: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and cache the session token
    Login {
        /// Ignore any cached token
        #[arg(long)]
        refresh: bool,
    },
    /// Manage API keys
    #[command(subcommand)]
    ApiKeys(ApiKeyCommand),
    /// Manage hosting plans
    #[command(subcommand)]
    Plans(PlanCommand),
    /// Show a payment channel's state
    ChannelState { channel_id: String },
    /// List indexers serving a project
    Project {
        project_id: String,
        #[arg(long)]
        deployment: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ApiKeyCommand {
    List,
    New { name: String },
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
enum PlanCommand {
    List,
    Create {
        deployment_id: String,
        /// Price per request in the token's smallest unit
        #[arg(long)]
        price: String,
        /// Plan lifetime in seconds
        #[arg(long)]
        expiration: u64,
        #[arg(long, default_value_t = 2)]
        maximum: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = CliConfig::load(args.config_path.as_deref()).context("load config")?;
    info!(endpoint = %config.endpoint, chain_id = config.chain_id, "configuration loaded");

    let services = build_services(&config, services_options(&config, &args.command))?;
    let wallet = load_wallet(&args.private_key_env, args.confirm_sign)?;

    if let Some(status) = services.connect(wallet).await {
        if !status.status {
            warn!(msg = %status.msg, "auto-login failed");
        }
    }

    match args.command {
        Command::Login { refresh } => {
            let status = services.login(refresh).await;
            if !status.status {
                bail!("login failed: {}", status.msg);
            }
            println!("{}", status.msg);
            Ok(())
        }
        Command::ApiKeys(ApiKeyCommand::List) => print_reply(services.list_api_keys().await?),
        Command::ApiKeys(ApiKeyCommand::New { name }) => {
            print_reply(services.create_api_key(&name).await?)
        }
        Command::ApiKeys(ApiKeyCommand::Delete { id }) => {
            print_reply(services.delete_api_key(id).await?)
        }
        Command::Plans(PlanCommand::List) => print_reply(services.list_hosting_plans().await?),
        Command::Plans(PlanCommand::Create {
            deployment_id,
            price,
            expiration,
            maximum,
        }) => {
            let price = U256::from_str(price.trim())
                .map_err(|e| anyhow!("invalid price {price}: {e}"))?;
            print_reply(
                services
                    .create_hosting_plan_for(&deployment_id, price, expiration, maximum)
                    .await?,
            )
        }
        Command::ChannelState { channel_id } => {
            print_reply(services.channel_state(&channel_id).await?)
        }
        Command::Project {
            project_id,
            deployment,
        } => {
            let mut query = ProjectQuery::new(project_id);
            query.deployment = deployment;
            print_reply(services.project_indexers(&query).await?)
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// `login` performs its own sign-in, so connecting must not log in first
fn services_options(config: &CliConfig, command: &Command) -> ServicesOptions {
    let mut options = config.services_options();
    if matches!(command, Command::Login { .. }) {
        options.auto_login = false;
    }
    options
}

fn build_services(config: &CliConfig, options: ServicesOptions) -> Result<ConsumerHostServices> {
    let client = ConsumerHostClient::with_config(config.client_config(), &config.endpoint)
        .context("build consumer host client")?;
    let token_dir = config.token_dir()?;
    info!(token_dir = %token_dir.display(), "using token cache");

    let services = ConsumerHostServices::new(
        client,
        Arc::new(FileTokenStore::new(token_dir)),
        config.login_domain(),
        options,
    );
    Ok(if config.alert {
        services.with_notifier(Arc::new(ConsoleNotifier))
    } else {
        services
    })
}

fn load_wallet(private_key_env: &str, confirm_sign: bool) -> Result<Arc<dyn WalletSigner>> {
    let private_key = std::env::var(private_key_env)
        .with_context(|| format!("read private key from ${private_key_env}"))?;
    let wallet = EvmWalletSigner::new(&private_key).context("load wallet")?;
    info!(account = wallet.address(), "wallet loaded");

    Ok(if confirm_sign {
        Arc::new(ConfirmingWallet::new(wallet))
    } else {
        Arc::new(wallet)
    })
}

fn print_reply<T: Serialize>(reply: ApiReply<T>) -> Result<()> {
    match reply.body {
        ApiBody::Data(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        ApiBody::Error(err) => bail!(
            "consumer host error {} ({:?}): {}",
            err.code,
            err.code.category(),
            err.error
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            endpoint: "https://host.example".to_string(),
            chain_id: 137,
            domain_name: "Subquery".to_string(),
            token_dir: None,
            alert: true,
            auto_login: true,
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_login_command_skips_auto_login() {
        let cli = Cli::try_parse_from(["consumer-host", "login", "--refresh"]).unwrap();
        let options = services_options(&config(), &cli.command);

        assert!(!options.auto_login);
        assert!(options.alert);
    }

    #[test]
    fn test_other_commands_keep_auto_login() {
        let cli = Cli::try_parse_from(["consumer-host", "api-keys", "list"]).unwrap();
        assert!(services_options(&config(), &cli.command).auto_login);

        let cli = Cli::try_parse_from(["consumer-host", "channel-state", "0xchan"]).unwrap();
        assert!(services_options(&config(), &cli.command).auto_login);
    }
}
