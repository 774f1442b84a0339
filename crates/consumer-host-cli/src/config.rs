/*
[INPUT]:  Optional YAML configuration file and CONSUMER_HOST_* environment
[OUTPUT]: Parsed CLI configuration
[POS]:    Configuration layer - endpoint, login domain and cache location
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File};
use consumer_host_client::{ClientConfig, LoginDomain, ServicesOptions};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "CONSUMER_HOST";

/// Top-level configuration for the consumer host CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Consumer host base URL
    pub endpoint: String,
    /// Chain id used in the login domain and request body
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// EIP-712 domain name
    #[serde(default = "default_domain_name")]
    pub domain_name: String,
    /// Directory holding cached tokens
    #[serde(default)]
    pub token_dir: Option<PathBuf>,
    /// Print error replies as notifications
    #[serde(default)]
    pub alert: bool,
    /// Log in as soon as the wallet is loaded
    #[serde(default = "default_auto_login")]
    pub auto_login: bool,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_chain_id() -> u64 {
    LoginDomain::default().chain_id
}

fn default_domain_name() -> String {
    LoginDomain::default().name
}

fn default_auto_login() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

impl CliConfig {
    /// Load configuration: optional file first, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: Self = builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(anyhow!("Endpoint cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be positive"));
        }
        Ok(())
    }

    pub fn login_domain(&self) -> LoginDomain {
        LoginDomain::new(self.domain_name.clone(), self.chain_id)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        }
    }

    pub fn services_options(&self) -> ServicesOptions {
        ServicesOptions {
            alert: self.alert,
            auto_login: self.auto_login,
        }
    }

    /// Token cache directory, defaulting under the user data dir
    pub fn token_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.token_dir {
            return Ok(dir.clone());
        }
        let data_dir =
            dirs::data_dir().ok_or_else(|| anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("consumer-host").join("tokens"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_yaml_with_defaults() {
        let mut path = std::env::temp_dir();
        path.push(format!("consumer-host-cli-{}.yaml", std::process::id()));
        fs::write(&path, "endpoint: https://host.example\nalert: true\n").unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.endpoint, "https://host.example");
        assert_eq!(config.chain_id, 137);
        assert_eq!(config.domain_name, "Subquery");
        assert!(config.alert);
        assert!(config.auto_login);
        assert_eq!(config.client_config().timeout, Duration::from_secs(30));
        assert_eq!(config.login_domain(), LoginDomain::new("Subquery", 137));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let config = CliConfig {
            endpoint: " ".to_string(),
            chain_id: 137,
            domain_name: "Subquery".to_string(),
            token_dir: None,
            alert: false,
            auto_login: true,
            timeout_secs: 30,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_token_dir_wins() {
        let config = CliConfig {
            endpoint: "https://host.example".to_string(),
            chain_id: 80001,
            domain_name: "Subquery".to_string(),
            token_dir: Some(PathBuf::from("/tmp/tokens")),
            alert: false,
            auto_login: false,
            timeout_secs: 5,
        };
        assert_eq!(config.token_dir().unwrap(), PathBuf::from("/tmp/tokens"));
        assert!(!config.services_options().auto_login);
    }
}
