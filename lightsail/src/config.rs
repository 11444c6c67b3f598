//! Provider configuration
//!
//! Values set explicitly win; otherwise they are read from the environment,
//! the same way the Terraform provider block falls back to `AWS_*` variables.

use aws_config::{BehaviorVersion, Region};
use thiserror::Error;
use url::Url;

use crate::api::Client;

pub const DEFAULT_REGION: &str = "us-east-1";

pub const REGION_ENV: &str = "AWS_REGION";
pub const PROFILE_ENV: &str = "AWS_PROFILE";
pub const ENDPOINT_ENV: &str = "LIGHTSAIL_ENDPOINT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint: Option<String>,
}

/// Configuration after explicit values and environment have been merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub region: String,
    pub profile: Option<String>,
    pub endpoint: Option<Url>,
}

fn from_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let region = self
            .region
            .clone()
            .or_else(|| from_env(REGION_ENV))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        if region.trim().is_empty() {
            return Err(ConfigError::Empty("region"));
        }

        let profile = self.profile.clone().or_else(|| from_env(PROFILE_ENV));
        if profile.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::Empty("profile"));
        }

        let endpoint = self
            .endpoint
            .clone()
            .or_else(|| from_env(ENDPOINT_ENV))
            .map(|raw| parse_endpoint(&raw))
            .transpose()?;

        Ok(ResolvedConfig {
            region,
            profile,
            endpoint,
        })
    }

    /// Loads the AWS shared configuration and builds the Lightsail client
    pub async fn client(&self) -> Result<Client, ConfigError> {
        let resolved = self.resolve()?;
        tracing::debug!(
            "Configuring Lightsail client for region {} (profile: {:?}, endpoint: {:?})",
            resolved.region,
            resolved.profile,
            resolved.endpoint.as_ref().map(Url::as_str)
        );

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(resolved.region));
        if let Some(profile) = &resolved.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &resolved.endpoint {
            loader = loader.endpoint_url(endpoint.as_str());
        }

        let sdk_config = loader.load().await;
        Ok(Client::new(&sdk_config))
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            endpoint: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
