pub mod config;
pub mod export;
pub mod networks;

use anyhow::Context;
use socials_core::client::{ClientOptions, IntercomClient};
use socials_core::config::{Config, WarnLevel};
use socials_core::SocialsError;
use std::path::PathBuf;
use std::time::Duration;

/// Flags shared by every command.
pub struct GlobalArgs {
    pub api_token: Option<String>,
    pub api_url: Option<String>,
    pub config: Option<PathBuf>,
}

/// Config file values with command-line and environment overrides applied.
pub fn effective_config(
    global: &GlobalArgs,
    export: &crate::ExportArgs,
) -> anyhow::Result<Config> {
    let mut config = Config::load(global.config.as_deref()).with_context(|| match &global.config {
        Some(path) => format!("failed to load config {}", path.display()),
        None => "failed to load config".to_string(),
    })?;

    if let Some(url) = &global.api_url {
        config.api_url = url.clone();
    }
    if let Some(output) = &export.output {
        config.output = output.clone();
    }
    if let Some(n) = export.per_page {
        config.per_page = Some(n);
    }
    if let Some(include) = export.include_empty_override() {
        config.include_empty = include;
    }
    Ok(config)
}

/// Refuse to talk to the API with a config `config validate` would reject.
/// Warnings are logged and do not stop the run.
pub fn check_config(config: &Config) -> anyhow::Result<()> {
    let warnings = config.validate();
    for w in &warnings {
        match w.level {
            WarnLevel::Warning => tracing::warn!("{}", w.message),
            WarnLevel::Error => tracing::error!("{}", w.message),
        }
    }
    if Config::has_errors(&warnings) {
        let messages: Vec<&str> = warnings
            .iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message.as_str())
            .collect();
        anyhow::bail!("invalid configuration: {}", messages.join("; "));
    }
    Ok(())
}

pub fn build_client(global: &GlobalArgs, config: &Config) -> anyhow::Result<IntercomClient> {
    check_config(config)?;
    let token = global
        .api_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(SocialsError::MissingToken)?;

    let client = IntercomClient::new(ClientOptions {
        api_url: config.api_url.clone(),
        token: token.to_string(),
        per_page: config.per_page,
        timeout: Duration::from_secs(config.timeout_secs),
    })
    .context("failed to create API client")?;
    tracing::debug!(url = %client.first_page_url(), "client ready");
    Ok(client)
}
