use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::panel::{ExtraFields, RenderConfig};
use std::time::Duration;

/// Validated settings for one run. Building this performs no I/O, so every
/// input problem is reported before the terminal or network is touched.
#[derive(Debug, Clone)]
pub struct Config {
    pub login: String,
    pub token: String,
    pub render: RenderConfig,
    pub timeout: Duration,
    pub max_pages: usize,
    pub api_url: String,
    pub avatar_host: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let login = cli
            .user
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                Error::Config("please provide a GitHub username using the --user flag".into())
            })?;

        let token = cli
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::Auth)?;

        let extra = match cli.profile.as_deref() {
            Some(raw) => ExtraFields::parse(raw)?,
            None => ExtraFields::default(),
        };

        Ok(Self {
            login,
            token,
            render: RenderConfig {
                color: cli.color,
                extra,
            },
            timeout: Duration::from_secs(cli.timeout),
            max_pages: usize::try_from(cli.max_pages).unwrap_or(usize::MAX),
            api_url: cli.api_url,
            avatar_host: cli.avatar_host,
        })
    }
}
