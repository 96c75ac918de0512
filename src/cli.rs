use crate::avatar::DEFAULT_AVATAR_HOST;
use crate::github::DEFAULT_GRAPHQL_URL;
use crate::panel::HighlightColor;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ghfetch",
    version,
    about = "Fetch a GitHub user's profile, just like neofetch"
)]
pub struct Cli {
    /// GitHub username
    #[arg(short, long)]
    pub user: Option<String>,

    /// Highlight color for labels
    #[arg(short, long, value_enum, default_value_t = HighlightColor::Blue)]
    pub color: HighlightColor,

    /// Your GitHub access token
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Extra profile rows as a JSON object, e.g. '{"Editor": "neovim"}'
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Give up after this many pages of repositories (100 per page)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: u64,

    #[arg(long, env = "GHFETCH_API_URL", default_value = DEFAULT_GRAPHQL_URL, hide = true)]
    pub api_url: String,

    #[arg(long, default_value = DEFAULT_AVATAR_HOST, hide = true)]
    pub avatar_host: String,
}
