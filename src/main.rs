mod avatar;
mod cli;
mod config;
mod error;
mod github;
mod panel;
mod progress;
mod stats;
mod terminal;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use cli::Cli;
use config::Config;
use github::GithubClient;
use progress::Spinner;
use std::process::ExitCode;
use terminal::Layout;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(panel) => {
            println!("{panel}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout only ever carries the panel.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<String> {
    let config = Config::from_cli(cli)?;
    let spinner = Spinner::start(config.render.color);
    debug!(hidden = spinner.is_hidden(), "spinner started");

    let layout = Layout::probe()?;

    let client = GithubClient::new(&config.token, &config.api_url, config.timeout)?;

    spinner.set_message("drawing avatar");
    let avatar_url = avatar::avatar_url(&config.avatar_host, &config.login);
    let art = avatar::rasterize(client.http(), &avatar_url, layout.canvas, true).await?;

    spinner.set_message("fetching profile");
    let since = github::year_start(Utc::now().date_naive());
    let profile =
        github::fetch_profile(&client, &config.login, since, config.max_pages).await?;
    info!(
        login = %config.login,
        repos = profile.repos,
        stars = profile.stars,
        "profile fetched"
    );
    spinner.finish();

    Ok(panel::render(
        &art,
        &config.login,
        &profile,
        &config.render,
        &layout,
    ))
}
