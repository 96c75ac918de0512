use thiserror::Error;

/// Everything that can abort a run. Nothing is recovered locally; every
/// variant travels up to `main`, which prints it and exits non-zero.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("--profile must be a JSON object: {0}")]
    InvalidProfile(String),

    #[error("access token is not set (pass --access-token or set ACCESS_TOKEN)")]
    Auth,

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("GraphQL reported errors: {0}")]
    Api(String),

    #[error("GitHub user `{0}` was not found")]
    NotFound(String),

    #[error("page {page} reported more repositories but no cursor to continue from")]
    MissingCursor { page: usize },

    #[error("repository listing did not finish within {0} pages")]
    TooManyPages(usize),

    #[error("avatar could not be decoded: {0}")]
    Avatar(#[from] image::ImageError),

    #[error("could not read terminal size: {0}")]
    Terminal(#[source] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
