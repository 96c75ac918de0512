use crate::error::{Error, Result};
use crate::stats::UserProfile;
use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("ghfetch/", env!("CARGO_PKG_VERSION"));

/// One page of owned, non-fork repositories (most starred first) plus the
/// scalar profile fields. The scalars come back identical on every page.
const PROFILE_QUERY: &str = r#"
query($login: String!, $after: String, $from: DateTime) {
    user(login: $login) {
        name
        repositories(
            first: 100,
            after: $after,
            ownerAffiliations: OWNER,
            isFork: false,
            orderBy: {direction: DESC, field: STARGAZERS}
        ) {
            nodes {
                stargazers {
                    totalCount
                }
            }
            pageInfo {
                endCursor
                hasNextPage
            }
        }
        followers {
            totalCount
        }
        following {
            totalCount
        }
        contributionsCollection(from: $from) {
            totalCommitContributions
        }
        pullRequests {
            totalCount
        }
        issues {
            totalCount
        }
    }
}
"#;

/// Sends one GraphQL document and hands back the decoded JSON reply.
pub(crate) trait GraphqlTransport {
    async fn execute(&self, body: Value) -> Result<Value>;
}

#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    http: Client,
    endpoint: String,
}

impl GithubClient {
    /// Create a GitHub GraphQL client. Every request, including the avatar
    /// download, is bounded by `timeout`.
    pub fn new(token: &str, endpoint: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            token: Arc::new(token.to_string()),
            http,
            endpoint: endpoint.to_string(),
        })
    }

    /// Shared HTTP client, reused for non-GraphQL downloads.
    pub fn http(&self) -> &Client {
        &self.http
    }
}

impl GraphqlTransport for GithubClient {
    async fn execute(&self, body: Value) -> Result<Value> {
        debug!(endpoint = %self.endpoint, "sending GraphQL request");

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&*self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
            what: "GraphQL response",
            source,
        })
    }
}

/// Request parameters for a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileQuery<'a> {
    pub login: &'a str,
    /// `None` asks for the first page.
    pub after: Option<String>,
    pub commits_since: NaiveDate,
}

impl ProfileQuery<'_> {
    pub fn to_body(&self) -> Value {
        json!({
            "query": PROFILE_QUERY,
            "variables": {
                "login": self.login,
                "after": self.after,
                "from": format!("{}T00:00:00Z", self.commits_since),
            }
        })
    }
}

/// Star counts and continuation state of one repository page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryPage {
    pub stars: Vec<u64>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ScalarFields {
    name: String,
    followers: u64,
    following: u64,
    commits: u64,
    pull_requests: u64,
    issues: u64,
}

#[derive(Debug)]
struct ProfilePage {
    scalars: ScalarFields,
    repositories: RepositoryPage,
}

#[derive(Deserialize)]
struct CountObj {
    #[serde(rename = "totalCount")]
    total_count: u64,
}

#[derive(Deserialize)]
struct ProfileResponse {
    data: Option<ProfileData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct ProfileData {
    user: Option<UserNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    name: Option<String>,
    repositories: RepositoryConnection,
    followers: CountObj,
    following: CountObj,
    contributions_collection: ContributionsCollection,
    pull_requests: CountObj,
    issues: CountObj,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryConnection {
    nodes: Option<Vec<Option<RepositoryNode>>>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
struct RepositoryNode {
    stargazers: CountObj,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    total_commit_contributions: u64,
}

impl ProfilePage {
    fn from_response(json: Value, login: &str) -> Result<Self> {
        let parsed: ProfileResponse =
            serde_json::from_value(json).map_err(|source| Error::Decode {
                what: "profile page",
                source,
            })?;

        if parsed
            .errors
            .iter()
            .any(|e| e.kind.as_deref() == Some("NOT_FOUND"))
        {
            return Err(Error::NotFound(login.to_string()));
        }
        if !parsed.errors.is_empty() {
            let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(Error::Api(messages.join("; ")));
        }

        let user = parsed
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| Error::NotFound(login.to_string()))?;

        let stars = user
            .repositories
            .nodes
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|n| n.stargazers.total_count)
            .collect();

        let end_cursor = user
            .repositories
            .page_info
            .end_cursor
            .filter(|c| !c.is_empty());

        Ok(Self {
            scalars: ScalarFields {
                name: user.name.unwrap_or_default(),
                followers: user.followers.total_count,
                following: user.following.total_count,
                commits: user.contributions_collection.total_commit_contributions,
                pull_requests: user.pull_requests.total_count,
                issues: user.issues.total_count,
            },
            repositories: RepositoryPage {
                stars,
                end_cursor,
                has_next_page: user.repositories.page_info.has_next_page,
            },
        })
    }
}

/// Running totals for one `fetch_profile` call.
#[derive(Debug, Default)]
struct ProfileAccumulator {
    pages: usize,
    repos: u64,
    stars: u64,
    scalars: ScalarFields,
}

impl ProfileAccumulator {
    /// Folds a page into the totals and returns its repository half so the
    /// caller can decide whether to continue.
    fn absorb(&mut self, page: ProfilePage) -> RepositoryPage {
        self.pages += 1;
        self.repos += page.repositories.stars.len() as u64;
        self.stars += page.repositories.stars.iter().sum::<u64>();
        self.scalars = page.scalars;
        page.repositories
    }

    fn finish(self) -> UserProfile {
        UserProfile {
            name: self.scalars.name,
            repos: self.repos,
            followers: self.scalars.followers,
            following: self.scalars.following,
            stars: self.stars,
            commits_this_year: self.scalars.commits,
            pull_requests: self.scalars.pull_requests,
            issues: self.scalars.issues,
        }
    }
}

/// First day of the calendar year containing `today`.
pub fn year_start(today: NaiveDate) -> NaiveDate {
    today.with_ordinal(1).unwrap_or(today)
}

/// Walk every repository page for `login` and aggregate the profile.
///
/// Pages are requested strictly in cursor order. Any failing page aborts the
/// whole fetch; more than `max_pages` pages fails with `TooManyPages`.
pub async fn fetch_profile<T: GraphqlTransport>(
    transport: &T,
    login: &str,
    commits_since: NaiveDate,
    max_pages: usize,
) -> Result<UserProfile> {
    let mut acc = ProfileAccumulator::default();
    let mut cursor: Option<String> = None;

    loop {
        if acc.pages >= max_pages {
            return Err(Error::TooManyPages(max_pages));
        }

        let query = ProfileQuery {
            login,
            after: cursor.take(),
            commits_since,
        };
        let json = transport.execute(query.to_body()).await?;
        let page = acc.absorb(ProfilePage::from_response(json, login)?);

        debug!(
            page = acc.pages,
            repos = page.stars.len(),
            has_next_page = page.has_next_page,
            "fetched repository page"
        );

        if !page.has_next_page {
            return Ok(acc.finish());
        }

        cursor = Some(
            page.end_cursor
                .ok_or(Error::MissingCursor { page: acc.pages })?,
        );
    }
}
