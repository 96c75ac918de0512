/// Aggregated profile handed to the panel renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub repos: u64,
    pub followers: u64,
    pub following: u64,
    pub stars: u64,
    pub commits_this_year: u64,
    pub pull_requests: u64,
    pub issues: u64,
}
