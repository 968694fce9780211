// src/config.rs
// =============================================================================
// This module holds the configuration shared by every fetch helper.
//
// What lives here:
// - GithubConfig: API base URL, owner, repo, branch and token
// - Query records: per-request options for releases, contributors and commits
// - decode_params: decodes the framework's route-param strings
// - override_with: merges per-request params over the configured defaults
//
// There is no global state. Configuration is plain data passed by value or
// reference into each helper, so every call is independently testable.
//
// Rust concepts:
// - Default trait: Sensible zero-config values
// - Builder methods: Chainable with_* setters
// - HashMap: Key/value storage for decoded params
// =============================================================================

use std::collections::HashMap;
use std::env;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{GithubError, GithubResult};

/// Connection settings for one GitHub repository.
///
/// `api` is overridable so tests can point the helpers at a local mock
/// server, and so GitHub Enterprise hosts work unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL of the API, without a trailing slash
    pub api: String,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch used for GraphQL commit-history queries
    pub branch: String,
    /// Personal access token; empty means unauthenticated requests
    pub token: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api: "https://api.github.com".to_string(),
            owner: String::new(),
            repo: String::new(),
            branch: "main".to_string(),
            token: String::new(),
        }
    }
}

impl GithubConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // Reads configuration from the environment.
    //
    // GITHUB_OWNER and GITHUB_REPO select the repository; GITHUB_TOKEN,
    // GITHUB_BRANCH and GITHUB_API are optional. Missing variables fall back
    // to the defaults, so the result may still fail validate() if owner or
    // repo were never provided.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api: env::var("GITHUB_API").unwrap_or(defaults.api),
            owner: env::var("GITHUB_OWNER").unwrap_or(defaults.owner),
            repo: env::var("GITHUB_REPO").unwrap_or(defaults.repo),
            branch: env::var("GITHUB_BRANCH").unwrap_or(defaults.branch),
            token: env::var("GITHUB_TOKEN").unwrap_or(defaults.token),
        }
    }

    pub fn with_api(mut self, api: impl Into<String>) -> Self {
        self.api = api.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = repo.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    // Checks that the config can address a repository at all.
    // The token stays optional: unauthenticated requests work, just with
    // lower rate limits.
    pub fn validate(&self) -> GithubResult<()> {
        if self.api.is_empty() {
            return Err(GithubError::InvalidConfig {
                message: "api base URL cannot be empty".to_string(),
            });
        }
        if self.owner.is_empty() {
            return Err(GithubError::InvalidConfig {
                message: "owner cannot be empty".to_string(),
            });
        }
        if self.repo.is_empty() {
            return Err(GithubError::InvalidConfig {
                message: "repo cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Base REST path for this repository, e.g.
    /// `https://api.github.com/repos/nuxt/content`
    pub fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.api, self.owner, self.repo)
    }

    // Merges decoded route params over this config.
    //
    // Only the keys the framework is allowed to override are honored:
    // owner, repo, branch, api and token. The request value wins when
    // present; everything else keeps the configured default.
    pub fn override_with(&self, params: &HashMap<String, String>) -> Self {
        let mut merged = self.clone();
        if let Some(owner) = params.get("owner") {
            merged.owner = owner.clone();
        }
        if let Some(repo) = params.get("repo") {
            merged.repo = repo.clone();
        }
        if let Some(branch) = params.get("branch") {
            merged.branch = branch.clone();
        }
        if let Some(api) = params.get("api") {
            merged.api = api.clone();
        }
        if let Some(token) = params.get("token") {
            merged.token = token.clone();
        }
        merged
    }
}

// Decodes a route-param string into key/value pairs.
//
// The framework encodes per-request overrides into a single path segment
// shaped like "owner_nuxt:repo_content.json":
// - a trailing ".json" is stripped
// - pairs are separated by ':'
// - within a pair, the first '_' separates key from value, so values may
//   themselves contain underscores ("repo_my_repo" -> repo = "my_repo")
pub fn decode_params(params: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();
    let params = params.strip_suffix(".json").unwrap_or(params);

    for param in params.split(':') {
        if param.is_empty() {
            continue;
        }
        let mut pieces = param.splitn(2, '_');
        let key = pieces.next().unwrap_or_default();
        let value = pieces.next().unwrap_or_default();
        if key.is_empty() {
            continue;
        }
        result.insert(key.to_string(), value.to_string());
    }

    result
}

/// Options for listing releases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasesQuery {
    /// Page number, 1-based
    pub page: u32,
    /// Page size
    pub per_page: u32,
    /// Fetch a single release by tag instead of listing
    pub tag: Option<String>,
    /// Fetch only the latest release instead of listing
    pub last: bool,
}

impl Default for ReleasesQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 100,
            tag: None,
            last: false,
        }
    }
}

/// Options for contributor listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorsQuery {
    /// Restrict to contributors of one file path (GraphQL history query)
    pub source: Option<String>,
    /// Maximum number of entries to ask the API for
    pub max: u32,
}

impl Default for ContributorsQuery {
    fn default() -> Self {
        Self {
            source: None,
            max: 100,
        }
    }
}

/// Options for the commit-history query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitsQuery {
    /// Only commits after this instant; defaults to 30 days before now
    pub since: Option<DateTime<Utc>>,
    /// Restrict the history to one file path
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GithubConfig::default();
        assert_eq!(config.api, "https://api.github.com");
        assert_eq!(config.branch, "main");
        assert!(config.token.is_empty());
        // owner/repo are required, so the zero config does not validate
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = GithubConfig::new()
            .with_owner("nuxt")
            .with_repo("content")
            .with_branch("dev")
            .with_token("secret");
        assert!(config.validate().is_ok());
        assert_eq!(config.repo_url(), "https://api.github.com/repos/nuxt/content");
        assert_eq!(config.branch, "dev");
    }

    #[test]
    fn test_validate_missing_repo() {
        let config = GithubConfig::new().with_owner("nuxt");
        match config.validate() {
            Err(GithubError::InvalidConfig { message }) => {
                assert!(message.contains("repo"));
            }
            _ => panic!("expected InvalidConfig error"),
        }
    }

    #[test]
    fn test_decode_params_basic() {
        let params = decode_params("owner_nuxt:repo_content.json");
        assert_eq!(params.get("owner").unwrap(), "nuxt");
        assert_eq!(params.get("repo").unwrap(), "content");
    }

    #[test]
    fn test_decode_params_value_with_underscores() {
        let params = decode_params("repo_my_long_repo");
        assert_eq!(params.get("repo").unwrap(), "my_long_repo");
    }

    #[test]
    fn test_decode_params_empty() {
        assert!(decode_params("").is_empty());
        assert!(decode_params(".json").is_empty());
    }

    #[test]
    fn test_override_with_only_known_keys() {
        let config = GithubConfig::new().with_owner("nuxt").with_repo("content");
        let mut params = HashMap::new();
        params.insert("repo".to_string(), "framework".to_string());
        params.insert("bogus".to_string(), "ignored".to_string());

        let merged = config.override_with(&params);
        assert_eq!(merged.owner, "nuxt");
        assert_eq!(merged.repo, "framework");
        // the original config is untouched
        assert_eq!(config.repo, "content");
    }

    #[test]
    fn test_releases_query_defaults() {
        let query = ReleasesQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 100);
        assert!(query.tag.is_none());
        assert!(!query.last);
    }
}
