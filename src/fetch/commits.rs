// src/fetch/commits.rs
// =============================================================================
// Commit history over the GraphQL API.
//
// One query: the history of the configured branch since a timestamp
// (default: 30 days back), optionally restricted to a file path. Each node
// maps to {hash, message, authors}; authors keep at most the first five
// users per commit (GraphQL `first: 5`), minus bots and name-less accounts.
// =============================================================================

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use crate::client::GithubClient;
use crate::config::{CommitsQuery, GithubConfig};
use crate::fetch::is_bot;
use crate::types::{GithubCommit, GithubCommitUser};

const DEFAULT_WINDOW_DAYS: i64 = 30;
const AUTHORS_PER_COMMIT: u32 = 5;

// Fetches recent commits on the configured branch.
//
// Returns: normalized commits, or an empty Vec when the call fails or the
// branch/path does not exist (GitHub answers those with a null subtree).
pub async fn fetch_commits(query: &CommitsQuery, config: &GithubConfig) -> Vec<GithubCommit> {
    let since = query
        .since
        .unwrap_or_else(|| Utc::now() - chrono::Duration::days(DEFAULT_WINDOW_DAYS));
    let gql = commits_query(since, query.source.as_deref(), config);

    let data = async {
        let client = GithubClient::new(config.clone())?;
        client.graphql(&gql).await
    }
    .await;

    let data = match data {
        Ok(data) => data,
        Err(err) => {
            warn!(error = %err, repo = %config.repo_url(), "cannot fetch github commits");
            return Vec::new();
        }
    };

    let nodes = match data
        .pointer("/repository/object/history/nodes")
        .and_then(|nodes| nodes.as_array())
    {
        Some(nodes) => nodes,
        None => return Vec::new(),
    };

    nodes
        .iter()
        .map(|node| GithubCommit {
            hash: node
                .get("oid")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            message: node
                .get("messageHeadlineHTML")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            authors: commit_authors(node),
        })
        .collect()
}

fn commit_authors(node: &serde_json::Value) -> Vec<GithubCommitUser> {
    let authors = match node
        .pointer("/authors/nodes")
        .and_then(|nodes| nodes.as_array())
    {
        Some(authors) => authors,
        None => return Vec::new(),
    };

    authors
        .iter()
        .filter_map(|author| author.get("user"))
        .filter_map(|user| {
            let name = user.get("name").and_then(|v| v.as_str())?;
            let login = user.get("login").and_then(|v| v.as_str())?;
            if name.is_empty() || is_bot(login) {
                return None;
            }
            Some(GithubCommitUser {
                name: name.to_string(),
                login: login.to_string(),
                avatar_url: user
                    .get("avatarUrl")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            })
        })
        .collect()
}

fn commits_query(since: DateTime<Utc>, source: Option<&str>, config: &GithubConfig) -> String {
    // GraphQL GitTimestamp wants RFC 3339; match the millisecond format
    // the framework module sent
    let since = since.to_rfc3339_opts(SecondsFormat::Millis, true);
    let path = source
        .map(|source| format!(r#", path: "{}""#, source))
        .unwrap_or_default();

    format!(
        r#"query {{
  repository(owner: "{owner}", name: "{repo}") {{
    object(expression: "{branch}") {{
      ... on Commit {{
        history(since: "{since}"{path}) {{
          nodes {{
            oid
            messageHeadlineHTML
            authors(first: {authors}) {{
              nodes {{
                user {{
                  name
                  avatarUrl
                  login
                }}
              }}
            }}
          }}
        }}
      }}
    }}
  }}
}}"#,
        owner = config.owner,
        repo = config.repo,
        branch = config.branch,
        since = since,
        path = path,
        authors = AUTHORS_PER_COMMIT,
    )
}
