// src/fetch/contributors.rs
// =============================================================================
// Contributor listings, two flavors:
//
// - fetch_repository_contributors: one GET against the REST contributors
//   endpoint, mapped down to login + avatar
// - fetch_file_contributors: one GraphQL commit-history query restricted to
//   a file path, with bot accounts dropped and logins de-duplicated
//
// The GraphQL response is traversed dynamically (serde_json pointers)
// because GitHub omits whole subtrees when the branch or path is unknown;
// a missing subtree is just an empty result, not an error.
//
// Rust concepts:
// - serde_json::Value::pointer: JSON-pointer traversal of loose payloads
// - HashSet: First-occurrence de-duplication by login
// =============================================================================

use std::collections::HashSet;

use tracing::warn;
use url::Url;

use crate::client::{GithubClient, GithubResult};
use crate::config::{ContributorsQuery, GithubConfig};
use crate::fetch::is_bot;
use crate::types::{GithubContributor, RawContributor};

// Fetches the repository-wide contributor list.
//
// Returns: contributors as {login, avatar_url}, or an empty Vec on failure.
pub async fn fetch_repository_contributors(
    query: &ContributorsQuery,
    config: &GithubConfig,
) -> Vec<GithubContributor> {
    match try_fetch_repository_contributors(query, config).await {
        Ok(contributors) => contributors,
        Err(err) => {
            warn!(error = %err, repo = %config.repo_url(), "cannot fetch github contributors");
            Vec::new()
        }
    }
}

async fn try_fetch_repository_contributors(
    query: &ContributorsQuery,
    config: &GithubConfig,
) -> GithubResult<Vec<GithubContributor>> {
    let client = GithubClient::new(config.clone())?;

    let mut url = Url::parse(&format!("{}/contributors", config.repo_url()))?;
    url.query_pairs_mut()
        .append_pair("max", &query.max.to_string());

    let raw: Vec<RawContributor> = client.get_json(url.as_str()).await?;

    Ok(raw
        .into_iter()
        .map(|contributor| GithubContributor {
            login: contributor.login,
            name: None,
            avatar_url: contributor.avatar_url,
        })
        .collect())
}

// Fetches the people who touched one file, via the commit history.
//
// Only users with a display name survive, bots are dropped, and each login
// appears once (first occurrence wins). Failure or a missing history
// subtree both produce an empty Vec.
pub async fn fetch_file_contributors(
    query: &ContributorsQuery,
    config: &GithubConfig,
) -> Vec<GithubContributor> {
    let source = query.source.as_deref().unwrap_or_default();
    let gql = file_contributors_query(source, query.max, config);

    let data = async {
        let client = GithubClient::new(config.clone())?;
        client.graphql(&gql).await
    }
    .await;

    let data = match data {
        Ok(data) => data,
        Err(err) => {
            warn!(error = %err, %source, "cannot fetch github file contributors");
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

    let mut seen = HashSet::new();
    let mut contributors = Vec::new();

    let users = nodes
        .iter()
        .filter_map(|node| node.pointer("/authors/nodes").and_then(|n| n.as_array()))
        .flatten()
        .filter_map(|author| author.get("user"));

    for user in users {
        let name = user.get("name").and_then(|v| v.as_str()).unwrap_or_default();
        let login = user.get("login").and_then(|v| v.as_str()).unwrap_or_default();

        // accounts without a display name are usually automation; same
        // contract as the module this replaces
        if name.is_empty() || login.is_empty() || is_bot(login) {
            continue;
        }
        if !seen.insert(login.to_string()) {
            continue;
        }

        contributors.push(GithubContributor {
            login: login.to_string(),
            name: Some(name.to_string()),
            avatar_url: user
                .get("avatarUrl")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        });
    }

    contributors
}

fn file_contributors_query(source: &str, max: u32, config: &GithubConfig) -> String {
    format!(
        r#"query {{
  repository(owner: "{owner}", name: "{repo}") {{
    object(expression: "{branch}") {{
      ... on Commit {{
        history(first: {max}, path: "{source}") {{
          nodes {{
            authors(first: {max}) {{
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
        max = max,
        source = source,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api: String) -> GithubConfig {
        GithubConfig::new()
            .with_api(api)
            .with_owner("nuxt")
            .with_repo("content")
    }

    #[test]
    fn test_file_contributors_query_shape() {
        let config = GithubConfig::new().with_owner("nuxt").with_repo("content");
        let gql = file_contributors_query("docs/index.md", 50, &config);

        assert!(gql.contains(r#"repository(owner: "nuxt", name: "content")"#));
        assert!(gql.contains(r#"object(expression: "main")"#));
        assert!(gql.contains(r#"history(first: 50, path: "docs/index.md")"#));
    }

    #[tokio::test]
    async fn test_fetch_repository_contributors_maps_fields() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!([
            { "login": "atinux", "avatar_url": "https://a/1", "contributions": 420 },
            { "login": "danielroe", "avatar_url": "https://a/2", "contributions": 99 }
        ]);
        let _mock = server
            .mock("GET", "/repos/nuxt/content/contributors")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let contributors =
            fetch_repository_contributors(&ContributorsQuery::default(), &test_config(server.url()))
                .await;

        assert_eq!(contributors.len(), 2);
        assert_eq!(contributors[0].login, "atinux");
        assert_eq!(contributors[0].avatar_url.as_deref(), Some("https://a/1"));
        assert!(contributors[0].name.is_none());
    }

    #[tokio::test]
    async fn test_fetch_repository_contributors_falls_back_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/nuxt/content/contributors")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let contributors =
            fetch_repository_contributors(&ContributorsQuery::default(), &test_config(server.url()))
                .await;
        assert!(contributors.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_file_contributors_filters_and_dedupes() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "data": {
                "repository": {
                    "object": {
                        "history": {
                            "nodes": [
                                { "authors": { "nodes": [
                                    { "user": { "name": "Sebastien", "login": "atinux", "avatarUrl": "https://a/1" } },
                                    { "user": { "name": "Renovate", "login": "renovate[bot]", "avatarUrl": "https://a/b" } }
                                ] } },
                                { "authors": { "nodes": [
                                    { "user": { "name": "Sebastien", "login": "atinux", "avatarUrl": "https://a/1" } },
                                    { "user": { "name": null, "login": "ghost" } }
                                ] } }
                            ]
                        }
                    }
                }
            }
        });
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let query = ContributorsQuery {
            source: Some("docs/index.md".to_string()),
            max: 100,
        };
        let contributors = fetch_file_contributors(&query, &test_config(server.url())).await;

        // bot dropped, name-less user dropped, duplicate login collapsed
        assert_eq!(contributors.len(), 1);
        assert_eq!(contributors[0].login, "atinux");
        assert_eq!(contributors[0].name.as_deref(), Some("Sebastien"));
    }

    #[tokio::test]
    async fn test_fetch_file_contributors_missing_subtree_is_empty() {
        let mut server = mockito::Server::new_async().await;
        // unknown branch: GitHub returns object: null rather than an error
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"repository": {"object": null}}}"#)
            .create_async()
            .await;

        let contributors =
            fetch_file_contributors(&ContributorsQuery::default(), &test_config(server.url()))
                .await;
        assert!(contributors.is_empty());
    }
}
