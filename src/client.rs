// src/client.rs
// =============================================================================
// HTTP plumbing shared by every fetch helper.
//
// Two entry points:
// - get_json: one GET against the REST API, deserialized into a record
// - graphql: one POST against {api}/graphql, with the {"data": ...}
//   envelope unwrapped
//
// There are deliberately no retries and no backoff here. A request either
// succeeds or returns a GithubError; the fetch helpers above this layer
// decide what the empty fallback looks like.
//
// Rust concepts:
// - thiserror: Deriving Display/Error/From for the error enum
// - serde::de::DeserializeOwned: Generic "any deserializable type" bound
// =============================================================================

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::GithubConfig;

const USER_AGENT: &str = concat!("github-meta/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything that can go wrong on the way to and from the API.
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("graphql error: {0}")]
    GraphQl(String),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),
}

pub type GithubResult<T> = Result<T, GithubError>;

// GraphQL responses come wrapped in an envelope: errors (if any) sit next
// to the data instead of in the HTTP status.
#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// A thin wrapper around reqwest::Client carrying the repo configuration
/// and the auth header.
pub struct GithubClient {
    client: Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> GithubResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, config })
    }

    // Attaches the token header only when a token is configured.
    // Unauthenticated requests are legal, just rate-limited harder.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.config.token.is_empty() {
            request
        } else {
            request.header(AUTHORIZATION, format!("token {}", self.config.token))
        }
    }

    /// One GET request, JSON-deserialized.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> GithubResult<T> {
        debug!(%url, "GET");

        let response = self.authorize(self.client.get(url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// One GraphQL query against `{api}/graphql`, returning the unwrapped
    /// `data` value. GraphQL-level errors become GithubError::GraphQl.
    pub async fn graphql(&self, query: &str) -> GithubResult<serde_json::Value> {
        let url = format!("{}/graphql", self.config.api);
        debug!(%url, "POST graphql");

        let response = self
            .authorize(self.client.post(&url))
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status { status, url });
        }

        let envelope: GraphqlEnvelope = response.json().await?;

        if let Some(errors) = envelope.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(GithubError::GraphQl(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| GithubError::GraphQl("response contained no data".to_string()))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a custom error enum instead of anyhow?
//    - The fetch helpers match on the error to decide their fallback
//    - thiserror derives Display and From, so `?` still works everywhere
//
// 2. What does DeserializeOwned mean?
//    - "Any type serde can deserialize without borrowing from the input"
//    - Needed because the response body is consumed by .json()
//
// 3. Why unwrap the GraphQL envelope here?
//    - GraphQL reports failures inside a 200 response, next to the data
//    - Callers should see one error type, not two failure channels
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GithubConfig;

    fn test_config(api: String) -> GithubConfig {
        GithubConfig::new()
            .with_api(api)
            .with_owner("nuxt")
            .with_repo("content")
    }

    #[tokio::test]
    async fn test_get_json_surfaces_status_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/nuxt/content")
            .with_status(404)
            .create_async()
            .await;

        let client = GithubClient::new(test_config(server.url())).unwrap();
        let url = format!("{}/repos/nuxt/content", server.url());
        let result: GithubResult<serde_json::Value> = client.get_json(&url).await;

        match result {
            Err(GithubError::Status { status, .. }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
            _ => panic!("expected a status error"),
        }
    }

    #[tokio::test]
    async fn test_get_json_sends_token_header() {
        let mut server = mockito::Server::new_async().await;
        // the mock only matches when the exact header is present, so a
        // successful response proves the header was sent
        let _mock = server
            .mock("GET", "/repos/nuxt/content")
            .match_header("authorization", "token secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let config = test_config(server.url()).with_token("secret");
        let client = GithubClient::new(config).unwrap();
        let url = format!("{}/repos/nuxt/content", server.url());
        let result: GithubResult<serde_json::Value> = client.get_json(&url).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_json_unauthenticated_without_token() {
        let mut server = mockito::Server::new_async().await;
        // no token configured: the request must carry no Authorization
        // header at all, not an empty one
        let _mock = server
            .mock("GET", "/repos/nuxt/content")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = GithubClient::new(test_config(server.url())).unwrap();
        let url = format!("{}/repos/nuxt/content", server.url());
        let result: GithubResult<serde_json::Value> = client.get_json(&url).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_graphql_unwraps_data() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"viewer": {"login": "nuxt-bot"}}}"#)
            .create_async()
            .await;

        let client = GithubClient::new(test_config(server.url())).unwrap();
        let data = client.graphql("query { viewer { login } }").await.unwrap();
        assert_eq!(data["viewer"]["login"], "nuxt-bot");
    }

    #[tokio::test]
    async fn test_graphql_surfaces_graphql_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": null, "errors": [{"message": "Bad credentials"}]}"#)
            .create_async()
            .await;

        let client = GithubClient::new(test_config(server.url())).unwrap();
        let result = client.graphql("query { viewer { login } }").await;

        match result {
            Err(GithubError::GraphQl(message)) => {
                assert!(message.contains("Bad credentials"));
            }
            _ => panic!("expected a graphql error"),
        }
    }
}
