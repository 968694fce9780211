// src/types.rs
// =============================================================================
// Transient record types produced by the fetch helpers.
//
// Every type here lives for the duration of one request: it is deserialized
// from an API response, field-mapped, handed to the caller and dropped.
// Nothing is persisted or mutated after creation.
//
// Two kinds of shapes:
// - Raw* structs mirror the GitHub REST payloads field-for-field
// - The public records are the normalized shapes callers consume
//
// Rust concepts:
// - serde derive: Automatic (de)serialization
// - Option<T>: GitHub omits plenty of fields depending on the endpoint
// - #[serde(default)]: Tolerate missing fields instead of failing the call
// =============================================================================

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::GithubResult;

/// Raw release shape as returned by `/repos/{owner}/{repo}/releases`.
/// Only the fields the normalizer reads are declared.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRelease {
    #[serde(default)]
    pub draft: bool,
    pub name: Option<String>,
    pub tag_name: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub html_url: Option<String>,
    pub tarball_url: Option<String>,
    pub zipball_url: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    pub reactions: Option<serde_json::Value>,
    pub author: Option<RawAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthor {
    pub login: String,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,
}

/// A normalized release, ready for the framework to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubRelease {
    /// Display name, normalized (no "Release " prefix, leading "v" enforced)
    pub name: String,
    /// Original tag name, untouched
    pub tag_name: String,
    /// Publication timestamp
    pub date: Option<DateTime<Utc>>,
    /// Markdown body of the release notes
    pub body: String,
    /// Major version digit extracted from the tag name, 0 when absent
    pub v: u32,
    pub url: Option<String>,
    pub tarball: Option<String>,
    pub zipball: Option<String>,
    pub prerelease: bool,
    /// Reaction counts, passed through untouched
    pub reactions: Option<serde_json::Value>,
    pub author: Option<GithubAuthor>,
    /// Parsed document attached by a ContentParser, when one is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<serde_json::Value>,
}

/// Release author, mapped from login / html_url / avatar_url.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubAuthor {
    pub name: String,
    pub url: Option<String>,
    pub avatar: Option<String>,
}

/// Repository metadata from `/repos/{owner}/{repo}`.
///
/// Mostly a pass-through of the fields the framework renders. The whole
/// struct defaults to empty so a failed fetch can fall back to `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubRepository {
    pub id: Option<u64>,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub default_branch: Option<String>,
    pub topics: Vec<String>,
    pub license: Option<GithubLicense>,
    pub private: bool,
    pub fork: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubLicense {
    pub name: Option<String>,
    pub spdx_id: Option<String>,
}

/// Raw contributor shape from `/repos/{owner}/{repo}/contributors`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawContributor {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// A contributor, from either the REST listing or the GraphQL history.
/// `name` is only known for GraphQL-sourced users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubContributor {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

/// One commit from the GraphQL history query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubCommit {
    /// Full object id (sha)
    pub hash: String,
    /// Headline of the commit message, HTML-rendered by GitHub
    pub message: String,
    /// Human authors (bots and name-less accounts filtered out)
    pub authors: Vec<GithubCommitUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubCommitUser {
    pub name: String,
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Readme payload from `/repos/{owner}/{repo}/readme`.
/// `content` is base64 with newlines sprinkled in by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubReadme {
    pub name: String,
    pub path: String,
    pub sha: String,
    pub size: u64,
    pub content: String,
    pub encoding: String,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
}

impl GithubReadme {
    // Decodes the base64 content into markdown text.
    // The API wraps the payload at 60 columns, so whitespace is stripped
    // before decoding.
    pub fn decoded_content(&self) -> GithubResult<String> {
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_content() {
        let readme = GithubReadme {
            // "# Hello\n" encoded, split across lines like the API does
            content: "IyBIZWxs\nbwo=\n".to_string(),
            encoding: "base64".to_string(),
            ..Default::default()
        };
        assert_eq!(readme.decoded_content().unwrap(), "# Hello\n");
    }

    #[test]
    fn test_decoded_content_invalid_base64() {
        let readme = GithubReadme {
            content: "not base64 at all!!!".to_string(),
            ..Default::default()
        };
        assert!(readme.decoded_content().is_err());
    }

    #[test]
    fn test_repository_deserializes_sparse_payload() {
        // A failed or minimal response must still produce a usable record
        let repo: GithubRepository = serde_json::from_str(r#"{"name": "content"}"#).unwrap();
        assert_eq!(repo.name, "content");
        assert_eq!(repo.stargazers_count, 0);
        assert!(repo.topics.is_empty());
    }

    #[test]
    fn test_release_document_skipped_when_absent() {
        let release = GithubRelease {
            name: "v1.0.0".to_string(),
            tag_name: "v1.0.0".to_string(),
            date: None,
            body: String::new(),
            v: 1,
            url: None,
            tarball: None,
            zipball: None,
            prerelease: false,
            reactions: None,
            author: None,
            document: None,
        };
        let json = serde_json::to_string(&release).unwrap();
        assert!(!json.contains("document"));
    }
}
