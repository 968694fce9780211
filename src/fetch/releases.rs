// src/fetch/releases.rs
// =============================================================================
// Release fetching and normalization.
//
// Three ways to ask:
// - fetch_releases: a page of releases, drafts dropped
// - fetch_latest_release: GET /releases/latest
// - fetch_release_by_tag: GET /releases/tags/{tag}
//
// Normalization rules (kept bug-for-bug compatible with the framework
// module this replaces):
// - "Release 1.2.3" loses its "Release " prefix
// - names not starting with a letter gain a "v" prefix
// - the major version `v` is the digit at position 1 of the normalized
//   tag name ("v2.3.1" -> 2), 0 when absent
// - sorting is descending by `v`, then ascending by date within a version
//
// Rust concepts:
// - Iterator chains: filter + map over the raw payload
// - Option combinators: tolerating half-empty API objects
// =============================================================================

use std::cmp::Ordering;

use tracing::warn;
use url::Url;

use crate::client::{GithubClient, GithubResult};
use crate::config::{GithubConfig, ReleasesQuery};
use crate::types::{GithubAuthor, GithubRelease, RawRelease};

// Fetches a page of releases.
//
// Returns: the normalized releases, or an empty Vec when anything fails
// (network, auth, deserialization). The failure is logged, not retried.
pub async fn fetch_releases(query: &ReleasesQuery, config: &GithubConfig) -> Vec<GithubRelease> {
    match try_fetch_releases(query, config).await {
        Ok(releases) => releases,
        Err(err) => {
            warn!(error = %err, repo = %config.repo_url(), "cannot fetch github releases");
            Vec::new()
        }
    }
}

// Dispatches a single-release query: by tag when `tag` is set, otherwise
// the latest release when `last` is set. A query asking for neither has no
// single release to return.
pub async fn fetch_release(query: &ReleasesQuery, config: &GithubConfig) -> Option<GithubRelease> {
    if let Some(tag) = &query.tag {
        fetch_release_by_tag(tag, config).await
    } else if query.last {
        fetch_latest_release(config).await
    } else {
        None
    }
}

/// Fetches the latest (non-draft, non-prerelease) release.
pub async fn fetch_latest_release(config: &GithubConfig) -> Option<GithubRelease> {
    let url = format!("{}/releases/latest", config.repo_url());
    fetch_one(&url, config).await
}

/// Fetches one release by its tag name.
pub async fn fetch_release_by_tag(tag: &str, config: &GithubConfig) -> Option<GithubRelease> {
    let url = format!("{}/releases/tags/{}", config.repo_url(), tag);
    fetch_one(&url, config).await
}

async fn fetch_one(url: &str, config: &GithubConfig) -> Option<GithubRelease> {
    let raw: GithubResult<RawRelease> = async {
        let client = GithubClient::new(config.clone())?;
        client.get_json(url).await
    }
    .await;

    match raw {
        Ok(raw) => Some(normalize_release(raw)),
        Err(err) => {
            warn!(error = %err, %url, "cannot fetch github release");
            None
        }
    }
}

async fn try_fetch_releases(
    query: &ReleasesQuery,
    config: &GithubConfig,
) -> GithubResult<Vec<GithubRelease>> {
    let client = GithubClient::new(config.clone())?;

    let mut url = Url::parse(&format!("{}/releases", config.repo_url()))?;
    url.query_pairs_mut()
        .append_pair("per_page", &query.per_page.to_string())
        .append_pair("page", &query.page.to_string());

    let raw: Vec<RawRelease> = client.get_json(url.as_str()).await?;

    Ok(raw
        .into_iter()
        .filter(|release| !release.draft)
        .map(normalize_release)
        .collect())
}

// Maps one raw REST release onto the normalized record.
// A release with no name falls back to its tag name before normalization.
pub(crate) fn normalize_release(raw: RawRelease) -> GithubRelease {
    let tag_name = raw.tag_name.unwrap_or_default();
    let display = raw
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| tag_name.clone());

    GithubRelease {
        name: normalize_release_name(&display),
        v: major_version(&normalize_release_name(&tag_name)),
        tag_name,
        date: raw.published_at,
        body: raw.body.unwrap_or_default(),
        url: raw.html_url,
        tarball: raw.tarball_url,
        zipball: raw.zipball_url,
        prerelease: raw.prerelease,
        reactions: raw.reactions,
        author: raw.author.map(|author| GithubAuthor {
            name: author.login,
            url: author.html_url,
            avatar: author.avatar_url,
        }),
        document: None,
    }
}

// Normalizes a release name for display.
pub fn normalize_release_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    // remove "Release " prefix from release name
    let name = name.replacen("Release ", "", 1);

    // make sure release name starts with an alphabetical character
    if name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        name
    } else {
        format!("v{}", name)
    }
}

// The major version digit sits right after the leading "v" the normalizer
// guarantees. Anything fancier than one digit is out of scope here.
fn major_version(normalized_tag: &str) -> u32 {
    normalized_tag
        .chars()
        .nth(1)
        .and_then(|c| c.to_digit(10))
        .unwrap_or(0)
}

/// Sorts releases the way the framework's route handler expects them:
/// newest major version first; within one major version, oldest first.
pub fn sort_releases(releases: &mut [GithubRelease]) {
    releases.sort_by(|a, b| match b.v.cmp(&a.v) {
        Ordering::Equal => a.date.cmp(&b.date),
        other => other,
    });
}
