// src/content.rs
// =============================================================================
// The hand-off seam to the markdown-parsing subsystem.
//
// Parsing release notes and readmes is NOT implemented here: the framework
// owns a content pipeline and lends it to us through this one narrow
// interface. The helpers below only move markdown across the seam and
// attach whatever document comes back to the release record.
//
// Rust concepts:
// - Trait objects: &dyn ContentParser keeps the collaborator swappable
// - BoxFuture: An async method on an object-safe trait
// - join_all: Parsing a release batch concurrently
// =============================================================================

use futures::future::{join_all, BoxFuture};
use tracing::warn;

use crate::config::GithubConfig;
use crate::fetch::releases::sort_releases;
use crate::types::GithubRelease;

/// The markdown-parsing collaborator.
///
/// `id` is a synthetic document id like `github:v2.1.0.md`; `markdown` is
/// the raw body. The parser returns its document as loose JSON so this
/// crate needs no knowledge of the content pipeline's schema.
pub trait ContentParser: Send + Sync {
    fn parse<'a>(
        &'a self,
        id: &'a str,
        markdown: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<serde_json::Value>>;
}

// Hands one release body to the parser.
//
// Returns: the release with its parsed document attached, or None when the
// parser fails (the caller drops the release rather than rendering a body
// it could not parse). Releases with an empty body pass through untouched.
pub async fn parse_release(
    mut release: GithubRelease,
    parser: &dyn ContentParser,
    config: &GithubConfig,
) -> Option<GithubRelease> {
    if release.body.is_empty() || release.name.is_empty() {
        return Some(release);
    }

    let id = format!("github:{}.md", release.name);
    match parser.parse(&id, &release.body).await {
        Ok(document) => {
            release.document = Some(document);
            Some(release)
        }
        Err(err) => {
            warn!(
                error = %err,
                release = %release.name,
                repo = %format!("{}/{}", config.owner, config.repo),
                "cannot parse release notes"
            );
            None
        }
    }
}

/// Parses a batch of releases concurrently, drops the ones the parser
/// rejects, and sorts the survivors for rendering.
pub async fn parse_releases(
    releases: Vec<GithubRelease>,
    parser: &dyn ContentParser,
    config: &GithubConfig,
) -> Vec<GithubRelease> {
    let parsed = join_all(
        releases
            .into_iter()
            .map(|release| parse_release(release, parser, config)),
    )
    .await;

    let mut releases: Vec<GithubRelease> = parsed.into_iter().flatten().collect();
    sort_releases(&mut releases);
    releases
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a BoxFuture?
//    - A heap-allocated, type-erased future
//    - Plain `async fn` in a trait is not object-safe yet, and we need
//      &dyn ContentParser so the framework can inject any parser it likes
//
// 2. Why does parse_release take the release by value?
//    - It either hands the release back (possibly with a document attached)
//      or drops it; ownership makes "dropped on failure" explicit
// -----------------------------------------------------------------------------
