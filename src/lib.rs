// src/lib.rs
// =============================================================================
// github-meta: server-side helpers to fetch GitHub metadata.
//
// What this library does:
// - Fetches releases, repository metadata, contributors, commits and readme
//   content from the GitHub REST and GraphQL APIs
// - Normalizes the raw API shapes into small plain records
// - Swallows failures: every fetch_* helper logs a warning and returns an
//   empty fallback value instead of an error
//
// What it deliberately does NOT do:
// - No retries, no backoff, no caching (the calling framework wraps these
//   helpers in its own time-boxed cache)
// - No markdown parsing (handed off through the ContentParser trait)
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Re-exports: Shaping the public API surface
// =============================================================================

pub mod client;        // src/client.rs - HTTP and GraphQL plumbing
pub mod config;        // src/config.rs - configuration and query records
pub mod content;       // src/content.rs - markdown hand-off seam
pub mod fetch;         // src/fetch/ - the fetch-and-transform helpers
pub mod types;         // src/types.rs - transient record types

// Re-export the pieces callers actually touch
pub use client::{GithubClient, GithubError, GithubResult};
pub use config::{
    decode_params, CommitsQuery, ContributorsQuery, GithubConfig, ReleasesQuery,
};
pub use content::{parse_release, parse_releases, ContentParser};
pub use fetch::commits::fetch_commits;
pub use fetch::contributors::{fetch_file_contributors, fetch_repository_contributors};
pub use fetch::readme::fetch_readme;
pub use fetch::releases::{
    fetch_latest_release, fetch_release, fetch_release_by_tag, fetch_releases,
    normalize_release_name, sort_releases,
};
pub use fetch::repository::fetch_repository;
pub use types::{
    GithubAuthor, GithubCommit, GithubCommitUser, GithubContributor, GithubReadme,
    GithubRelease, GithubRepository,
};
