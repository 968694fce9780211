// src/cli.rs
// =============================================================================
// This file defines the command-line interface using the `clap` crate.
//
// The CLI is a thin wrapper so the fetch helpers can be exercised outside
// the web framework: one subcommand per helper, shared repository flags,
// and a --json switch for machine-readable output.
//
// Rust concepts:
// - Derive macros: clap generates the parsing code from these structs
// - Global flags: Repository selection applies to every subcommand
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "github-meta",
    version,
    about = "Fetch GitHub releases, repository metadata, contributors, commits and readme content",
    long_about = "github-meta calls the GitHub REST and GraphQL APIs and prints the normalized \
                  records the library hands to its web framework. Repository and token default \
                  to the GITHUB_OWNER / GITHUB_REPO / GITHUB_TOKEN environment variables."
)]
pub struct Cli {
    /// Repository owner (falls back to GITHUB_OWNER)
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name (falls back to GITHUB_REPO)
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Branch for commit-history queries (falls back to GITHUB_BRANCH)
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Personal access token (falls back to GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API base URL, for GitHub Enterprise hosts (falls back to GITHUB_API)
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Output pretty-printed JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List releases (drafts excluded, names normalized)
    ///
    /// Example: github-meta releases --owner nuxt --repo content
    Releases {
        /// Page number, 1-based
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 100)]
        per_page: u32,
    },

    /// Fetch a single release, by tag or the latest one
    ///
    /// Example: github-meta release --tag v2.1.0
    Release {
        /// Tag name of the release to fetch
        #[arg(long, conflicts_with = "last")]
        tag: Option<String>,

        /// Fetch the latest release
        #[arg(long)]
        last: bool,
    },

    /// Fetch repository metadata (stars, forks, license, topics)
    Repository,

    /// List contributors, repo-wide or for a single file
    Contributors {
        /// File path; switches to the per-file GraphQL history query
        #[arg(long)]
        source: Option<String>,

        /// Maximum number of entries to request
        #[arg(long, default_value_t = 100)]
        max: u32,
    },

    /// List recent commits on the configured branch
    Commits {
        /// History window in days
        #[arg(long, default_value_t = 30)]
        since_days: i64,

        /// Restrict the history to one file path
        #[arg(long)]
        source: Option<String>,
    },

    /// Fetch and decode the repository readme
    Readme,
}
