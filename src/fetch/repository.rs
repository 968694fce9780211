// src/fetch/repository.rs
// =============================================================================
// Repository metadata: one GET, no transform beyond deserialization.
//
// The fallback here is an empty GithubRepository rather than None, because
// the framework renders the record field-by-field and an empty object keeps
// its templates happy (same contract as the module this replaces).
// =============================================================================

use tracing::warn;

use crate::client::{GithubClient, GithubResult};
use crate::config::GithubConfig;
use crate::types::GithubRepository;

// Fetches the repository metadata from `/repos/{owner}/{repo}`.
//
// Returns: the repository record, or GithubRepository::default() when the
// call fails (private repo without a token, typo in the name, network).
pub async fn fetch_repository(config: &GithubConfig) -> GithubRepository {
    let url = config.repo_url();

    let result: GithubResult<GithubRepository> = async {
        let client = GithubClient::new(config.clone())?;
        client.get_json(&url).await
    }
    .await;

    match result {
        Ok(repository) => repository,
        Err(err) => {
            warn!(error = %err, %url, "cannot fetch github repository");
            GithubRepository::default()
        }
    }
}
