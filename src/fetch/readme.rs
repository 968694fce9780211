// src/fetch/readme.rs
// =============================================================================
// Readme content: one GET against `/repos/{owner}/{repo}/readme`.
//
// GitHub picks the readme file itself (README.md, Readme.md, ...) and
// returns its content base64-encoded; GithubReadme::decoded_content() turns
// it back into markdown for the caller's parsing subsystem.
// =============================================================================

use tracing::warn;

use crate::client::{GithubClient, GithubResult};
use crate::config::GithubConfig;
use crate::types::GithubReadme;

// Fetches the repository readme.
//
// Returns: the readme record, or GithubReadme::default() on failure.
pub async fn fetch_readme(config: &GithubConfig) -> GithubReadme {
    let url = format!("{}/readme", config.repo_url());

    let result: GithubResult<GithubReadme> = async {
        let client = GithubClient::new(config.clone())?;
        client.get_json(&url).await
    }
    .await;

    match result {
        Ok(readme) => readme,
        Err(err) => {
            warn!(error = %err, %url, "cannot fetch github readme");
            GithubReadme::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_readme_decodes_content() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "name": "README.md",
            "path": "README.md",
            "sha": "deadbeef",
            "size": 8,
            "content": "IyBIZWxs\nbwo=\n",
            "encoding": "base64",
            "html_url": "https://github.com/nuxt/content/blob/main/README.md"
        });
        let _mock = server
            .mock("GET", "/repos/nuxt/content/readme")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let config = GithubConfig::new()
            .with_api(server.url())
            .with_owner("nuxt")
            .with_repo("content");
        let readme = fetch_readme(&config).await;

        assert_eq!(readme.name, "README.md");
        assert_eq!(readme.decoded_content().unwrap(), "# Hello\n");
    }

    #[tokio::test]
    async fn test_fetch_readme_falls_back_to_default() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/nuxt/content/readme")
            .with_status(404)
            .create_async()
            .await;

        let config = GithubConfig::new()
            .with_api(server.url())
            .with_owner("nuxt")
            .with_repo("content");
        let readme = fetch_readme(&config).await;

        assert!(readme.content.is_empty());
        assert_eq!(readme.decoded_content().unwrap(), "");
    }
}
