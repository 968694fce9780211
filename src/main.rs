// src/main.rs
// =============================================================================
// This is the entry point of the CLI wrapper around the library.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build a GithubConfig from the environment, overridden by flags
// 3. Dispatch to the fetch helper for the chosen subcommand
// 4. Print the result as a table-ish summary or pretty JSON
//
// Exit codes: 0 = success, 2 = internal error. The fetch helpers swallow
// API failures by design, so an empty result is still a success here.
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

use github_meta::{
    fetch_commits, fetch_readme, fetch_release, fetch_releases, fetch_repository,
    fetch_repository_contributors, fetch_file_contributors, sort_releases, CommitsQuery,
    ContributorsQuery, GithubConfig, ReleasesQuery,
};

#[tokio::main]
async fn main() {
    // Library warnings (the swallowed fetch failures) surface through
    // tracing; RUST_LOG controls the verbosity
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Environment first, flags win
    let mut config = GithubConfig::from_env();
    if let Some(owner) = &cli.owner {
        config.owner = owner.clone();
    }
    if let Some(repo) = &cli.repo {
        config.repo = repo.clone();
    }
    if let Some(branch) = &cli.branch {
        config.branch = branch.clone();
    }
    if let Some(token) = &cli.token {
        config.token = token.clone();
    }
    if let Some(api) = &cli.api {
        config.api = api.clone();
    }
    config.validate()?;

    match &cli.command {
        Commands::Releases { page, per_page } => {
            handle_releases(*page, *per_page, &config, cli.json).await
        }
        Commands::Release { tag, last } => {
            handle_release(tag.clone(), *last, &config, cli.json).await
        }
        Commands::Repository => handle_repository(&config, cli.json).await,
        Commands::Contributors { source, max } => {
            handle_contributors(source.clone(), *max, &config, cli.json).await
        }
        Commands::Commits { since_days, source } => {
            handle_commits(*since_days, source.clone(), &config, cli.json).await
        }
        Commands::Readme => handle_readme(&config, cli.json).await,
    }
}

async fn handle_releases(page: u32, per_page: u32, config: &GithubConfig, json: bool) -> Result<i32> {
    let query = ReleasesQuery {
        page,
        per_page,
        ..Default::default()
    };

    let mut releases = fetch_releases(&query, config).await;
    sort_releases(&mut releases);

    if json {
        println!("{}", serde_json::to_string_pretty(&releases)?);
        return Ok(0);
    }

    println!("📦 {} release(s) for {}/{}", releases.len(), config.owner, config.repo);
    for release in &releases {
        let date = release
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let marker = if release.prerelease { " (prerelease)" } else { "" };
        println!("   {:<20} {}{}", release.name, date, marker);
    }
    Ok(0)
}

async fn handle_release(
    tag: Option<String>,
    last: bool,
    config: &GithubConfig,
    json: bool,
) -> Result<i32> {
    let query = ReleasesQuery {
        tag,
        last,
        ..Default::default()
    };

    match fetch_release(&query, config).await {
        Some(release) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&release)?);
            } else {
                println!("📦 {} ({})", release.name, release.tag_name);
                if !release.body.is_empty() {
                    println!("\n{}", release.body);
                }
            }
            Ok(0)
        }
        None => {
            println!("⚠️  No release found (pass --tag <name> or --last)");
            Ok(0)
        }
    }
}

async fn handle_repository(config: &GithubConfig, json: bool) -> Result<i32> {
    let repository = fetch_repository(config).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&repository)?);
        return Ok(0);
    }

    println!("📁 {}", repository.full_name);
    if let Some(description) = &repository.description {
        println!("   {}", description);
    }
    println!(
        "   ⭐ {}   🍴 {}   🐛 {}",
        repository.stargazers_count, repository.forks_count, repository.open_issues_count
    );
    if !repository.topics.is_empty() {
        println!("   🏷️  {}", repository.topics.join(", "));
    }
    Ok(0)
}

async fn handle_contributors(
    source: Option<String>,
    max: u32,
    config: &GithubConfig,
    json: bool,
) -> Result<i32> {
    let query = ContributorsQuery { source, max };

    // A file path switches to the per-file history query
    let contributors = if query.source.is_some() {
        fetch_file_contributors(&query, config).await
    } else {
        fetch_repository_contributors(&query, config).await
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&contributors)?);
        return Ok(0);
    }

    println!("👥 {} contributor(s)", contributors.len());
    for contributor in &contributors {
        match &contributor.name {
            Some(name) => println!("   {} ({})", contributor.login, name),
            None => println!("   {}", contributor.login),
        }
    }
    Ok(0)
}

async fn handle_commits(
    since_days: i64,
    source: Option<String>,
    config: &GithubConfig,
    json: bool,
) -> Result<i32> {
    let query = CommitsQuery {
        since: Some(chrono::Utc::now() - chrono::Duration::days(since_days)),
        source,
    };

    let commits = fetch_commits(&query, config).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&commits)?);
        return Ok(0);
    }

    println!("🔨 {} commit(s) in the last {} day(s)", commits.len(), since_days);
    for commit in &commits {
        let authors: Vec<&str> = commit.authors.iter().map(|a| a.login.as_str()).collect();
        println!("   {:.7}  {}  [{}]", commit.hash, commit.message, authors.join(", "));
    }
    Ok(0)
}

async fn handle_readme(config: &GithubConfig, json: bool) -> Result<i32> {
    let readme = fetch_readme(config).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&readme)?);
        return Ok(0);
    }

    if readme.content.is_empty() {
        println!("⚠️  No readme found");
        return Ok(0);
    }

    println!("{}", readme.decoded_content()?);
    Ok(0)
}
