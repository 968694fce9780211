// src/fetch/mod.rs
// =============================================================================
// The fetch-and-transform helpers, one file per GitHub resource.
//
// Shared contract:
// - Every public fetch_* function performs exactly one outbound call
//   followed by a field-mapping transform
// - Failures never propagate: the helper logs a warning and returns an
//   empty fallback (empty Vec, Default struct, or None)
//
// Rust concepts:
// - Modules: One file per resource keeps each helper independently testable
// =============================================================================

pub mod commits;       // GraphQL commit history
pub mod contributors;  // REST + GraphQL contributor listings
pub mod readme;        // readme content
pub mod releases;      // release listings and normalization
pub mod repository;    // repository metadata

// Bot accounts show up in GraphQL author lists and are never worth
// rendering. GitHub has no single marker, so match the common conventions.
pub(crate) fn is_bot(login: &str) -> bool {
    login.contains("[bot]") || login.contains("-bot") || login.contains(".bot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_bot_variants() {
        assert!(is_bot("dependabot[bot]"));
        assert!(is_bot("renovate-bot"));
        assert!(is_bot("team.bot"));
    }

    #[test]
    fn test_is_bot_rejects_humans() {
        assert!(!is_bot("atinux"));
        assert!(!is_bot("botond")); // "bot" prefix alone is not a marker
    }
}
