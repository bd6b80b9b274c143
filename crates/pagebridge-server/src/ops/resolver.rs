//! Title search and deterministic candidate selection.

use pagebridge_notion::{NotionApi, NotionError};
use pagebridge_types::PageCandidate;

/// Outcome of matching a query title against the candidate list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// A candidate's title equals the query byte-for-byte. Wins regardless
    /// of position and regardless of how many other candidates exist.
    Exact(PageCandidate),
    /// No exact match, but exactly one candidate survived. Selected as a
    /// shortcut and reported to the caller via the `warning` field.
    Fallback(PageCandidate),
    /// No exact match and zero or several candidates — the caller gets the
    /// full list back to disambiguate.
    NoMatch,
}

/// Search for pages matching `title` and reduce them to candidates,
/// dropping results whose derived title is empty. Order is the service's
/// relevance order, untouched.
pub async fn find_pages_by_title(
    api: &dyn NotionApi,
    title: &str,
) -> Result<Vec<PageCandidate>, NotionError> {
    let found = api.search_pages(title).await?;
    Ok(found
        .results
        .iter()
        .map(|page| page.candidate())
        .filter(|candidate| !candidate.title.is_empty())
        .collect())
}

/// Apply the selection rule: first exact title match wins; failing that, a
/// sole candidate is picked non-exactly; anything else is no match.
pub fn pick_candidate(title: &str, candidates: &[PageCandidate]) -> Selection {
    if let Some(exact) = candidates.iter().find(|c| c.title == title) {
        return Selection::Exact(exact.clone());
    }
    if let [only] = candidates {
        return Selection::Fallback(only.clone());
    }
    Selection::NoMatch
}

// ============================================================================
// Tests
// ============================================================================
