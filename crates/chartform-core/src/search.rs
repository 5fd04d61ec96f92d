// crates/chartform-core/src/search.rs

use crate::model::{GeoDataset, SearchResult};
use crate::text::{city_part, fold_key, query_len};
use crate::traits::GeoBackend;

/// Queries shorter than this (in characters, after trimming) never search.
pub const MIN_QUERY_CHARS: usize = 2;

/// How a city name relates to the folded query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchRank {
    /// Name starts with the query (rank 0).
    Prefix,
    /// Name merely contains the query (rank 1).
    Contains,
}

impl MatchRank {
    /// Rank of `name` against an already folded, non-empty query.
    pub fn of(name: &str, folded_query: &str) -> Option<Self> {
        let folded = fold_key(name);
        if folded.starts_with(folded_query) {
            Some(MatchRank::Prefix)
        } else if folded.contains(folded_query) {
            Some(MatchRank::Contains)
        } else {
            None
        }
    }
}

/// The search operations available on the dataset.
pub trait LocationSearch {
    /// Accent- and case-insensitive city search.
    ///
    /// Every city whose folded name contains the folded query is returned,
    /// prefix matches first, each partition in dataset order. Queries shorter
    /// than [`MIN_QUERY_CHARS`] return nothing.
    fn search(&self, query: &str) -> Vec<SearchResult> {
        self.search_with_min(query, MIN_QUERY_CHARS)
    }

    /// [`search`](Self::search) with a configurable minimum query length.
    fn search_with_min(&self, query: &str, min_chars: usize) -> Vec<SearchResult>;

    /// First result of [`search`](Self::search) whose city name equals the
    /// part of `text` before the first comma.
    fn find_exact(&self, text: &str) -> Option<SearchResult> {
        find_exact_in(&self.search(text), text)
    }
}

/// [`LocationSearch::find_exact`] over results that were already computed,
/// so a caller holding the last query's results need not search again.
pub fn find_exact_in(results: &[SearchResult], text: &str) -> Option<SearchResult> {
    let wanted = city_part(text);
    if wanted.is_empty() {
        return None;
    }
    results.iter().find(|r| r.city == wanted).cloned()
}

impl<B: GeoBackend> LocationSearch for GeoDataset<B> {
    fn search_with_min(&self, query: &str, min_chars: usize) -> Vec<SearchResult> {
        let q = fold_key(query.trim());
        if query_len(query) < min_chars || q.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(MatchRank, SearchResult)> = self
            .cities()
            .filter_map(|(city, state, country)| {
                MatchRank::of(city.name(), &q)
                    .map(|rank| (rank, SearchResult::from_parts(city, state, country)))
            })
            .collect();

        // stable: dataset order survives inside each rank
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, hit)| hit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_orders_prefix_before_contains() {
        assert!(MatchRank::Prefix < MatchRank::Contains);
        assert_eq!(MatchRank::of("Londonderry", "lon"), Some(MatchRank::Prefix));
        assert_eq!(MatchRank::of("East London", "lon"), Some(MatchRank::Contains));
        assert_eq!(MatchRank::of("Paris", "lon"), None);
    }

    #[test]
    fn find_exact_compares_city_part_verbatim() {
        let hit = SearchResult {
            city: "Paris".into(),
            state: "Île-de-France".into(),
            country: "France".into(),
            latitude: 48.85,
            longitude: 2.35,
        };
        let results = vec![hit.clone()];
        assert_eq!(find_exact_in(&results, "Paris"), Some(hit.clone()));
        assert_eq!(find_exact_in(&results, "Paris, Texas"), Some(hit));
        assert_eq!(find_exact_in(&results, "paris"), None);
        assert_eq!(find_exact_in(&results, "Par"), None);
        assert_eq!(find_exact_in(&results, ""), None);
    }
}
