use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the dataset.
///
/// Returned by [`GeoDataset::stats`](crate::GeoDataset::stats), these counts
/// reflect the materialized in-memory dataset, i.e. after cities without
/// usable coordinates were skipped at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub states: usize,
    pub cities: usize,
}
