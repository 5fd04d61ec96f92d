// crates/chartform-core/src/lib.rs

//! # chartform-core
//!
//! DOM-free core of the birth-chart form: the geographic dataset, the
//! accent-insensitive city search, the suggestion presenter, the location
//! validator and the submission flow to `/calculate`.
//!
//! Every handler operates on an explicit [`PageSession`], so the whole
//! interaction can be driven (and tested) without a browser.
//!
//! ```rust
//! use chartform_core::prelude::*;
//!
//! let json = r#"[{"name":"United Kingdom","states":[{"name":"England","cities":[
//!     {"name":"London","latitude":"51.50853","longitude":"-0.12574"}]}]}]"#;
//! let dataset = DefaultDataset::from_json_str(json).unwrap();
//!
//! let hits = dataset.search("lon");
//! assert_eq!(hits[0].city, "London");
//! assert_eq!(hits[0].label(), "London, England, United Kingdom");
//! ```

pub mod cards;
pub mod common;
pub mod config;
pub mod debounce;
pub mod error;
pub mod form;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod presenter;
pub mod search;
pub mod session;
pub mod submit;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::DbStats;
pub use crate::error::{ChartFormError, Result};
pub use crate::model::{City, Country, DefaultDataset, GeoDataset, SearchResult, State};
pub use crate::search::LocationSearch;
pub use crate::session::{PageSession, UiState};
pub use crate::traits::{DefaultBackend, GeoBackend};
