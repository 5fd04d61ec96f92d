//! chartform prelude: bring common types and traits into scope.

pub use crate::cards::{CardCatalog, CardDetail};
pub use crate::common::DbStats;
pub use crate::config::FormConfig;
pub use crate::error::{ChartFormError, Result};
pub use crate::form::{mask_date, mask_time, rewrite_dob, FormData};
pub use crate::model::{City, Country, DefaultDataset, GeoDataset, SearchResult, State};
pub use crate::presenter::{Key, KeyOutcome, PresenterState};
pub use crate::search::LocationSearch;
pub use crate::session::{BlurOutcome, InputOutcome, Modal, PageSession, UiState};
pub use crate::submit::{BlockReason, SubmitOutcome, SubmitRequest, Transport, TransportResponse};
pub use crate::traits::{DefaultBackend, GeoBackend};
