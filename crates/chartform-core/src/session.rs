// crates/chartform-core/src/session.rs

//! # Page Session
//!
//! All mutable page state of the location form lives in one
//! [`PageSession`]: the validation flag, the suggestion box, the debounced
//! query, the hidden coordinate fields and the modal. The dataset itself is
//! shared read-only behind an `Arc`.
//!
//! Every DOM event maps to one handler:
//!
//! | DOM event                         | handler                          |
//! |-----------------------------------|----------------------------------|
//! | `input` on `#location`            | [`PageSession::on_input`]        |
//! | debounce timer                    | [`PageSession::tick`]            |
//! | `keydown` on `#location`          | [`PageSession::on_key`]          |
//! | `mousedown` on a suggestion       | [`PageSession::on_pointer_down`] |
//! | `click` outside `#suggestions`    | [`PageSession::on_outside_click`]|
//! | `blur` on `#location`             | [`PageSession::on_blur`]         |
//! | `submit` on `#locationForm`       | [`PageSession::begin_submit`] / [`PageSession::finish_submit`] |
//! | close button of `#customModal`    | [`PageSession::dismiss_modal`]   |
//!
//! The suggestion commit happens on pointer *press*: the browser fires `blur`
//! after `mousedown` but before `click`, and the blur check must already see
//! the committed selection.

use crate::config::FormConfig;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::form::{self, FormData, DOB_FIELD, LOCATION_FIELD};
use crate::model::{GeoDataset, SearchResult};
use crate::presenter::{Key, KeyOutcome, SuggestionPresenter};
use crate::search::{find_exact_in, LocationSearch};
use crate::submit::{BlockReason, SubmitOutcome, SubmitRequest, Transport, TransportResponse};
use crate::text::query_len;
use crate::traits::GeoBackend;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where the form currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    /// Nothing confirmed, suggestion box hidden.
    Idle,
    /// Suggestion box visible.
    Showing,
    /// Location confirmed, box hidden. Submit is allowed.
    Validated,
    /// A request to the calculate endpoint is in flight.
    Submitting,
}

/// The blocking dialog used for validation failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modal {
    pub visible: bool,
    pub message: String,
}

/// What typing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Query below the threshold: no search, box hidden.
    Hidden,
    /// A search is scheduled for `due_at` (caller's clock).
    Scheduled { due_at: u64 },
}

/// What leaving the location field did.
#[derive(Debug, Clone, PartialEq)]
pub enum BlurOutcome {
    /// The text came from a selection in this cycle; nothing to check.
    AlreadySelected,
    /// The typed text names a known city; the field is left untouched.
    Valid(SearchResult),
    /// The typed text names no city: field cleared, modal opened.
    Rejected,
    /// The field is empty; invalid, but nothing to tell the user yet.
    Empty,
}

pub struct PageSession<B: GeoBackend> {
    dataset: Arc<GeoDataset<B>>,
    config: FormConfig,
    location_text: String,
    validated: bool,
    submitting: bool,
    presenter: SuggestionPresenter,
    debouncer: Debouncer,
    hidden: FormData,
    modal: Modal,
    last_search: Option<(String, Vec<SearchResult>)>,
}

impl<B: GeoBackend> PageSession<B> {
    pub fn new(dataset: Arc<GeoDataset<B>>, config: FormConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce_ms);
        Self {
            dataset,
            config,
            location_text: String::new(),
            validated: false,
            submitting: false,
            presenter: SuggestionPresenter::new(),
            debouncer,
            hidden: FormData::new(),
            modal: Modal::default(),
            last_search: None,
        }
    }

    pub fn with_defaults(dataset: Arc<GeoDataset<B>>) -> Self {
        Self::new(dataset, FormConfig::default())
    }

    // -----------------------------------------------------------------------
    // State views
    // -----------------------------------------------------------------------

    pub fn state(&self) -> UiState {
        if self.submitting {
            UiState::Submitting
        } else if self.presenter.is_showing() {
            UiState::Showing
        } else if self.validated {
            UiState::Validated
        } else {
            UiState::Idle
        }
    }

    pub fn dataset(&self) -> &Arc<GeoDataset<B>> {
        &self.dataset
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// The ValidationFlag: true only when the field text was confirmed.
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn location_text(&self) -> &str {
        &self.location_text
    }

    pub fn presenter(&self) -> &SuggestionPresenter {
        &self.presenter
    }

    /// Hidden `latitude` / `longitude` fields of the form.
    pub fn hidden_fields(&self) -> &FormData {
        &self.hidden
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Deadline of the pending debounced search, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.debouncer.due_at()
    }

    pub fn submit_enabled(&self) -> bool {
        !self.submitting
    }

    pub fn submit_label(&self) -> &str {
        if self.submitting {
            &self.config.submitting_label
        } else {
            &self.config.submit_label
        }
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    /// The user typed into the location field. Free typing always drops a
    /// previous confirmation.
    pub fn on_input(&mut self, text: &str, now_ms: u64) -> InputOutcome {
        self.location_text = text.to_string();
        self.validated = false;
        form::clear_coordinates(&mut self.hidden);

        if query_len(text) < self.config.min_query_chars {
            self.debouncer.cancel();
            self.presenter.hide();
            return InputOutcome::Hidden;
        }

        self.debouncer.push(text, now_ms);
        InputOutcome::Scheduled {
            due_at: self.debouncer.due_at().unwrap_or(now_ms),
        }
    }

    /// Runs the debounced search once its quiet period is over. Returns
    /// `true` when the suggestion box was re-rendered.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(query) = self.debouncer.poll(now_ms) else {
            return false;
        };
        let results = self.run_search(&query);
        tracing::debug!(query = %query, hits = results.len(), "suggestions refreshed");
        self.presenter.show(results);
        true
    }

    pub fn on_key(&mut self, key: Key) -> KeyOutcome {
        let outcome = self.presenter.key(key);
        if let KeyOutcome::Committed(hit) = &outcome {
            self.commit(hit);
        }
        outcome
    }

    pub fn on_pointer_down(&mut self, index: usize) -> Option<SearchResult> {
        let hit = self.presenter.pointer_down(index)?;
        self.commit(&hit);
        Some(hit)
    }

    pub fn on_outside_click(&mut self) {
        self.presenter.hide();
    }

    pub fn on_blur(&mut self) -> BlurOutcome {
        if self.validated {
            return BlurOutcome::AlreadySelected;
        }
        if self.location_text.trim().is_empty() {
            return BlurOutcome::Empty;
        }

        let text = self.location_text.clone();
        let results = self.run_search(&text);
        match find_exact_in(&results, &text) {
            Some(hit) => {
                self.validated = true;
                self.debouncer.cancel();
                self.presenter.hide();
                form::write_coordinates(&mut self.hidden, &hit);
                BlurOutcome::Valid(hit)
            }
            None => {
                tracing::info!(text = %text, "location rejected on blur");
                self.location_text.clear();
                form::clear_coordinates(&mut self.hidden);
                self.debouncer.cancel();
                self.presenter.hide();
                self.open_modal(self.config.invalid_location_message.clone());
                BlurOutcome::Rejected
            }
        }
    }

    pub fn dismiss_modal(&mut self) {
        self.modal.visible = false;
    }

    /// First half of a submission: gate on the ValidationFlag, merge the
    /// hidden fields, rewrite the date of birth and enter `Submitting`.
    ///
    /// `visible` holds the form's visible fields; its `location`, `latitude`
    /// and `longitude` entries are overwritten by the session's own.
    pub fn begin_submit(
        &mut self,
        visible: &FormData,
    ) -> std::result::Result<SubmitRequest, BlockReason> {
        if self.submitting {
            tracing::warn!("submit ignored: a submission is already in flight");
            return Err(BlockReason::AlreadySubmitting);
        }
        if !self.validated {
            tracing::info!("submit blocked: location not validated");
            self.open_modal(self.config.invalid_location_message.clone());
            return Err(BlockReason::LocationNotValidated);
        }

        let mut fields = visible.clone();
        fields.set(LOCATION_FIELD, self.location_text.clone());
        for (name, value) in self.hidden.iter() {
            fields.set(name, value);
        }

        if let Some(dob) = fields.get(DOB_FIELD).map(str::to_owned) {
            match form::rewrite_dob(&dob) {
                Ok(iso) => fields.set(DOB_FIELD, iso),
                Err(e) => {
                    tracing::info!(error = %e, "submit blocked: bad date of birth");
                    self.open_modal(self.config.invalid_date_message.clone());
                    return Err(BlockReason::InvalidDate);
                }
            }
        }

        self.submitting = true;
        Ok(SubmitRequest {
            endpoint: self.config.calculate_endpoint.clone(),
            form: fields,
        })
    }

    /// Second half of a submission. Failures are logged only; the form goes
    /// back to `Validated` so the user can retry.
    pub fn finish_submit(&mut self, result: Result<TransportResponse>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(response) if response.is_success() => SubmitOutcome::ReplacePage {
                html: response.body,
            },
            Ok(response) => {
                tracing::error!(
                    status = response.status,
                    body = %response.body,
                    "calculate endpoint returned an error"
                );
                SubmitOutcome::ServerError {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "submission failed");
                SubmitOutcome::TransportFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Both halves with a synchronous transport.
    pub fn submit<T: Transport + ?Sized>(
        &mut self,
        visible: &FormData,
        transport: &T,
    ) -> SubmitOutcome {
        match self.begin_submit(visible) {
            Ok(request) => {
                let result = transport.post_form(&request);
                self.finish_submit(result)
            }
            Err(reason) => SubmitOutcome::Blocked { reason },
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn commit(&mut self, hit: &SearchResult) {
        self.location_text = hit.label();
        self.validated = true;
        self.debouncer.cancel();
        form::write_coordinates(&mut self.hidden, hit);
    }

    fn open_modal(&mut self, message: String) {
        self.modal = Modal {
            visible: true,
            message,
        };
    }

    // the blur check reuses the input-driven results for the same text
    fn run_search(&mut self, query: &str) -> Vec<SearchResult> {
        if let Some((last, results)) = &self.last_search {
            if last == query {
                return results.clone();
            }
        }
        let results = self
            .dataset
            .search_with_min(query, self.config.min_query_chars);
        self.last_search = Some((query.to_string(), results.clone()));
        results
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::model::DefaultDataset;

    fn dataset() -> Arc<DefaultDataset> {
        let json = r#"[
          {"name":"France","iso2":"FR","states":[
            {"name":"Île-de-France","cities":[
              {"name":"Paris","latitude":"48.85341","longitude":"2.3488"}]}]},
          {"name":"United Kingdom","iso2":"GB","states":[
            {"name":"England","cities":[
              {"name":"London","latitude":"51.50853","longitude":"-0.12574"}]}]}
        ]"#;
        Arc::new(DefaultDataset::from_json_str(json).unwrap())
    }

    #[test]
    fn state_follows_the_flow() {
        let mut s = PageSession::with_defaults(dataset());
        assert_eq!(s.state(), UiState::Idle);

        s.on_input("Lon", 0);
        assert_eq!(s.state(), UiState::Idle, "debounced, not shown yet");
        assert!(s.tick(200));
        assert_eq!(s.state(), UiState::Showing);

        s.on_key(Key::ArrowDown);
        s.on_key(Key::Enter);
        assert_eq!(s.state(), UiState::Validated);
        assert_eq!(s.location_text(), "London, England, United Kingdom");
    }

    #[test]
    fn typing_after_selection_drops_validation() {
        let mut s = PageSession::with_defaults(dataset());
        s.on_input("Par", 0);
        s.tick(500);
        s.on_pointer_down(0);
        assert!(s.is_validated());

        s.on_input("Paris, Île", 600);
        assert!(!s.is_validated());
        assert!(s.hidden_fields().is_empty());
    }

    #[test]
    fn blur_reuses_the_search_from_the_last_tick() {
        let mut s = PageSession::with_defaults(dataset());
        s.on_input("Lond", 0);
        s.tick(200);
        assert!(s.last_search.as_ref().is_some_and(|(q, _)| q == "Lond"));

        // a result the dataset cannot produce: only the memo can hand it out
        let memo_only = SearchResult {
            city: "Lond".into(),
            state: "Nowhere".into(),
            country: "Atlantis".into(),
            latitude: 1.0,
            longitude: 2.0,
        };
        s.last_search = Some(("Lond".into(), vec![memo_only.clone()]));
        s.on_outside_click();
        assert_eq!(s.on_blur(), BlurOutcome::Valid(memo_only));
        assert_eq!(s.hidden_fields().get("latitude"), Some("1"));
    }

    #[test]
    fn new_text_bypasses_the_memo() {
        let mut s = PageSession::with_defaults(dataset());
        s.last_search = Some(("Paris".into(), Vec::new()));
        s.on_input("London", 0);
        s.tick(200);
        assert_eq!(s.presenter().results().len(), 1);
        assert!(s.last_search.as_ref().is_some_and(|(q, _)| q == "London"));
    }

    #[test]
    fn empty_blur_opens_no_modal() {
        let mut s = PageSession::with_defaults(dataset());
        assert_eq!(s.on_blur(), BlurOutcome::Empty);
        assert!(!s.modal().visible);
        assert!(!s.is_validated());
    }
}
