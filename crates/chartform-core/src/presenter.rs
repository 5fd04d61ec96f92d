// crates/chartform-core/src/presenter.rs

use crate::model::SearchResult;
use serde::{Deserialize, Serialize};

/// Visibility of the suggestion box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenterState {
    Idle,
    Showing,
}

/// Keys the suggestion box reacts to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// What a key press did to the box.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Nothing changed.
    Ignored,
    /// The highlighted row moved to this index.
    Highlighted(usize),
    /// A suggestion was committed; the box is now hidden.
    Committed(SearchResult),
    /// The box was dismissed without a selection.
    Dismissed,
}

/// The suggestion list and its keyboard cursor.
///
/// `Idle` → `Showing` when non-empty results are shown; back to `Idle` on
/// [`hide`](Self::hide), a commit, or Escape. The cursor is clamped to
/// `[0, len - 1]`, never wrapped.
#[derive(Debug, Clone)]
pub struct SuggestionPresenter {
    state: PresenterState,
    results: Vec<SearchResult>,
    highlighted: Option<usize>,
}

impl Default for SuggestionPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionPresenter {
    pub fn new() -> Self {
        Self {
            state: PresenterState::Idle,
            results: Vec::new(),
            highlighted: None,
        }
    }

    pub fn state(&self) -> PresenterState {
        self.state
    }

    pub fn is_showing(&self) -> bool {
        self.state == PresenterState::Showing
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Rendered rows, in display order.
    pub fn labels(&self) -> Vec<String> {
        self.results.iter().map(SearchResult::label).collect()
    }

    /// Render a fresh result list. An empty list hides the box.
    pub fn show(&mut self, results: Vec<SearchResult>) {
        self.highlighted = None;
        if results.is_empty() {
            self.hide();
            return;
        }
        self.results = results;
        self.state = PresenterState::Showing;
    }

    pub fn hide(&mut self) {
        self.state = PresenterState::Idle;
        self.results.clear();
        self.highlighted = None;
    }

    pub fn key(&mut self, key: Key) -> KeyOutcome {
        if !self.is_showing() {
            return KeyOutcome::Ignored;
        }
        let last = self.results.len() - 1;

        match key {
            Key::ArrowDown => {
                let next = self.highlighted.map_or(0, |i| (i + 1).min(last));
                self.highlighted = Some(next);
                KeyOutcome::Highlighted(next)
            }
            Key::ArrowUp => match self.highlighted {
                Some(i) => {
                    let prev = i.saturating_sub(1);
                    self.highlighted = Some(prev);
                    KeyOutcome::Highlighted(prev)
                }
                None => KeyOutcome::Ignored,
            },
            Key::Enter => match self.highlighted {
                Some(i) => self.commit(i),
                None => KeyOutcome::Ignored,
            },
            Key::Escape => {
                self.hide();
                KeyOutcome::Dismissed
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }

    /// Pointer press on a row. Commits immediately; an out-of-range index is
    /// ignored.
    pub fn pointer_down(&mut self, index: usize) -> Option<SearchResult> {
        if !self.is_showing() || index >= self.results.len() {
            return None;
        }
        match self.commit(index) {
            KeyOutcome::Committed(hit) => Some(hit),
            _ => None,
        }
    }

    fn commit(&mut self, index: usize) -> KeyOutcome {
        let hit = self.results.swap_remove(index);
        self.hide();
        KeyOutcome::Committed(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(city: &str) -> SearchResult {
        SearchResult {
            city: city.into(),
            state: "S".into(),
            country: "C".into(),
            latitude: 1.0,
            longitude: 2.0,
        }
    }

    fn showing(n: usize) -> SuggestionPresenter {
        let mut p = SuggestionPresenter::new();
        p.show((0..n).map(|i| hit(&format!("City{i}"))).collect());
        p
    }

    #[test]
    fn empty_results_keep_box_hidden() {
        let mut p = SuggestionPresenter::new();
        p.show(vec![]);
        assert_eq!(p.state(), PresenterState::Idle);
    }

    #[test]
    fn cursor_clamps_at_both_edges() {
        let mut p = showing(2);
        assert_eq!(p.key(Key::ArrowUp), KeyOutcome::Ignored);
        assert_eq!(p.key(Key::ArrowDown), KeyOutcome::Highlighted(0));
        assert_eq!(p.key(Key::ArrowDown), KeyOutcome::Highlighted(1));
        assert_eq!(p.key(Key::ArrowDown), KeyOutcome::Highlighted(1));
        assert_eq!(p.key(Key::ArrowUp), KeyOutcome::Highlighted(0));
        assert_eq!(p.key(Key::ArrowUp), KeyOutcome::Highlighted(0));
    }

    #[test]
    fn enter_without_highlight_is_noop() {
        let mut p = showing(3);
        assert_eq!(p.key(Key::Enter), KeyOutcome::Ignored);
        assert!(p.is_showing());
    }

    #[test]
    fn enter_commits_highlighted_and_hides() {
        let mut p = showing(3);
        p.key(Key::ArrowDown);
        p.key(Key::ArrowDown);
        assert_eq!(p.key(Key::Enter), KeyOutcome::Committed(hit("City1")));
        assert_eq!(p.state(), PresenterState::Idle);
        assert!(p.results().is_empty());
    }

    #[test]
    fn pointer_down_commits_and_ignores_out_of_range() {
        let mut p = showing(2);
        assert_eq!(p.pointer_down(5), None);
        assert!(p.is_showing());
        assert_eq!(p.pointer_down(1), Some(hit("City1")));
        assert!(!p.is_showing());
        assert_eq!(p.pointer_down(0), None);
    }

    #[test]
    fn escape_dismisses() {
        let mut p = showing(1);
        assert_eq!(p.key(Key::Escape), KeyOutcome::Dismissed);
        assert_eq!(p.key(Key::ArrowDown), KeyOutcome::Ignored);
    }

    #[test]
    fn dom_key_names_map() {
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("a"), Key::Other);
    }
}
