// crates/chartform-core/src/cards.rs

//! Card details behind `/static/data/astrology.json`:
//! `{ "<category>": { "<card key>": { "title": .., "description": .. } } }`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetail {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardCatalog {
    categories: BTreeMap<String, BTreeMap<String, CardDetail>>,
}

#[cfg(feature = "json")]
impl CardCatalog {
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let reader = crate::loader::open_stream(path.as_ref())?;
        Ok(serde_json::from_reader(reader)?)
    }
}

impl CardCatalog {
    pub fn get(&self, category: &str, key: &str) -> Option<&CardDetail> {
        self.categories.get(category)?.get(key)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Cards of one category as `(key, detail)`, sorted by key.
    pub fn cards_in(&self, category: &str) -> Vec<(&str, &CardDetail)> {
        self.categories
            .get(category)
            .map(|cards| cards.iter().map(|(k, v)| (k.as_str(), v)).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    const CARDS: &str = r#"{
      "sun": {
        "aries": {"title": "Sun in Aries", "description": "Bold starts."},
        "leo": {"title": "Sun in Leo", "description": "Warm centre stage."}
      },
      "moon": {
        "cancer": {"title": "Moon in Cancer", "description": "At home."}
      }
    }"#;

    #[test]
    fn lookup_by_category_and_key() {
        let catalog = CardCatalog::from_json_str(CARDS).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("sun", "leo").unwrap().title, "Sun in Leo");
        assert!(catalog.get("sun", "cancer").is_none());
        assert!(catalog.get("mars", "aries").is_none());
    }

    #[test]
    fn listing_is_sorted() {
        let catalog = CardCatalog::from_json_str(CARDS).unwrap();
        assert_eq!(catalog.categories().collect::<Vec<_>>(), vec!["moon", "sun"]);
        let keys: Vec<_> = catalog.cards_in("sun").into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["aries", "leo"]);
        assert!(catalog.cards_in("venus").is_empty());
    }
}
