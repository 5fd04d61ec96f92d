use chartform_core::prelude::*;
use chartform_core::text::fold_key;

fn sample() -> DefaultDataset {
    DefaultDataset::from_json_str(include_str!("data/sample.json")).unwrap()
}

fn cities(hits: &[SearchResult]) -> Vec<&str> {
    hits.iter().map(|h| h.city.as_str()).collect()
}

#[test]
fn short_queries_never_search() {
    let db = sample();
    for q in ["", " ", "L", " L ", "é"] {
        assert!(db.search(q).is_empty(), "query {q:?} should not search");
    }
}

#[test]
fn prefix_matches_keep_dataset_order() {
    let db = sample();
    let hits = db.search("Lon");
    assert_eq!(cities(&hits), vec!["London", "Londonderry", "East London"]);
}

#[test]
fn prefix_rank_strictly_precedes_contains_rank() {
    let db = sample();
    let q = fold_key("lon");
    let hits = db.search("lon");
    let first_contains = hits
        .iter()
        .position(|h| !fold_key(&h.city).starts_with(&q))
        .unwrap();
    assert!(hits[first_contains..]
        .iter()
        .all(|h| !fold_key(&h.city).starts_with(&q)));
}

#[test]
fn every_result_contains_the_folded_query() {
    let db = sample();
    for q in ["on", "ri", "ZUR", "etienne", "saint-e", "xyz"] {
        let folded = fold_key(q);
        for hit in db.search(q) {
            assert!(
                fold_key(&hit.city).contains(&folded),
                "{} does not contain {q}",
                hit.city
            );
        }
    }
}

#[test]
fn matching_ignores_accents_and_case() {
    let db = sample();
    assert_eq!(cities(&db.search("zurich")), vec!["Zürich"]);
    assert_eq!(cities(&db.search("SAINT-ETIENNE")), vec!["Saint-Étienne"]);
    assert_eq!(cities(&db.search("étienne")), vec!["Saint-Étienne"]);
}

#[test]
fn results_are_denormalized() {
    let db = sample();
    let hit = &db.search("Paris")[0];
    assert_eq!(hit.state, "Île-de-France");
    assert_eq!(hit.country, "France");
    assert_eq!((hit.latitude, hit.longitude), (48.85341, 2.3488));
}

#[test]
fn find_exact_uses_text_before_comma() {
    let db = sample();
    assert_eq!(db.find_exact("London").unwrap().state, "England");
    assert!(db.find_exact("Lond").is_none());
    assert!(db.find_exact("london").is_none());
}

#[test]
fn stats_count_usable_cities() {
    let stats = sample().stats();
    assert_eq!(stats.countries, 3);
    assert_eq!(stats.states, 5);
    assert_eq!(stats.cities, 6, "the city without latitude is skipped");
}
