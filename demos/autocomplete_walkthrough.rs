//! Autocomplete walkthrough for chartform-rs
//!
//! Replays what a visitor does on the chart page, without a browser:
//! - type a partial city name and wait for the debounced suggestions
//! - move through them with the keyboard and commit one
//! - try a free-typed city that does not exist
//! - prepare the submission that would go to /calculate

use chartform_rs::prelude::*;
use std::sync::Arc;

const DATA: &str = r#"[
  {"name":"United Kingdom","iso2":"GB","states":[
    {"name":"England","cities":[
      {"name":"London","latitude":"51.50853","longitude":"-0.12574"}]},
    {"name":"Northern Ireland","cities":[
      {"name":"Londonderry","latitude":"54.9981","longitude":"-7.30934"}]}]},
  {"name":"France","iso2":"FR","states":[
    {"name":"Île-de-France","cities":[
      {"name":"Paris","latitude":"48.85341","longitude":"2.3488"}]}]}
]"#;

fn main() -> Result<()> {
    println!("=== chartform-rs Autocomplete Walkthrough ===\n");

    let db = Arc::new(DefaultDataset::from_json_str(DATA)?);
    let stats = db.stats();
    println!("✓ Dataset loaded: {} countries, {} cities\n", stats.countries, stats.cities);

    let mut session = PageSession::with_defaults(Arc::clone(&db));

    println!("--- Step 1: typing 'Lon' ---");
    session.on_input("L", 0);
    session.on_input("Lo", 40);
    session.on_input("Lon", 90);
    if let Some(due) = session.next_deadline() {
        session.tick(due);
    }
    for (i, label) in session.presenter().labels().iter().enumerate() {
        println!("  {i}. {label}");
    }
    println!();

    println!("--- Step 2: ArrowDown, ArrowDown, Enter ---");
    session.on_key(Key::ArrowDown);
    session.on_key(Key::ArrowDown);
    if let KeyOutcome::Committed(hit) = session.on_key(Key::Enter) {
        println!("  committed: {} ({}, {})", hit.label(), hit.latitude, hit.longitude);
    }
    println!("  state: {:?}\n", session.state());

    println!("--- Step 3: free-typed 'Par' then leaving the field ---");
    session.on_input("Par", 1_000);
    match session.on_blur() {
        BlurOutcome::Rejected => println!("  rejected: {}", session.modal().message),
        other => println!("  unexpected: {other:?}"),
    }
    session.dismiss_modal();
    println!();

    println!("--- Step 4: typed 'Paris' exactly ---");
    session.on_input("Paris", 2_000);
    println!("  blur: {:?}", session.on_blur());

    let visible: FormData = [("name", "Ada"), ("dob", "10/12/1815"), ("time", "13:00")]
        .into_iter()
        .collect();
    match session.begin_submit(&visible) {
        Ok(request) => {
            println!("  POST {}", request.endpoint);
            for (name, value) in request.form.iter() {
                println!("    {name} = {value}");
            }
        }
        Err(reason) => println!("  blocked: {reason:?}"),
    }

    Ok(())
}
