//! chartform: Command-line interface for chartform-core
//!
//! Drives the same session logic the browser runs, from a terminal:
//!
//! - Show dataset stats
//!   $ chartform stats
//!
//! - Search cities (accent- and case-insensitive, prefix matches first)
//!   $ chartform search zurich
//!
//! - Check a typed location like the form's blur check does
//!   $ chartform validate "London"
//!
//! - Submit a chart request (selection by suggestion index or exact name)
//!   $ chartform submit --location Lon --pick 0 --dob 07/03/1988 --time 07:30
//!
//! - Look up a card from astrology.json
//!   $ chartform card sun leo
//!
//! - Apply the date/time input masks
//!   $ chartform mask date 07031988
//!
//! Logging goes to stderr through `tracing`; `-v` or `RUST_LOG` raise it.
mod args;

use crate::args::{CliArgs, Commands, MaskKind};
use anyhow::{bail, Context};
use chartform_core::cards::CardCatalog;
use chartform_core::form::{self, FormData};
use chartform_core::prelude::*;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let default_filter = if args.verbose {
        "chartform=info,chartform_core=info"
    } else {
        "chartform=warn,chartform_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => FormConfig::load(path)?,
        None => FormConfig::default(),
    };

    // Commands that do not need the dataset
    match &args.command {
        Commands::Mask { kind, input } => {
            let masked = match kind {
                MaskKind::Date => form::mask_date(input),
                MaskKind::Time => form::mask_time(input),
            };
            println!("{masked}");
            return Ok(());
        }
        Commands::Card {
            cards,
            category,
            key,
        } => return show_cards(cards, category.as_deref(), key.as_deref()),
        _ => {}
    }

    let db = load_dataset(&args)?;

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Dataset statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  States/Regions: {}", stats.states);
            println!("  Cities: {}", stats.cities);
        }

        Commands::Search { query, limit } => {
            let hits = db.search_with_min(&query, config.min_query_chars);
            if hits.is_empty() {
                println!("No cities found matching: {query}");
            }
            for hit in hits.iter().take(limit.unwrap_or(usize::MAX)) {
                println!("{}  ({}, {})", hit.label(), hit.latitude, hit.longitude);
            }
        }

        Commands::Validate { text } => {
            let mut session = PageSession::new(db, config);
            session.on_input(&text, 0);
            match session.on_blur() {
                BlurOutcome::Valid(hit) => {
                    println!("valid: {} ({}, {})", hit.label(), hit.latitude, hit.longitude)
                }
                BlurOutcome::Empty => bail!("empty location"),
                BlurOutcome::Rejected => bail!("{}", session.modal().message),
                BlurOutcome::AlreadySelected => unreachable!("typed text is never a selection"),
            }
        }

        Commands::Submit {
            location,
            pick,
            dob,
            time,
            fields,
            base_url,
            endpoint,
        } => {
            let mut config = config;
            if let Some(endpoint) = endpoint {
                config.calculate_endpoint = endpoint;
            }
            let mut session = PageSession::new(db, config);
            confirm_location(&mut session, &location, pick)?;

            let mut visible: FormData = fields.into_iter().collect();
            visible.set(form::DOB_FIELD, dob);
            if let Some(time) = time {
                visible.set("time", form::parse_time(&time)?);
            }

            let transport = chartform_core::submit::HttpTransport::new(base_url)?;
            match session.submit(&visible, &transport) {
                SubmitOutcome::ReplacePage { html } => println!("{html}"),
                SubmitOutcome::Blocked { reason } => {
                    bail!("submission blocked ({reason:?}): {}", session.modal().message)
                }
                SubmitOutcome::ServerError { status, body } => {
                    eprintln!("{body}");
                    bail!("server answered {status}");
                }
                SubmitOutcome::TransportFailed { message } => bail!("request failed: {message}"),
            }
        }

        Commands::Mask { .. } | Commands::Card { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn load_dataset(args: &CliArgs) -> anyhow::Result<Arc<DefaultDataset>> {
    let mut db = if args.no_cache {
        DefaultDataset::load_from_path(&args.input)
    } else {
        DefaultDataset::load_cached(&args.input)
    }
    .with_context(|| format!("loading {}", args.input))?;

    if let Some(filter) = &args.filter {
        let codes: Vec<&str> = filter
            .split(',')
            .map(|x| x.trim())
            .filter(|x| !x.is_empty())
            .collect();
        db.retain_countries(&codes);
    }
    Ok(Arc::new(db))
}

/// Confirm the location either by committing a suggestion (`--pick`) or by
/// the blur check on the typed text.
fn confirm_location(
    session: &mut PageSession<DefaultBackend>,
    location: &str,
    pick: Option<usize>,
) -> anyhow::Result<()> {
    session.on_input(location, 0);
    match pick {
        Some(index) => {
            let due = session.next_deadline().unwrap_or(0);
            session.tick(due);
            let hit = session
                .on_pointer_down(index)
                .with_context(|| format!("no suggestion #{index} for {location:?}"))?;
            tracing::info!(location = %hit.label(), "suggestion committed");
        }
        None => match session.on_blur() {
            BlurOutcome::Valid(_) | BlurOutcome::AlreadySelected => {}
            BlurOutcome::Rejected | BlurOutcome::Empty => {
                bail!("{:?} is not a known city; try `chartform search`", location)
            }
        },
    }
    Ok(())
}

fn show_cards(path: &str, category: Option<&str>, key: Option<&str>) -> anyhow::Result<()> {
    let catalog = CardCatalog::load(path).with_context(|| format!("loading {path}"))?;
    match (category, key) {
        (None, _) => {
            for c in catalog.categories() {
                println!("{c} ({} cards)", catalog.cards_in(c).len());
            }
        }
        (Some(category), None) => {
            for (key, detail) in catalog.cards_in(category) {
                println!("{key}: {}", detail.title);
            }
        }
        (Some(category), Some(key)) => match catalog.get(category, key) {
            Some(detail) => {
                println!("{}", detail.title);
                println!();
                println!("{}", detail.description);
            }
            None => bail!("no card {category}/{key}"),
        },
    }
    Ok(())
}
