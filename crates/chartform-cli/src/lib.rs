//! chartform-cli
//! =============
//!
//! Command-line interface for the `chartform-core` location form logic.
//!
//! This crate primarily provides a binary (`chartform`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! chartform --input countries+states+cities.json stats
//! chartform search lon
//! chartform validate "Par"
//! chartform submit --location Lon --pick 0 --dob 07/03/1988 --time 07:30
//! chartform card sun leo
//! chartform mask date 07031988
//! ```
//!
//! For programmatic access use the [`chartform-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
