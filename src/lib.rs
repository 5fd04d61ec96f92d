//! chartform-rs: workspace facade re-exporting [`chartform_core`] so the
//! demos can `use chartform_rs::prelude::*`.
pub use chartform_core::*;
