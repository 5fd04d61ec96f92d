// crates/chartform-core/src/form.rs

//! Form fields and the small text transforms applied to them: the hidden
//! coordinate fields, the date-of-birth rewrite and the input masks.

use crate::error::{ChartFormError, Result};
use crate::model::SearchResult;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const LATITUDE_FIELD: &str = "latitude";
pub const LONGITUDE_FIELD: &str = "longitude";
pub const DOB_FIELD: &str = "dob";
pub const LOCATION_FIELD: &str = "location";

/// Ordered form fields, as `FormData` would serialize them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field even if one with the same name exists.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Set a field, replacing every existing field of that name. The field
    /// keeps the position of its first occurrence.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter().position(|(n, _)| n == name) {
            Some(first) => {
                self.fields[first].1 = value;
                let mut seen = 0usize;
                self.fields.retain(|(n, _)| {
                    if n != name {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of fields called `name`.
    pub fn count(&self, name: &str) -> usize {
        self.fields.iter().filter(|(n, _)| n == name).count()
    }

    pub fn remove(&mut self, name: &str) {
        self.fields.retain(|(n, _)| n != name);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Write the selection's coordinates into the hidden fields, replacing any
/// previous values.
pub fn write_coordinates(form: &mut FormData, hit: &SearchResult) {
    form.set(LATITUDE_FIELD, hit.latitude.to_string());
    form.set(LONGITUDE_FIELD, hit.longitude.to_string());
}

pub fn clear_coordinates(form: &mut FormData) {
    form.remove(LATITUDE_FIELD);
    form.remove(LONGITUDE_FIELD);
}

/// Rewrite a date of birth from display order (`DD/MM/YYYY`) to
/// `YYYY-MM-DD`. A value already in `YYYY-MM-DD` passes through.
///
/// ```rust
/// use chartform_core::form::rewrite_dob;
///
/// assert_eq!(rewrite_dob("07/03/1988").unwrap(), "1988-03-07");
/// assert!(rewrite_dob("31/02/1988").is_err());
/// ```
pub fn rewrite_dob(value: &str) -> Result<String> {
    let value = value.trim();
    let invalid = || ChartFormError::InvalidDate(value.to_string());

    let date = if is_shaped(value, &[2, 5]) {
        NaiveDate::parse_from_str(value, "%d/%m/%Y").map_err(|_| invalid())?
    } else if value.len() == 10 && value.as_bytes()[4] == b'-' && value.as_bytes()[7] == b'-' {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?
    } else {
        return Err(invalid());
    };
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Validate an `HH:MM` birth time (24h clock), returning it zero-padded.
pub fn parse_time(value: &str) -> Result<String> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| ChartFormError::InvalidTime(value.to_string()))
}

// `DD/MM/YYYY`: ten ASCII chars, slashes at the given byte offsets
fn is_shaped(value: &str, slashes: &[usize]) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| {
            if slashes.contains(&i) {
                b == b'/'
            } else {
                b.is_ascii_digit()
            }
        })
}

/// Progressive `DD/MM/YYYY` mask applied while typing: keeps at most eight
/// digits and inserts the separators as soon as the next digit arrives.
///
/// ```rust
/// use chartform_core::form::mask_date;
///
/// assert_eq!(mask_date("0703"), "07/03");
/// assert_eq!(mask_date("07031988"), "07/03/1988");
/// assert_eq!(mask_date("07-03-19889"), "07/03/1988");
/// ```
pub fn mask_date(input: &str) -> String {
    mask_digits(input, 8, &[2, 4], '/')
}

/// Progressive `HH:MM` mask.
pub fn mask_time(input: &str) -> String {
    mask_digits(input, 4, &[2], ':')
}

fn mask_digits(input: &str, max: usize, breaks: &[usize], sep: char) -> String {
    let mut out = String::with_capacity(max + breaks.len());
    for (i, d) in input.chars().filter(char::is_ascii_digit).take(max).enumerate() {
        if breaks.contains(&i) {
            out.push(sep);
        }
        out.push(d);
    }
    out
}
