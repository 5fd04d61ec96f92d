// crates/chartform-core/src/model.rs

//! # The Nested Dataset Model
//!
//! **Structure:** `GeoDataset` -> `Vec<Country>` -> `Vec<State>` -> `Vec<City>`
//!
//! Order matters: search ranking falls back to dataset order, so every level
//! keeps the order of the source file.

use crate::common::DbStats;
use crate::traits::{DefaultBackend, GeoBackend};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw input (as it comes from countries+states+cities.json)
// ---------------------------------------------------------------------------

/// A coordinate as found in the source JSON: the upstream dataset ships
/// strings (`"51.50853"`), hand-made fixtures usually use numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCoord {
    Number(f64),
    Text(String),
}

impl RawCoord {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            RawCoord::Number(n) => Some(*n).filter(|n| n.is_finite()),
            RawCoord::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

/// Raw city structure from JSON. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CityRaw {
    pub name: String,
    #[serde(default)]
    pub latitude: Option<RawCoord>,
    #[serde(default)]
    pub longitude: Option<RawCoord>,
}

/// Raw state / region structure from JSON.
#[derive(Debug, Deserialize)]
pub struct StateRaw {
    pub name: String,
    #[serde(default)]
    pub cities: Vec<CityRaw>,
}

/// Raw country structure from JSON.
#[derive(Debug, Deserialize)]
pub struct CountryRaw {
    pub name: String,
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub states: Vec<StateRaw>,
}

pub type CountriesRaw = Vec<CountryRaw>;

// ---------------------------------------------------------------------------
// Domain model
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct City<B: GeoBackend> {
    pub name: B::Str,
    pub latitude: B::Float,
    pub longitude: B::Float,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct State<B: GeoBackend> {
    pub name: B::Str,
    pub cities: Vec<City<B>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Country<B: GeoBackend> {
    pub name: B::Str,
    pub iso2: Option<B::Str>,
    pub states: Vec<State<B>>,
}

/// The geographic dataset, loaded once per page session and never mutated
/// afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GeoDataset<B: GeoBackend> {
    pub countries: Vec<Country<B>>,
}

/// Convenient alias for the default backend.
pub type DefaultDataset = GeoDataset<DefaultBackend>;

/// One city joined with its ancestry. Ephemeral: recomputed per query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl SearchResult {
    pub fn from_parts<B: GeoBackend>(city: &City<B>, state: &State<B>, country: &Country<B>) -> Self {
        Self {
            city: B::str_to_string(&city.name),
            state: B::str_to_string(&state.name),
            country: B::str_to_string(&country.name),
            latitude: B::float_to_f64(city.latitude),
            longitude: B::float_to_f64(city.longitude),
        }
    }

    /// Text written into the visible location field on selection.
    pub fn label(&self) -> String {
        format!("{}, {}, {}", self.city, self.state, self.country)
    }
}

/// Convert raw JSON data into a [`GeoDataset`] using the given backend.
///
/// Cities whose latitude or longitude is missing or unparseable cannot be
/// submitted, so they are dropped here (and counted in a warning).
pub fn build_dataset<B: GeoBackend>(raw: CountriesRaw) -> GeoDataset<B> {
    let mut skipped = 0usize;

    let countries = raw
        .into_iter()
        .map(|c| {
            let states = c
                .states
                .into_iter()
                .map(|s| {
                    let cities = s
                        .cities
                        .into_iter()
                        .filter_map(|city| {
                            let lat = city.latitude.as_ref().and_then(RawCoord::to_f64);
                            let lng = city.longitude.as_ref().and_then(RawCoord::to_f64);
                            match (lat, lng) {
                                (Some(lat), Some(lng)) => Some(City::<B> {
                                    name: B::str_from(&city.name),
                                    latitude: B::float_from(lat),
                                    longitude: B::float_from(lng),
                                }),
                                _ => {
                                    skipped += 1;
                                    None
                                }
                            }
                        })
                        .collect();

                    State::<B> {
                        name: B::str_from(&s.name),
                        cities,
                    }
                })
                .collect();

            Country::<B> {
                name: B::str_from(&c.name),
                iso2: c.iso2.as_deref().map(B::str_from),
                states,
            }
        })
        .collect();

    if skipped > 0 {
        tracing::warn!(skipped, "skipped cities without usable coordinates");
    }

    GeoDataset { countries }
}

impl<B: GeoBackend> GeoDataset<B> {
    pub fn countries(&self) -> &[Country<B>] {
        &self.countries
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Find a country by ISO2 code, case-insensitive (e.g. "GB", "fr").
    pub fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country<B>> {
        self.countries.iter().find(|c| {
            c.iso2
                .as_ref()
                .is_some_and(|s| s.as_ref().eq_ignore_ascii_case(iso2))
        })
    }

    /// Every city with its parent state and country, in dataset order.
    pub fn cities(&self) -> impl Iterator<Item = (&City<B>, &State<B>, &Country<B>)> + '_ {
        self.countries.iter().flat_map(|c| {
            c.states
                .iter()
                .flat_map(move |s| s.cities.iter().map(move |city| (city, s, c)))
        })
    }

    pub fn stats(&self) -> DbStats {
        let states = self.countries.iter().map(|c| c.states.len()).sum();
        DbStats {
            countries: self.countries.len(),
            states,
            cities: self.cities().count(),
        }
    }

    /// Keep only the countries whose ISO2 code is in `iso2` (case-insensitive).
    /// An empty filter keeps everything.
    pub fn retain_countries(&mut self, iso2: &[&str]) {
        if iso2.is_empty() {
            return;
        }
        self.countries.retain(|c| {
            c.iso2
                .as_ref()
                .is_some_and(|code| iso2.iter().any(|f| code.as_ref().eq_ignore_ascii_case(f)))
        });
    }
}

impl<B: GeoBackend> Country<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn iso2(&self) -> &str {
        self.iso2.as_ref().map(|s| s.as_ref()).unwrap_or("")
    }

    pub fn states(&self) -> &[State<B>] {
        &self.states
    }
}

impl<B: GeoBackend> State<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn cities(&self) -> &[City<B>] {
        &self.cities
    }
}

impl<B: GeoBackend> City<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn coordinates(&self) -> (f64, f64) {
        (B::float_to_f64(self.latitude), B::float_to_f64(self.longitude))
    }
}
