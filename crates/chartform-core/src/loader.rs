// crates/chartform-core/src/loader.rs

//! # Data Loader
//!
//! Handles the physical layer (I/O, decompression, binary cache) and
//! delegates payload parsing to serde_json + [`build_dataset`].
//!
//! In the browser the dataset is fetched by page JS and handed over as a
//! string, so only [`GeoDataset::from_json_str`] is used there. The path
//! based loaders serve the CLI and tests.

use crate::error::{ChartFormError, Result};
use crate::model::GeoDataset;
#[cfg(feature = "json")]
use crate::model::{build_dataset, CountriesRaw};
use crate::traits::GeoBackend;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Default dataset location, relative to the site root.
pub const DEFAULT_DATASET_PATH: &str = "/static/data/countries+states+cities.json";

/// Suffix appended to a dataset file name to form its binary cache path.
#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "comp.bin";

/// Upper bound for a binary cache; guards against corrupt or hostile files.
#[cfg(feature = "cache")]
const CACHE_LIMIT: u64 = 256 * 1024 * 1024;

#[cfg(feature = "json")]
impl<B: GeoBackend> GeoDataset<B> {
    /// Parse the nested countries → states → cities JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: CountriesRaw = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: CountriesRaw = serde_json::from_reader(reader)?;
        Ok(Self::from_raw(raw))
    }

    /// Load a dataset file. `.gz` files are decompressed transparently when
    /// the `compact` feature is enabled.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_stream(path)?;
        let db = Self::from_reader(reader)?;
        tracing::info!(path = %path.display(), "dataset loaded");
        Ok(db)
    }

    fn from_raw(raw: CountriesRaw) -> Self {
        let db = build_dataset::<B>(raw);
        let stats = db.stats();
        tracing::debug!(
            countries = stats.countries,
            states = stats.states,
            cities = stats.cities,
            "dataset built"
        );
        db
    }
}

#[cfg(feature = "cache")]
impl<B: GeoBackend> GeoDataset<B> {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        use bincode::Options;
        Ok(bincode::DefaultOptions::new().serialize(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        use bincode::Options;
        Ok(bincode::DefaultOptions::new()
            .with_limit(CACHE_LIMIT)
            .allow_trailing_bytes()
            .deserialize(data)?)
    }

    /// Load through a binary cache kept next to the source file.
    ///
    /// A readable cache wins unless the source was modified after it was
    /// written; a stale, missing or unreadable cache is rebuilt from the JSON
    /// source. Failing to write the cache is not fatal.
    #[cfg(feature = "json")]
    pub fn load_cached(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let cache = get_cache_path(path, CACHE_SUFFIX)?;

        if is_cache_fresh(path, &cache) {
            match std::fs::read(&cache).map_err(ChartFormError::from).and_then(|b| Self::from_bytes(&b)) {
                Ok(db) => {
                    tracing::info!(cache = %cache.display(), "dataset loaded from cache");
                    return Ok(db);
                }
                Err(e) => {
                    tracing::warn!(cache = %cache.display(), error = %e, "ignoring unreadable cache");
                }
            }
        }

        let db = Self::load_from_path(path)?;
        match db.to_bytes().and_then(|bytes| std::fs::write(&cache, bytes).map_err(Into::into)) {
            Ok(()) => tracing::info!(cache = %cache.display(), "dataset cache written"),
            Err(e) => tracing::warn!(cache = %cache.display(), error = %e, "could not write cache"),
        }
        Ok(db)
    }
}

/// A cache is fresh when it exists and the source is not newer than it.
/// A source without readable metadata (e.g. removed) leaves the cache in use.
#[cfg(feature = "cache")]
fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let cache_time = match std::fs::metadata(cache).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    if let Ok(source_time) = std::fs::metadata(source).and_then(|m| m.modified()) {
        if source_time > cache_time {
            tracing::info!(cache = %cache.display(), "cache older than source, rebuilding");
            return false;
        }
    }
    true
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder for `.gz` paths.
/// Returns a generic reader so the caller doesn't care about compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        ChartFormError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");

    if gzipped {
        #[cfg(feature = "compact")]
        {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }

        #[cfg(not(feature = "compact"))]
        {
            return Err(ChartFormError::Config(format!(
                "{} is gzip-compressed but the `compact` feature is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

/// `countries.json` -> `countries.json.<suffix>`
pub fn get_cache_path(source: &Path, suffix: &str) -> Result<PathBuf> {
    let filename = source
        .file_name()
        .ok_or_else(|| ChartFormError::NotFound(format!("{} has no file name", source.display())))?
        .to_string_lossy();
    Ok(source.with_file_name(format!("{filename}.{suffix}")))
}
