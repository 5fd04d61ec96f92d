// crates/chartform-core/src/traits.rs
use serde::{Deserialize, Serialize};

/// Storage backend for strings and floats used by the dataset.
///
/// The dataset is held for the whole page session, so this abstraction lets
/// the crate swap how names and coordinates are stored internally without
/// changing the accessors, which always hand out `&str` / `f64` views.
///
/// Implementors must be `Clone + Send + Sync + 'static` and the associated
/// types must be serializable so a dataset can be cached via bincode.
pub trait GeoBackend: Clone + Send + Sync + 'static {
    type Str: Clone
        + Send
        + Sync
        + std::fmt::Debug
        + Serialize
        + for<'de> Deserialize<'de>
        + AsRef<str>;
    type Float: Copy + Send + Sync + std::fmt::Debug + Serialize + for<'de> Deserialize<'de>;

    fn str_from(s: &str) -> Self::Str;
    fn float_from(f: f64) -> Self::Float;
    fn str_to_string(v: &Self::Str) -> String {
        v.as_ref().to_string()
    }
    /// Convert backend float to plain `f64` (needed for the flattened
    /// [`SearchResult`](crate::SearchResult) and for WASM serialization).
    fn float_to_f64(v: Self::Float) -> f64;
}

/// Default backend: plain `String` + `f64`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultBackend;

impl GeoBackend for DefaultBackend {
    type Str = String;
    type Float = f64;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn float_from(f: f64) -> Self::Float {
        f
    }

    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.clone()
    }

    #[inline]
    fn float_to_f64(v: Self::Float) -> f64 {
        v
    }
}
