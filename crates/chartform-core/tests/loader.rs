use chartform_core::prelude::*;
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample.json")
}

#[test]
fn loads_plain_json_from_disk() {
    let db = DefaultDataset::load_from_path(sample_path()).unwrap();
    assert_eq!(db.stats().cities, 6);
}

#[test]
fn missing_file_reports_not_found() {
    let err = DefaultDataset::load_from_path("/nope/countries.json").unwrap_err();
    assert!(matches!(err, ChartFormError::NotFound(_)));
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = DefaultDataset::from_json_str("[{\"states\": 3}]").unwrap_err();
    assert!(matches!(err, ChartFormError::Json(_)));
}

#[cfg(feature = "compact")]
#[test]
fn gz_files_are_decompressed() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(include_bytes!("data/sample.json")).unwrap();
    std::fs::write(&path, enc.finish().unwrap()).unwrap();

    let db = DefaultDataset::load_from_path(&path).unwrap();
    assert_eq!(db.search("Lon").len(), 3);
}

#[cfg(feature = "cache")]
#[test]
fn cache_is_written_and_reused() {
    use chartform_core::loader::{get_cache_path, CACHE_SUFFIX};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json");
    std::fs::copy(sample_path(), &path).unwrap();

    let first = DefaultDataset::load_cached(&path).unwrap();
    let cache = get_cache_path(&path, CACHE_SUFFIX).unwrap();
    assert!(cache.exists());

    // the cache now wins even if the source disappears
    std::fs::remove_file(&path).unwrap();
    let second = DefaultDataset::load_cached(&path).unwrap();
    assert_eq!(first.stats(), second.stats());
    assert_eq!(second.search("Par")[0].city, "Paris");
}

#[cfg(feature = "cache")]
#[test]
fn cache_is_rebuilt_when_source_is_newer() {
    use std::time::{Duration, SystemTime};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json");
    std::fs::write(
        &path,
        r#"[{"name":"United Kingdom","states":[{"name":"England","cities":[
            {"name":"London","latitude":"51.5","longitude":"-0.12"}]}]}]"#,
    )
    .unwrap();
    let first = DefaultDataset::load_cached(&path).unwrap();
    assert_eq!(first.stats().cities, 1);

    std::fs::write(
        &path,
        r#"[{"name":"France","states":[{"name":"Île-de-France","cities":[
            {"name":"Paris","latitude":"48.85","longitude":"2.35"},
            {"name":"Versailles","latitude":"48.80","longitude":"2.13"}]}]}]"#,
    )
    .unwrap();
    // mtime granularity can be coarse; push the source clearly past the cache
    std::fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();

    let second = DefaultDataset::load_cached(&path).unwrap();
    assert_eq!(second.stats().cities, 2);
    assert_eq!(second.search("Par").len(), 1);
    assert!(second.search("Lon").is_empty());
}

#[cfg(feature = "cache")]
#[test]
fn binary_cache_bytes_load_back() {
    let db = DefaultDataset::load_from_path(sample_path()).unwrap();
    let bytes = db.to_bytes().unwrap();
    let back = DefaultDataset::from_bytes(&bytes).unwrap();
    assert_eq!(back.stats(), db.stats());
    assert_eq!(back.search("Zur")[0].city, "Zürich");
}
