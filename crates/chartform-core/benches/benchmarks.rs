use chartform_core::model::{build_dataset, CityRaw, CountryRaw, RawCoord, StateRaw};
use chartform_core::{DefaultBackend, GeoDataset, LocationSearch};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const SYLLABLES: [&str; 8] = ["lon", "par", "ber", "mü", "ville", "don", "é", "burg"];

// ~50k cities with accented, overlapping names
fn synthetic() -> GeoDataset<DefaultBackend> {
    let raw = (0..50)
        .map(|c| CountryRaw {
            name: format!("Country {c}"),
            iso2: None,
            states: (0..20)
                .map(|s| StateRaw {
                    name: format!("State {c}-{s}"),
                    cities: (0..50)
                        .map(|i| CityRaw {
                            name: format!(
                                "{}{}{}",
                                SYLLABLES[(c + i) % 8],
                                SYLLABLES[(s + i) % 8],
                                SYLLABLES[i % 8]
                            ),
                            latitude: Some(RawCoord::Number(i as f64 / 10.0)),
                            longitude: Some(RawCoord::Number(s as f64 / 10.0)),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    build_dataset(raw)
}

fn bench_search(c: &mut Criterion) {
    let db = synthetic();
    c.bench_function("search prefix 'lon'", |b| b.iter(|| db.search(black_box("lon"))));
    c.bench_function("search accented 'mü'", |b| b.iter(|| db.search(black_box("mü"))));
    c.bench_function("search miss 'zzz'", |b| b.iter(|| db.search(black_box("zzz"))));
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
