use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use climate_explorer::models::{
    LinearScaler, LogisticModel, Month, Observation, Phenomenon, PhenomenonModel, StandardScaler,
};
use climate_explorer::readers::ObservationReader;
use climate_explorer::utils::coordinates::parse_coordinate;
use climate_explorer::{DatasetStore, EventProbabilityEstimator};
use std::sync::Arc;

fn create_test_store(country_count: usize, years: usize) -> DatasetStore {
    let mut observations = Vec::with_capacity(country_count * years * 12);

    for country in 0..country_count {
        for year in 0..years {
            for month in Month::all() {
                let base = (country + year) as f64 + month.number() as f64;
                observations.push(Observation::new(
                    format!("Country {}", country),
                    month,
                    10.0 + base * 0.5,
                    40.0 + base * 3.0,
                    -40.0 + country as f64 * 0.1,
                    -70.0 + country as f64 * 0.1,
                ));
            }
        }
    }

    DatasetStore::from_observations(observations)
}

fn create_estimator(store: DatasetStore) -> EventProbabilityEstimator {
    let rain = PhenomenonModel::new(
        Phenomenon::Rain,
        LinearScaler::new(0.01, 0.0).unwrap(),
        LogisticModel::new(2.5, -1.0).unwrap(),
    );
    let heat = PhenomenonModel::new(
        Phenomenon::Heat,
        StandardScaler::new(18.0, 6.0).unwrap(),
        LogisticModel::new(1.2, 0.0).unwrap(),
    );

    EventProbabilityEstimator::new(Arc::new(store), rain, heat).unwrap()
}

fn create_csv(rows: usize) -> Vec<u8> {
    let mut csv = String::from("País,Mes,Temperatura,Precipitaciones,Latitud,Longitud\n");
    for i in 0..rows {
        let latitude = if i % 10 == 0 { String::new() } else { format!("{:.4}", -33.0 + i as f64 * 0.001) };
        csv.push_str(&format!(
            "Country {},{},{:.3},{:.3},{},-70.65\n",
            i % 50,
            Month::all().nth(i % 12).map(|m| m.spanish_name()).unwrap_or("Enero"),
            10.0 + (i % 20) as f64,
            (i % 300) as f64,
            latitude
        ));
    }
    csv.into_bytes()
}

fn benchmark_estimate(c: &mut Criterion) {
    let estimator = create_estimator(create_test_store(50, 20));

    c.bench_function("estimate_country_month", |b| {
        b.iter(|| black_box(estimator.estimate(black_box("Country 25"), Month::JULY)))
    });

    c.bench_function("estimate_no_data", |b| {
        b.iter(|| black_box(estimator.estimate(black_box("Atlantis"), Month::JULY)))
    });
}

fn benchmark_estimate_by_store_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_by_store_size");

    for &countries in &[10, 100, 500] {
        group.bench_with_input(
            BenchmarkId::new("countries", countries),
            &countries,
            |b, &country_count| {
                let estimator = create_estimator(create_test_store(country_count, 10));
                b.iter(|| black_box(estimator.estimate("Country 5", Month::JANUARY)))
            },
        );
    }

    group.finish();
}

fn benchmark_dataset_parsing(c: &mut Criterion) {
    let csv = create_csv(5_000);
    let reader = ObservationReader::new();

    c.bench_function("read_observations_5000", |b| {
        b.iter(|| {
            let (observations, report) = reader.read_from_bytes(black_box(&csv)).unwrap();
            black_box((observations.len(), report.rows_missing_coordinates))
        })
    });
}

fn benchmark_coordinate_parsing(c: &mut Criterion) {
    let coordinates = vec!["-33.4489", "-70,6693", "51.5042", "-0.1275", "NaN", ""];

    c.bench_function("coordinate_parsing", |b| {
        b.iter(|| {
            let mut parsed = 0;
            for raw in &coordinates {
                if let Ok(Some(value)) = parse_coordinate(raw) {
                    black_box(value);
                    parsed += 1;
                }
            }
            black_box(parsed)
        })
    });
}

criterion_group!(
    benches,
    benchmark_estimate,
    benchmark_estimate_by_store_size,
    benchmark_dataset_parsing,
    benchmark_coordinate_parsing
);
criterion_main!(benches);
