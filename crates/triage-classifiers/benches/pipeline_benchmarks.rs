//! Throughput benchmarks for the classification pipeline
//!
//! Datasets are sized like interactive uploads: thousands to tens of
//! thousands of rows.
//!
//! Run with: cargo bench -p triage-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use triage_classifiers::{region, ClassificationPipeline};
use triage_core::{Dataset, Record};

const COUNTRIES: [&str; 8] = [
    "United States",
    "france",
    "GERMANY",
    "Canada",
    "Japan",
    "Viet Nam",
    "Brazil",
    "",
];

fn synthetic_dataset(rows: usize) -> Dataset {
    let records = (0..rows)
        .map(|i| {
            Record::new(format!("PE-{}", i / 3), "bench.xlsx")
                .with_country(COUNTRIES[i % COUNTRIES.len()])
                .with_rfr_code(format!("R{:02}", i % 17))
                .with_reportability(if i % 4 == 0 {
                    "US FDA - MDR: Malfunction - Reportable"
                } else {
                    ""
                })
                .with_communication(if i % 11 == 0 {
                    "Follow Up for Information"
                } else {
                    "Initial contact"
                })
                .with_source_system(if i % 2 == 0 { "TrackWise" } else { "SAP" })
        })
        .collect();
    Dataset::from_records(records)
}

fn benchmark_pipeline(c: &mut Criterion) {
    let pipeline = ClassificationPipeline::with_defaults().expect("default pipeline");

    let mut group = c.benchmark_group("Classification_Pipeline");
    group.sample_size(20);

    for rows in [1_000usize, 10_000, 30_000] {
        let dataset = synthetic_dataset(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("run", rows), &dataset, |b, dataset| {
            b.iter(|| pipeline.run(black_box(dataset)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("Region_Classifier");

    for country in ["United States", "  czech republic ", "Brazil"] {
        group.bench_with_input(BenchmarkId::new("region_facts", country), &country, |b, country| {
            b.iter(|| region::region_facts(black_box(country)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_pipeline, benchmark_region);
criterion_main!(benches);
