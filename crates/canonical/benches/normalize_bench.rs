use canonical::{normalize_and_split, CanonicalizeConfig, Granularity};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const SENTENCE: &str = "The keeper's lamp, bright as ever, swept the bay. Did the ships see it?\n";

fn bench_normalize(c: &mut Criterion) {
    let config = CanonicalizeConfig::default();
    let mut group = c.benchmark_group("normalize_and_split");

    for size in [64usize, 512, 4096, 32768].iter() {
        let text = SENTENCE.repeat((*size / SENTENCE.len()).max(1));
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("words_{size}"), |b| {
            b.iter(|| normalize_and_split(black_box(&text), Granularity::Word, black_box(&config)))
        });
        group.bench_function(format!("paragraphs_{size}"), |b| {
            b.iter(|| {
                normalize_and_split(black_box(&text), Granularity::Paragraph, black_box(&config))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
