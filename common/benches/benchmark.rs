extern crate criterion;

use self::criterion::*;
use common::count_multi;
use common::count_simple;
use common::FrequencyTable;
use common::DEFAULT_CHUNK_SIZE;

const SAMPLE_TEXT: &[u8] = include_bytes!("../../test_data/sample_text.txt");

fn count(c: &mut Criterion) {
    // repeat the sample to get some larger inputs
    let inputs: Vec<Vec<u8>> = [1, 16, 64]
        .iter()
        .map(|repeat| SAMPLE_TEXT.repeat(*repeat))
        .collect();

    let mut group = c.benchmark_group("count");
    for input in inputs.iter() {
        let input_bytes = input.len() as u64;
        group.throughput(Throughput::Bytes(input_bytes));
        group.bench_with_input(
            BenchmarkId::new("count_simple", input_bytes),
            &input,
            |b, i| {
                b.iter(|| count_simple(i));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("count_multi", input_bytes),
            &input,
            |b, i| {
                b.iter(|| count_multi(i));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("frequency_table_chunked", input_bytes),
            &input,
            |b, i| {
                b.iter(|| {
                    let mut table = FrequencyTable::new();
                    for chunk in i.chunks(DEFAULT_CHUNK_SIZE) {
                        table.update(chunk).unwrap();
                    }
                    table
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, count);
criterion_main!(benches);
