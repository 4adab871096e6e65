use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geowkt::{Coordinate2D, Coordinate3DM, WktReader, WktWriter};

fn line_string(points: usize) -> String {
    let coords: Vec<_> = (0..points)
        .map(|i| format!("{}.5 -{}.25", i, i))
        .collect();
    format!("LINESTRING ({})", coords.join(", "))
}

fn collection(points: usize) -> String {
    let members: Vec<_> = (0..points)
        .map(|i| format!("POINT ZM ({0}.0 {0}.0 {0}.0 {0}.0)", i))
        .collect();
    format!("GEOMETRYCOLLECTION ZM ({})", members.join(", "))
}

pub fn read_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let reader = WktReader::<Coordinate2D>::new();
    for size in [1, 16, 256, 4096].iter() {
        let data = line_string(*size);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("linestring", size), size, |b, &_size| {
            b.iter(|| reader.read(black_box(&data)).unwrap())
        });
    }

    let reader = WktReader::<Coordinate3DM>::new();
    for size in [1, 16, 256].iter() {
        let data = collection(*size);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("collection", size), size, |b, &_size| {
            b.iter(|| reader.read(black_box(&data)).unwrap())
        });
    }
    group.finish();
}

pub fn write_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let writer = WktWriter::new();
    for size in [1, 16, 256, 4096].iter() {
        let geometry = WktReader::<Coordinate2D>::new()
            .read(&line_string(*size))
            .unwrap();
        group.bench_with_input(BenchmarkId::new("linestring", size), size, |b, &_size| {
            b.iter(|| writer.write(black_box(&geometry)))
        });
    }
    group.finish();
}

criterion_group!(benches, read_benchmark, write_benchmark);
criterion_main!(benches);
