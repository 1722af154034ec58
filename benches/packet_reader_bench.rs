//! Criterion benchmark untuk PacketReader
//!
//! Run dengan: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kurir::source::{ScriptedSource, Step};
use kurir::{Packet, PacketReader};
use std::io::Read;

const TOTAL: usize = 1024 * 1024;

fn input() -> Vec<u8> {
    (0..TOTAL).map(|i| i as u8).collect()
}

fn bench_modes(c: &mut Criterion) {
    let data = input();
    let mut group = c.benchmark_group("packet_reader");
    group.throughput(Throughput::Bytes(TOTAL as u64));

    for packet_size in [256usize, 1024, 16 * 1024].iter() {
        // Source chunk lebih kecil dari packet: memaksa akumulasi
        let chunk = packet_size / 2 + 1;

        group.bench_with_input(BenchmarkId::new("blocking", packet_size), packet_size, |b, &size| {
            b.iter(|| {
                let source = ScriptedSource::chunked(&data, chunk);
                let mut reader = PacketReader::with_packet_size(source, size, false).unwrap();
                let mut total = 0;
                while let Packet::Data(bytes) = reader.read_packet(false).unwrap() {
                    total += black_box(bytes).len();
                }
                total
            });
        });

        group.bench_with_input(BenchmarkId::new("no_delay", packet_size), packet_size, |b, &size| {
            b.iter(|| {
                let mut steps = Vec::new();
                for piece in data.chunks(chunk) {
                    steps.push(Step::bytes(piece));
                    steps.push(Step::Nothing);
                }
                let mut reader =
                    PacketReader::with_packet_size(ScriptedSource::new(steps), size, true).unwrap();
                let mut total = 0;
                loop {
                    match reader.read_packet(true).unwrap() {
                        Packet::Data(bytes) => total += black_box(bytes).len(),
                        Packet::Empty => {}
                        Packet::Eof => break,
                    }
                }
                total
            });
        });
    }

    group.finish();
}

fn bench_byte_reads(c: &mut Criterion) {
    let data = input();
    let mut group = c.benchmark_group("byte_reads");
    group.throughput(Throughput::Bytes(TOTAL as u64));

    group.bench_function("read_to_end", |b| {
        b.iter(|| {
            let source = ScriptedSource::chunked(&data, 4096);
            let mut reader = PacketReader::with_packet_size(source, 1024, false).unwrap();
            let mut out = Vec::with_capacity(TOTAL);
            reader.read_to_end(&mut out).unwrap();
            black_box(out.len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_modes, bench_byte_reads);
criterion_main!(benches);
