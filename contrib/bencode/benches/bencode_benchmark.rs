use bencode::{ben_bytes, ben_int, ben_list, ben_map, decode, decode_response, Value};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const B_NESTED_LISTS: &[u8; 100] =
    b"lllllllllllllllllllllllllllllllllllllllllllllllllleeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"; // cspell:disable-line

fn announce_response(num_peers: usize) -> Vec<u8> {
    let peers: Vec<u8> = (0..num_peers)
        .flat_map(|i| {
            let [hi, lo] = u16::try_from(i % 65_535).unwrap_or_default().to_be_bytes();
            [10, 0, hi, lo, 0x1A, 0xE1]
        })
        .collect();

    (ben_map! {
        "interval" => ben_int!(1800),
        "complete" => ben_int!(10),
        "incomplete" => ben_int!(3),
        "peers" => ben_bytes!(peers),
        "warnings" => ben_list!(ben_bytes!("none"))
    })
    .encode()
}

fn bench_nested_lists(bencode: &[u8]) {
    decode(bencode).unwrap();
}

fn bench_announce_response(bencode: &[u8]) {
    decode_response(bencode).unwrap();
}

fn bench_encode(value: &Value) {
    value.encode();
}

fn criterion_benchmark(c: &mut Criterion) {
    let multi_kb = announce_response(5_000);
    let value = decode(&multi_kb).unwrap();

    c.bench_function("bencode nested lists", |b| {
        b.iter(|| bench_nested_lists(black_box(B_NESTED_LISTS)));
    });

    c.bench_function("bencode multi kb announce response", |b| {
        b.iter(|| bench_announce_response(black_box(&multi_kb)));
    });

    c.bench_function("bencode encode multi kb", |b| {
        b.iter(|| bench_encode(black_box(&value)));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
