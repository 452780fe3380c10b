use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigInt;
use ordfloat::{decode, encode, encode_integer, BigFloat, RadixConverter};

// ---------------------------------------------------------------------------
// Input generation
// ---------------------------------------------------------------------------

/// A value whose significand carries `bits` significant bits and whose
/// exponent is far from zero.
fn make_wide_value(bits: u32) -> BigFloat {
    let significand = (BigInt::from(1) << bits) - 1; // all ones, odd
    BigFloat::new(significand, BigInt::from(i64::from(bits) * 7 + 1_000_000))
}

// ---------------------------------------------------------------------------
// Encoding benchmarks
// ---------------------------------------------------------------------------

fn bench_encode(c: &mut Criterion) {
    let mut g = c.benchmark_group("encode");

    let small = BigFloat::from(42i64);
    let medium = BigFloat::from(123.456_789_f64);
    let large = make_wide_value(400);
    let very_large = make_wide_value(4000);

    g.bench_function("small", |b| {
        b.iter(|| encode(black_box(&small)).unwrap());
    });
    g.bench_function("medium", |b| {
        b.iter(|| encode(black_box(&medium)).unwrap());
    });
    g.bench_function("large_400b", |b| {
        b.iter(|| encode(black_box(&large)).unwrap());
    });
    g.bench_function("very_large_4000b", |b| {
        b.iter(|| encode(black_box(&very_large)).unwrap());
    });

    // Construction paths
    g.bench_function("from_i64", |b| {
        b.iter(|| BigFloat::from(black_box(123_456_789_i64)));
    });
    g.bench_function("from_f64", |b| {
        b.iter(|| BigFloat::from(black_box(123.456_789_f64)));
    });
    g.bench_function("from_f64_subnormal", |b| {
        b.iter(|| BigFloat::from(black_box(f64::from_bits(3))));
    });

    // Integer sort keys
    let big_integer = (BigInt::from(1) << 512u32) - 1;
    g.bench_function("integer_key/small", |b| {
        b.iter(|| encode_integer(black_box(&BigInt::from(42))).unwrap());
    });
    g.bench_function("integer_key/512b", |b| {
        b.iter(|| encode_integer(black_box(&big_integer)).unwrap());
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Decoding benchmarks
// ---------------------------------------------------------------------------

fn bench_decode(c: &mut Criterion) {
    let mut g = c.benchmark_group("decode");

    let small = encode(&BigFloat::from(42i64)).unwrap();
    let medium = encode(&BigFloat::from(123.456_789_f64)).unwrap();
    let large = encode(&make_wide_value(400)).unwrap();
    let very_large = encode(&make_wide_value(4000)).unwrap();

    g.bench_function("small", |b| {
        b.iter(|| decode(black_box(&small)).unwrap());
    });
    g.bench_function("medium", |b| {
        b.iter(|| decode(black_box(&medium)).unwrap());
    });
    g.bench_function("large_400b", |b| {
        b.iter(|| decode(black_box(&large)).unwrap());
    });
    g.bench_function("very_large_4000b", |b| {
        b.iter(|| decode(black_box(&very_large)).unwrap());
    });

    // Display — format back to string
    let displayed = BigFloat::from(123.456_789_f64);
    g.bench_with_input(BenchmarkId::new("display", "medium"), &displayed, |b, d| {
        b.iter(|| format!("{}", black_box(d)));
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Comparison benchmarks
// ---------------------------------------------------------------------------

fn bench_compare(c: &mut Criterion) {
    let mut g = c.benchmark_group("compare");

    let a = BigFloat::from(123.456_789_f64);
    let b = BigFloat::from(987.654_321_f64);
    let a_large = make_wide_value(400);
    let b_large = -&a_large;

    let a_clone = a.clone();
    g.bench_function("cmp/equal", |bench| {
        bench.iter(|| black_box(&a).cmp(black_box(&a_clone)));
    });
    g.bench_function("cmp/different_medium", |bench| {
        bench.iter(|| black_box(&a).cmp(black_box(&b)));
    });
    g.bench_function("cmp/different_large", |bench| {
        bench.iter(|| black_box(&a_large).cmp(black_box(&b_large)));
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Round-trip benchmarks
// ---------------------------------------------------------------------------

fn bench_roundtrip(c: &mut Criterion) {
    let mut g = c.benchmark_group("roundtrip");

    let inputs = [
        ("small", BigFloat::from(42i64)),
        ("medium", BigFloat::from(123.456_789_f64)),
    ];

    for (name, value) in &inputs {
        // BigFloat -> String -> BigFloat
        g.bench_with_input(BenchmarkId::new("encode_decode", *name), value, |b, v| {
            b.iter(|| {
                let s = encode(black_box(v)).unwrap();
                decode(&s).unwrap()
            });
        });

        // BigFloat -> RadixFloat -> BigFloat
        let converter = RadixConverter::default();
        g.bench_with_input(BenchmarkId::new("radix", *name), value, |b, v| {
            b.iter(|| converter.to_radix(black_box(v)).unwrap().to_big_float());
        });
    }

    // f64 -> BigFloat -> f64
    g.bench_function("f64_there_and_back", |b| {
        b.iter(|| BigFloat::from(black_box(123.456_789_f64)).to_f64());
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_compare,
    bench_roundtrip
);
criterion_main!(benches);
