use criterion::{black_box, criterion_group, criterion_main, Criterion};
use generic_uri::{
    normalize::normalize_path,
    pct_enc::{decode, quote, table::URIC},
    Uri,
};
use url::Url;

criterion_group!(
    benches,
    bench_quote,
    bench_decode,
    bench_parse,
    bench_parse_url,
    bench_parse_ipv6,
    bench_normalize,
    bench_resolve,
    bench_relativize,
    bench_eq,
);
criterion_main!(benches);

const QUOTE_CASE: &str = "te😃a 测1`~!@试#$%st^&+=";

fn bench_quote(c: &mut Criterion) {
    c.bench_function("quote", |b| b.iter(|| quote(black_box(QUOTE_CASE), URIC)));
}

const DECODE_CASE: &str = "te%F0%9F%98%83a%20%E6%B5%8B1%60~!@%E8%AF%95%23$%25st%5E&+=";

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode", |b| b.iter(|| decode(black_box(DECODE_CASE), false)));
}

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| Uri::parse(black_box(PARSE_CASE))));
}

fn bench_parse_url(c: &mut Criterion) {
    c.bench_function("parse_url", |b| b.iter(|| Url::parse(black_box(PARSE_CASE))));
}

const PARSE_IPV6_CASE: &str = "http://[2001:db8:85a3::8a2e:370:7334%eth0]:8080/";

fn bench_parse_ipv6(c: &mut Criterion) {
    c.bench_function("parse_ipv6", |b| {
        b.iter(|| Uri::parse(black_box(PARSE_IPV6_CASE)))
    });
}

const NORMALIZE_CASE: &str = "/a/b/c/./../../g/./h//i/../j";

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| normalize_path(black_box(NORMALIZE_CASE)))
    });
}

const RESOLVE_CASE_BASE: &str = "http://example.com/foo/bar/baz";
const RESOLVE_CASE_REF: &str = "../../../qux/./quux";

fn bench_resolve(c: &mut Criterion) {
    let base = Uri::parse(RESOLVE_CASE_BASE).unwrap();
    let child = Uri::parse(RESOLVE_CASE_REF).unwrap();
    c.bench_function("resolve", |b| b.iter(|| black_box(&base).resolve(black_box(&child))));
}

fn bench_relativize(c: &mut Criterion) {
    let base = Uri::parse("http://example.com/foo/").unwrap();
    let child = Uri::parse("http://example.com/foo/./bar/baz?q#f").unwrap();
    c.bench_function("relativize", |b| {
        b.iter(|| black_box(&base).relativize(black_box(&child)))
    });
}

fn bench_eq(c: &mut Criterion) {
    let a = Uri::parse("HTTP://User@Example.COM:80/a%7e/b?c%3d#d").unwrap();
    let b = Uri::parse("http://User@example.com:80/a%7E/b?c%3D#d").unwrap();
    c.bench_function("eq", |bench| bench.iter(|| black_box(&a) == black_box(&b)));
}
