//! Request normalization benchmarks
//!
//! Measures the hot paths a hosting layer exercises once per request:
//! - Server environment normalization
//! - Relative path resolution
//! - Response serialization to a wire sink
//!
//! Run with: cargo bench --bench normalize

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use httpenv::{Request, Response, Status, WireTransport};
use std::time::Duration;

// ========== Environment Normalization Benchmarks ==========

fn bench_from_server_env(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_server_env");

    let minimal: Vec<(String, String)> = vec![
        ("REQUEST_METHOD".into(), "GET".into()),
        ("REQUEST_URI".into(), "/".into()),
        ("SERVER_PROTOCOL".into(), "HTTP/1.1".into()),
    ];

    group.bench_function("minimal", |b| {
        b.iter(|| {
            let request = Request::from_server_env(black_box(minimal.clone()));
            black_box(request);
        });
    });

    let typical: Vec<(String, String)> = vec![
        ("SERVER_PROTOCOL".into(), "HTTP/1.1".into()),
        ("REQUEST_METHOD".into(), "PROPFIND".into()),
        ("REQUEST_URI".into(), "/dav/shared/reports/2026?depth=1".into()),
        ("HTTP_HOST".into(), "files.example.org".into()),
        ("HTTP_USER_AGENT".into(), "client/2.4".into()),
        ("HTTP_ACCEPT".into(), "application/xml".into()),
        ("HTTP_ACCEPT_ENCODING".into(), "gzip, deflate".into()),
        ("HTTP_DEPTH".into(), "1".into()),
        ("CONTENT_TYPE".into(), "application/xml".into()),
        ("CONTENT_LENGTH".into(), "212".into()),
        ("HTTPS".into(), "on".into()),
        ("PHP_AUTH_USER".into(), "reporting".into()),
        ("PHP_AUTH_PW".into(), "hunter2".into()),
        ("SERVER_SOFTWARE".into(), "Apache/2.4".into()),
        ("REMOTE_ADDR".into(), "10.1.2.3".into()),
    ];

    group.bench_function("typical_apache", |b| {
        b.iter(|| {
            let request = Request::from_server_env(black_box(typical.clone()));
            black_box(request);
        });
    });

    group.finish();
}

// ========== Path Resolution Benchmarks ==========

fn bench_path_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_resolution");

    let plain = Request::builder()
        .url("/dav/col/file.txt")
        .base_path("/dav/")
        .build();

    group.bench_function("plain", |b| {
        b.iter(|| {
            let path = black_box(&plain).path().unwrap();
            black_box(path);
        });
    });

    let encoded = Request::builder()
        .url("/dav//col%20lection/m%C3%BCnchen.txt?v=1")
        .base_path("/dav/")
        .build();

    group.bench_function("encoded_with_query", |b| {
        b.iter(|| {
            let path = black_box(&encoded).path().unwrap();
            black_box(path);
        });
    });

    group.finish();
}

// ========== Response Serialization Benchmarks ==========

fn bench_send(c: &mut Criterion) {
    let mut group = c.benchmark_group("send");

    let body = vec![0u8; 16 * 1024];
    group.throughput(Throughput::Bytes(body.len() as u64));

    group.bench_function("16kb_buffered", |b| {
        b.iter(|| {
            let mut response = Response::builder()
                .status(Status::new(200).unwrap())
                .header("Content-Type", "application/octet-stream")
                .header("Content-Length", body.len().to_string())
                .body(body.clone())
                .build();

            let mut transport = WireTransport::new(Vec::with_capacity(body.len() + 128));
            response.send(&mut transport).unwrap();
            black_box(transport.into_inner());
        });
    });

    group.finish();
}

criterion_group! {
    name = normalization;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(1000);
    targets =
        bench_from_server_env,
        bench_path_resolution
}

criterion_group! {
    name = serialization;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(500);
    targets = bench_send
}

criterion_main!(normalization, serialization);
