use chromenet::socket::pool::ClientSocketPool;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;
use url::Url;

fn benchmark_pool_request_socket_limit_check(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let pool = ClientSocketPool::new(None);
    let url = Url::parse("http://example.com").unwrap();

    // This benchmark primarily measures the overhead of the DashMap and Atomic check logic
    // We expect it to fail (DNS/Connect) but capturing the "Limit Check" overhead is fast part.
    // Actually, ConnectJob::connect makes network calls, which is too slow for microbenchmark.
    // We should ideally mock ConnectJob, but we can't easily injection mock here without refactoring.

    // So we benchmark the overhead up to the point of connection,
    // OR we benchmark the lookup of existing idle sockets (which is pure memory op).

    // Let's benchmark "Check Limits" implicitly by requesting to a blackhole?
    // No, too slow.

    // Let's benchmark IDLE socket retrieval.
    // We'll insert a fake socket into the pool (requires exposing internal state or making `release` generic?)
    // `SocketType` is public in crate, but `release_socket` takes it.
    // But we can't construct a connected `TcpStream` easily without a real connection.

    // Workaround: We benchmark the "Check Limit" path where it returns error?
    // request_socket -> Checks Idle -> Checks Limits -> Connects.

    // Let's just create 1000 tasks that access the pool concurrently to measure lock contention (if any).
    c.bench_function("pool_contention", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = black_box(pool.request_socket(&url, None).await);
        })
    });
}

criterion_group!(benches, benchmark_pool_request_socket_limit_check);
criterion_main!(benches);
