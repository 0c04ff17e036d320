//! Shared environment configuration for the binaries.
//!
//! Consolidates `RUST_LOG`, `RAYON_NUM_THREADS` and `LOWPAY_PORT` reads.

/// Install the `tracing` subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Thread count from `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`).
pub fn configured_threads() -> Option<usize> {
    std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
}

/// Build the rayon global pool. `threads` wins over the environment; with
/// neither, rayon picks. Tolerates an already-initialized pool. Returns the
/// pool size.
pub fn init_rayon_threads(threads: Option<usize>) -> usize {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads.or_else(configured_threads) {
        builder = builder.num_threads(n);
    }
    if let Err(e) = builder.build_global() {
        tracing::debug!(error = %e, "rayon pool already initialized");
    }
    let n = rayon::current_num_threads();
    tracing::info!(threads = n, "rayon pool ready");
    n
}

/// Read `LOWPAY_PORT` (default 9000).
pub fn server_port() -> u16 {
    std::env::var("LOWPAY_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9000)
}
