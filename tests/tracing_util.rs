use tracing_subscriber::EnvFilter;

/// Per-test tracing subscriber guard.
///
/// Routes crate logs through the test writer so `cargo test -- --nocapture`
/// shows them; dropped at the end of each test to keep subscribers isolated.
pub struct TestTracing {
    _guard: tracing::subscriber::DefaultGuard,
}

impl TestTracing {
    pub fn init() -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        Self { _guard: guard }
    }
}
