use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a fmt subscriber once per test binary so mount-pass logs show up
/// when RUST_LOG is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
