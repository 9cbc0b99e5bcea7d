use std::sync::Once;

static INIT: Once = Once::new();

/// Sets up tracing once for the whole integration run. Pipeline stages log
/// their row counts at `info!`, which would drown the test output, so the
/// filter starts at `warn` unless the environment already says otherwise.
pub fn init_test_env() {
    INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "warn");
        }
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}
