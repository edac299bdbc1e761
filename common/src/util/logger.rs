use env_logger::Env;

/// Installs the global logger, `info` unless `RUST_LOG` says otherwise.
/// Repeated calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
