/// Initialise env_logger. `RUST_LOG` overrides the default `info` filter.
/// Logs go to stderr, stdout is kept for routes.
pub fn log_init() {
    use std::io::Write;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

// tests may call this many times
#[cfg(test)]
pub fn test_log_init() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
