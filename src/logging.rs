use env_logger::{Env, Target};

/// Initialize logging to stderr; stdout carries the LSP stream
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Stderr)
        .init();
}
