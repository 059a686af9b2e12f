// 📝 Logging - stderr subscriber for the consoles
//
// The menu owns stdout; diagnostics go to stderr so they never interleave
// with prompts.

use crate::config::AppConfig;

/// Install the global `tracing` subscriber for a console.
///
/// Returns `false` when a subscriber was already installed (tests, or a
/// second call), which is not an error.
pub fn init(config: &AppConfig) -> bool {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        let config = AppConfig::inventory();
        let _ = init(&config);
        assert!(!init(&config));
    }
}
