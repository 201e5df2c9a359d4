use log::LevelFilter;
use std::io::Write;

/// Level implied by the command-line flags.
pub fn level_for(verbose: bool, debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Initialize console logging on stdout.
///
/// `--debug` enables debug records, `--verbose` info records. `RUST_LOG`
/// still takes precedence for per-module filters:
///
/// ```bash
/// RUST_LOG=neostow::linker=debug neostow
/// ```
pub fn init(verbose: bool, debug: bool) {
    env_logger::Builder::new()
        .filter_level(level_for(verbose, debug))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .try_init()
        .ok(); // Ignore error if logger is already initialized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(false, false), LevelFilter::Warn);
        assert_eq!(level_for(true, false), LevelFilter::Info);
        assert_eq!(level_for(false, true), LevelFilter::Debug);
        assert_eq!(level_for(true, true), LevelFilter::Debug);
    }
}
