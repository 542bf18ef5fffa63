//! Log setup from an explicit config value, applied once before the run.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub debug: bool,
}

impl LogConfig {
    pub fn level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::INFO
        } else {
            LevelFilter::WARN
        }
    }

    /// Install the global subscriber. Logs go to stderr; stdout carries the CSV.
    pub fn install(&self) {
        let filter = EnvFilter::builder()
            .with_default_directive(self.level().into())
            .parse_lossy("");
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
