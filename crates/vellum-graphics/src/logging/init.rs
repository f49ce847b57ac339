use std::sync::Once;

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

/// Module path that logs every applied instruction at `trace`.
const REPLAY_TARGET: &str = "vellum_graphics::canvas";

/// Logger settings for binaries and tests built on this crate.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directives. Falls back to `RUST_LOG`, then `info`.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
    /// Raises the canvas module to `trace` on top of the resolved filter.
    pub trace_replay: bool,
    /// Capture output through the test harness instead of stderr.
    pub is_test: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
            trace_replay: false,
            is_test: false,
        }
    }
}

impl LoggingConfig {
    /// Quiet settings for unit tests: warnings only, captured per test.
    pub fn for_tests() -> Self {
        Self { env_filter: Some("warn".into()), is_test: true, ..Self::default() }
    }

    fn builder(&self) -> Builder {
        let mut builder = Builder::new();
        let directives = self.env_filter.clone().or_else(|| std::env::var("RUST_LOG").ok());
        match directives {
            Some(d) => builder.parse_filters(&d),
            None => builder.filter_level(LevelFilter::Info),
        };
        if self.trace_replay {
            builder.filter_module(REPLAY_TARGET, LevelFilter::Trace);
        }
        builder.write_style(self.write_style).is_test(self.is_test);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the global logger on the first call; later calls do nothing.
///
/// Returns whether this call installed it. A logger set up elsewhere
/// (another crate, a test harness) is left in place.
pub fn init_logging(config: LoggingConfig) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        installed = config.builder().try_init().is_ok();
        if installed {
            log::debug!("logger installed (replay tracing: {})", config.trace_replay);
        }
    });
    installed
}
