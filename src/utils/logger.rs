use crate::config::toml_config::LoggingSection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "staffing=info";
const VERBOSE_DIRECTIVE: &str = "staffing=debug,info";

/// Filter directive for a `[logging]` section: an explicit `filter` wins,
/// then `verbose`, then the crate-level default. `RUST_LOG` overrides all three.
pub fn filter_directive(logging: &LoggingSection) -> String {
    match logging.filter.as_deref().map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ if logging.verbose => VERBOSE_DIRECTIVE.to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

/// Installs the global subscriber described by `logging`.
/// Calling it a second time in the same process is a no-op.
pub fn init_logger(logging: &LoggingSection) {
    let directive = filter_directive(logging);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let installed = if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        tracing::debug!(filter = %directive, json = logging.json, "Logger initialized");
    }
}
