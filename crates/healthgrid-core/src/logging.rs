use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the CLI-derived filter
pub const LOG_ENV_VAR: &str = "HEALTHGRID_LOG";

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "resort_catalog");
/// // Or with additional fields:
/// trace_time!(start, "upsert", family = "water");
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Build the filter directive for the given CLI flags
fn level_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("healthgrid={level},healthgrid_core={level}"),
        (true, None) => "healthgrid=debug,healthgrid_core=debug".to_string(),
        (false, None) => "healthgrid=warn,healthgrid_core=warn".to_string(),
    }
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let directive = level_directive(verbose, log_level);

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(directive));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive_defaults_to_warn() {
        assert_eq!(
            level_directive(false, None),
            "healthgrid=warn,healthgrid_core=warn"
        );
    }

    #[test]
    fn test_level_directive_verbose_is_debug() {
        assert_eq!(
            level_directive(true, None),
            "healthgrid=debug,healthgrid_core=debug"
        );
    }

    #[test]
    fn test_level_directive_passes_full_directives_through() {
        assert_eq!(level_directive(true, Some("trace")), "healthgrid=trace,healthgrid_core=trace");
        assert_eq!(
            level_directive(false, Some("healthgrid_core::catalog=debug")),
            "healthgrid_core::catalog=debug"
        );
    }
}
