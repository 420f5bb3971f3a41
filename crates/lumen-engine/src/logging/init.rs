use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g. `"info"` or
/// `"lumen_engine=debug,wgpu=warn"`. When unset, `RUST_LOG` is consulted and
/// then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
    /// wgpu and naga are chatty at info; they are capped at `warn` unless the
    /// filter names them.
    pub quiet_gpu: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
            quiet_gpu: true,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Output goes to stderr.
///
/// Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(config.default_level);

        if config.quiet_gpu {
            for module in ["wgpu_core", "wgpu_hal", "naga"] {
                builder.filter_module(module, log::LevelFilter::Warn);
            }
        }

        // Later filters override earlier ones for the same module.
        if let Some(filter) = config.env_filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            builder.parse_filters(&filter);
        }

        builder.write_style(config.write_style);
        builder.target(env_logger::Target::Stderr);

        // Another logger may already be installed (tests, embedding hosts).
        if builder.try_init().is_err() {
            log::debug!("logger already installed; keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("debug".into()),
            ..LoggingConfig::default()
        });
        log::info!("still logging");
    }
}
