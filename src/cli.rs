//! Command-line arguments.
//!
//! Precedence: flags, then the config file, then built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, validate_config, ConfigError, EchoConfig, EchoMode};

#[derive(Debug, Parser)]
#[command(name = "echo-server")]
#[command(about = "Echo request headers and a transformed request body", long_about = None)]
pub struct Cli {
    /// Listen address: host:port, or :port for all interfaces.
    pub addr: String,

    /// Body transform.
    #[arg(short, long, value_enum)]
    pub mode: Option<EchoMode>,

    /// Delay before a json-mode request is processed, in milliseconds.
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Resolve the effective configuration.
    ///
    /// The file is only parsed here; validation runs once on the merged
    /// result, so a flag can replace a bad file value.
    pub fn into_config(self) -> Result<EchoConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EchoConfig::default(),
        };

        config.listener.bind_address = self.addr;
        if let Some(mode) = self.mode {
            config.echo.mode = mode;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.echo.delay_ms = delay_ms;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn address_is_required() {
        let err = Cli::try_parse_from(["echo-server"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn address_only_uses_defaults() {
        let config = Cli::try_parse_from(["echo-server", ":8080"])
            .unwrap()
            .into_config()
            .unwrap();

        assert_eq!(config.listener.bind_address, ":8080");
        assert_eq!(config.echo.mode, EchoMode::Json);
        assert_eq!(config.echo.delay_ms, 50);
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[echo]\nmode = \"json\"\ndelay_ms = 5").unwrap();
        let path = file.path().to_str().unwrap();

        let config = Cli::try_parse_from([
            "echo-server",
            "127.0.0.1:0",
            "--config",
            path,
            "--mode",
            "base64",
        ])
        .unwrap()
        .into_config()
        .unwrap();

        assert_eq!(config.echo.mode, EchoMode::Base64);
        assert_eq!(config.echo.delay_ms, 5);
    }

    #[test]
    fn flag_replaces_invalid_file_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"\"\n[echo]\ndelay_ms = 99999").unwrap();
        let path = file.path().to_str().unwrap();

        let config = Cli::try_parse_from(["echo-server", ":0", "--config", path, "--delay-ms", "10"])
            .unwrap()
            .into_config()
            .unwrap();

        assert_eq!(config.echo.delay_ms, 10);
        assert_eq!(config.listener.bind_address, ":0");
    }

    #[test]
    fn invalid_file_value_without_override_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[echo]\ndelay_ms = 99999").unwrap();
        let path = file.path().to_str().unwrap();

        let err = Cli::try_parse_from(["echo-server", ":0", "--config", path])
            .unwrap()
            .into_config()
            .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["echo-server", ":80", "--mode", "xml"]).is_err());
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let err = Cli::try_parse_from(["echo-server", ":80", "--log-level", "chatty"])
            .unwrap()
            .into_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
