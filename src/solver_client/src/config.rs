use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Algorithm;

/// How to reach the solving service. Every key is optional in the TOML file.
///
/// ```toml
/// base_url = "http://127.0.0.1:8000/api/v1/solver/"
/// program = "curl"
/// args = ["--silent", "--show-error", "--data-binary", "@-"]
/// default_algorithm = "kociemba"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Program that performs the POST. It gets `args`, then the endpoint URL, and must write the
    /// reply body to stdout.
    pub program: String,
    pub args: Vec<String>,
    pub default_algorithm: Algorithm,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read the configuration file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse the configuration file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://127.0.0.1:8000/api/v1/solver/".to_owned(),
            program: "curl".to_owned(),
            // Without `--fail`, so that the error body of a rejected cube still reaches stdout
            args: [
                "--silent",
                "--show-error",
                "--request",
                "POST",
                "--header",
                "Content-Type: application/json",
                "--data-binary",
                "@-",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            default_algorithm: Algorithm::Lbl,
        }
    }
}

impl ClientConfig {
    /// `<config dir>/cube-solve/config.toml`, if the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("cube-solve");
        path.push("config.toml");
        Some(path)
    }

    pub fn load(path: &Path) -> Result<ClientConfig, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        debug!(target: "config", "Loaded {path:?}: {config:?}");

        Ok(config)
    }

    /// Loads `explicit` if given, otherwise the file at [`ClientConfig::default_path`] if there is
    /// one, otherwise the built in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<ClientConfig, ConfigError> {
        if let Some(path) = explicit {
            return ClientConfig::load(path);
        }

        match ClientConfig::default_path() {
            Some(path) if path.is_file() => ClientConfig::load(&path),
            _ => {
                info!(target: "config", "No configuration file found; using defaults");
                Ok(ClientConfig::default())
            }
        }
    }

    /// Full URL of the endpoint for `algorithm`.
    #[must_use]
    pub fn endpoint_url(&self, algorithm: Algorithm) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            algorithm.endpoint()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ClientConfig, ConfigError};
    use crate::Algorithm;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            base_url = "https://cube.example/api/v1/solver"
            default_algorithm = "kociemba"
            "#,
        )
        .unwrap();

        assert_eq!(config.program, "curl");
        assert_eq!(config.default_algorithm, Algorithm::Kociemba);
        assert_eq!(
            config.endpoint_url(Algorithm::Kociemba),
            "https://cube.example/api/v1/solver/solve-kociemba/"
        );
    }

    #[test]
    fn default_endpoints() {
        let config = ClientConfig::default();

        assert_eq!(
            config.endpoint_url(Algorithm::Lbl),
            "http://127.0.0.1:8000/api/v1/solver/solve/"
        );
    }

    #[test]
    fn unknown_algorithm_is_a_parse_error() {
        assert!(toml::from_str::<ClientConfig>(r#"default_algorithm = "cfop""#).is_err());
    }

    #[test]
    fn missing_explicit_file() {
        let err = ClientConfig::load_or_default(Some(Path::new("/nonexistent/cube-solve.toml")))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
