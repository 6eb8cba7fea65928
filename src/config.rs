//! Distgate configuration.

use std::path::PathBuf;

/// Configuration for the distribution gateway.
///
/// The artifact directory is an explicit value handed to the gateway at
/// construction rather than process-wide state, so tests can point the
/// scanner at throwaway directories.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Directory holding the distributable artifacts on the server.
    ///
    /// Expected to be an absolute path. The directory is re-listed on every
    /// request; the filesystem is the source of truth and may change between
    /// requests.
    pub artifact_dir: PathBuf,
}

impl GatewayConfig {
    /// Create a configuration for the given artifact directory.
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
        }
    }

    /// Validate configuration for obvious errors.
    ///
    /// Existence of the directory is deliberately not checked here: the
    /// directory may appear or vanish at any time, and the scanner reports
    /// that per request.
    pub fn validate(&self) -> Result<(), crate::GatewayError> {
        if self.artifact_dir.as_os_str().is_empty() {
            return Err(crate::GatewayError::ConfigError(
                "artifact_dir cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_directory_path() {
        let config = GatewayConfig::new("/srv/artifacts");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_an_empty_path() {
        let config = GatewayConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(crate::GatewayError::ConfigError(_))
        ));
    }
}
