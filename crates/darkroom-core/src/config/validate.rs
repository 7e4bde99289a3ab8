//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.root must not be empty".into(),
            ));
        }
        if self.storage.public_base.is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.public_base must not be empty".into(),
            ));
        }
        if self.image.jpeg_quality == 0 || self.image.jpeg_quality > 100 {
            return Err(ConfigError::ValidationError(
                "image.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.limits.max_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_dimension must be > 0".into(),
            ));
        }
        if self.limits.max_decode_alloc_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_decode_alloc_mb must be > 0".into(),
            ));
        }
        if self.processing.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.parallel_workers must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_quality() {
        let mut config = Config::default();
        config.image.jpeg_quality = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jpeg_quality"));
    }

    #[test]
    fn test_validate_rejects_quality_above_100() {
        let mut config = Config::default();
        config.image.jpeg_quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jpeg_quality"));
    }

    #[test]
    fn test_validate_rejects_zero_max_dimension() {
        let mut config = Config::default();
        config.limits.max_dimension = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_dimension"));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = Config::default();
        config.processing.parallel_workers = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("parallel_workers"));
    }

    #[test]
    fn test_validate_rejects_empty_storage_root() {
        let mut config = Config::default();
        config.storage.root = std::path::PathBuf::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("storage.root"));
    }
}
