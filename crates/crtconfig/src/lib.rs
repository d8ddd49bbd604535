//! TOML start-up configuration for the viewer.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Start-up configuration for the viewer: shader parameter overrides plus an
/// optional integer display scale. Loaded once before the frame loop; nothing
/// here is consulted while the program runs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ViewerConfig {
    /// Parameter name to value overrides applied onto the default set.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
    /// Integer pixel scale used for the initial window size and for one-shot
    /// exports. Unset means the built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

impl ViewerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == Some(0) {
            return Err(ConfigError::Invalid(
                "scale must be greater than zero".into(),
            ));
        }
        for (name, value) in &self.params {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "parameter names may not be empty".into(),
                ));
            }
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "parameter '{name}' must be a finite number"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
scale = 5

[params]
HardScan = -8.0
MaskDark = 0.8
ShadowMask = 3.0
"#;

    #[test]
    fn parses_sample_config() {
        let config = ViewerConfig::from_toml_str(SAMPLE).expect("parse config");
        assert_eq!(config.scale, Some(5));
        assert_eq!(config.params.get("HardScan"), Some(&-8.0));
        assert_eq!(config.params.len(), 3);
    }

    #[test]
    fn empty_config_is_valid() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert!(config.params.is_empty());
        assert_eq!(config.scale, None);
    }

    #[test]
    fn rejects_zero_scale() {
        let err = ViewerConfig::from_toml_str("scale = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_numeric_param() {
        let err = ViewerConfig::from_toml_str(
            r#"
[params]
HardScan = "loud"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_nan_param() {
        let err = ViewerConfig::from_toml_str(
            r#"
[params]
HardScan = nan
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
