//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::WeaveConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "weave.toml";

const MAX_INDENT_WIDTH: usize = 16;

/// Loads and validates `weave.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<WeaveConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a `weave.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<WeaveConfig, ConfigError> {
    let config: WeaveConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &WeaveConfig) -> Result<(), ConfigError> {
    let emit = &config.emit;
    if emit.indent_width == 0 || emit.indent_width > MAX_INDENT_WIDTH {
        return Err(ConfigError::InvalidValue {
            key: "emit.indent_width",
            reason: format!("must be between 1 and {MAX_INDENT_WIDTH}"),
        });
    }
    if emit.artifact_suffix.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "emit.artifact_suffix",
            reason: "must not be empty".to_string(),
        });
    }
    if emit.artifact_suffix.contains(|c: char| c == '/' || c == '\\') {
        return Err(ConfigError::InvalidValue {
            key: "emit.artifact_suffix",
            reason: "must not contain path separators".to_string(),
        });
    }
    if emit.header.contains('\n') {
        return Err(ConfigError::InvalidValue {
            key: "emit.header",
            reason: "must be a single line".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, WeaveConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[emit]
indent_width = 2
artifact_suffix = ".mixins.cs"
header = "// generated"
reindent_members = true

[merge]
detect_duplicate_members = true

[pipeline]
parallel = false
jobs = 4
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.emit.indent_width, 2);
        assert_eq!(config.emit.artifact_suffix, ".mixins.cs");
        assert_eq!(config.emit.header, "// generated");
        assert!(config.emit.reindent_members);
        assert!(config.merge.detect_duplicate_members);
        assert!(!config.pipeline.parallel);
        assert_eq!(config.pipeline.jobs, 4);
    }

    #[test]
    fn zero_indent_rejected() {
        let err = load_config_from_str("[emit]\nindent_width = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "emit.indent_width",
                ..
            }
        ));
    }

    #[test]
    fn suffix_with_separator_rejected() {
        let err = load_config_from_str("[emit]\nartifact_suffix = \"/x.cs\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "emit.artifact_suffix",
                ..
            }
        ));
    }

    #[test]
    fn empty_suffix_rejected() {
        let err = load_config_from_str("[emit]\nartifact_suffix = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = load_config_from_str("[merge]\ndedupe = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[pipeline]\nparallel = false\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert!(!config.pipeline.parallel);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
