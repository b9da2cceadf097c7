// src/config/loader.rs
//! Layered TOML configuration loader

use crate::config::{constants::paths, ProjectConfig};
use crate::error::{LedError, LedResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads a [`ProjectConfig`] from one or more TOML files
///
/// Files are merged in order, later files overriding earlier ones table by
/// table. Missing files are skipped so optional overrides can be listed.
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Loader reading the default file in the working directory
    pub fn new() -> Self {
        Self {
            config_paths: vec![PathBuf::from(paths::DEFAULT_CONFIG_FILE)],
        }
    }

    /// Create loader with custom paths, lowest precedence first
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { config_paths: paths }
    }

    /// Files merged by `load`, lowest precedence first
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Merge every existing file, then deserialize and validate the result
    pub fn load(&self) -> LedResult<ProjectConfig> {
        let mut merged = toml::Value::Table(toml::value::Table::new());
        let mut loaded = 0usize;

        for config_path in &self.config_paths {
            if !config_path.is_file() {
                debug!(path = %config_path.display(), "skipping missing configuration file");
                continue;
            }
            let overlay = load_config_file(config_path)?;
            merge_toml_values(&mut merged, overlay);
            loaded += 1;
        }

        if loaded == 0 {
            return Err(LedError::Configuration(format!(
                "none of the configuration files exist: {}",
                self.config_paths
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        let config: ProjectConfig = merged.try_into().map_err(|e: toml::de::Error| LedError::Parse {
            source_name: "merged configuration".to_string(),
            reason: e.to_string(),
        })?;
        check(config)
    }

    /// Load a single file, which must exist
    pub fn load_file<P: AsRef<Path>>(path: P) -> LedResult<ProjectConfig> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LedError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: ProjectConfig = toml::from_str(&content).map_err(|e| LedError::Parse {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        check(config)
    }

    /// Write a configuration out as TOML
    pub fn export_config<P: AsRef<Path>>(config: &ProjectConfig, path: P) -> LedResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| LedError::Configuration(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn check(config: ProjectConfig) -> LedResult<ProjectConfig> {
    match config.validate_consistency() {
        Ok(()) => Ok(config),
        Err(problems) => {
            warn!(count = problems.len(), "configuration rejected");
            Err(LedError::Configuration(problems.join("; ")))
        }
    }
}

fn load_config_file(path: &Path) -> LedResult<toml::Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| LedError::Parse {
        source_name: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_load_single_file() {
        let file = write_config(
            r#"
[model]
kind = "quarter_wave"
length = 25

[signal]
wavelength = 12.5
"#,
        );

        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert_eq!(config.model, ModelConfig::QuarterWave { length: 25 });
        assert_eq!(config.signal.wavelength, Some(12.5));
    }

    #[test]
    fn test_later_files_override() {
        let base = write_config(
            r#"
[model]
kind = "scrolling_window"
length = 30
direction = "left"

[signal]
amplitude = 2.0
"#,
        );
        let overlay = write_config(
            r#"
[model]
direction = "both"
input_origin = 10
"#,
        );

        let loader = ConfigLoader::with_paths(vec![
            base.path().to_path_buf(),
            PathBuf::from("/nonexistent/override.toml"),
            overlay.path().to_path_buf(),
        ]);
        let config = loader.load().unwrap();
        assert_eq!(
            config.model,
            ModelConfig::ScrollingWindow {
                length: 30,
                direction: Some("both".to_string()),
                input_origin: Some(10),
            }
        );
        assert_eq!(config.signal.amplitude, Some(2.0));
    }

    #[test]
    fn test_no_files_found() {
        let loader = ConfigLoader::with_paths(vec![PathBuf::from("/nonexistent/led.toml")]);
        assert!(matches!(loader.load(), Err(LedError::Configuration(_))));
        assert!(matches!(
            ConfigLoader::load_file("/nonexistent/led.toml"),
            Err(LedError::NotFound(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config(
            r#"
[model]
kind = "gauges"
length = 9
gauges = 4
"#,
        );
        let err = ConfigLoader::load_file(file.path()).unwrap_err();
        assert!(matches!(err, LedError::Configuration(ref message) if message.contains("gauge count")));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[model\nkind = ");
        assert!(matches!(ConfigLoader::load_file(file.path()), Err(LedError::Parse { .. })));
    }

    #[test]
    fn test_config_export() {
        let config = ProjectConfig::new(ModelConfig::Gauges { length: 12, gauges: Some(2) });
        let temp_file = NamedTempFile::new().unwrap();

        ConfigLoader::export_config(&config, temp_file.path()).unwrap();
        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("[model]"));
        assert_eq!(ConfigLoader::load_file(temp_file.path()).unwrap(), config);
    }
}
