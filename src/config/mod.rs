// src/config/mod.rs
//! Project configuration: which model to build, how to drive it, where to write

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::ConfigLoader;

use crate::error::{LedError, LedResult};
use crate::generators::{MorseCode, SignalRepeater, SineWave};
use crate::models::{DisplayModel, Gauges, QuarterWave, ScrollDirection, ScrollingWindow};
use crate::utils::paths::resolve_signal_path;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration for one project run
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Display model to simulate
    pub model: ModelConfig,

    /// Signal source parameters
    #[serde(default)]
    pub signal: SignalConfig,

    /// Export destinations
    #[serde(default)]
    pub output: OutputConfig,
}

/// Display model geometry
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    /// Quarter-wave antenna
    QuarterWave {
        /// Pixels along the antenna
        length: usize,
    },
    /// Scrolling window
    ScrollingWindow {
        /// Pixels in the window
        length: usize,
        /// "left", "right" or "both", case-insensitive
        #[serde(default)]
        direction: Option<String>,
        /// Insertion pixel for "both"
        #[serde(default)]
        input_origin: Option<usize>,
    },
    /// Gauge bands fed by a signal set
    Gauges {
        /// Pixels shared by every band
        length: usize,
        /// Defaults to the number of aggregated signals
        #[serde(default)]
        gauges: Option<usize>,
    },
}

/// Parameters for the project's signal source
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SignalConfig {
    /// Sine wavelength, in samples
    #[serde(default)]
    pub wavelength: Option<f64>,

    /// Sine peak value
    #[serde(default)]
    pub amplitude: Option<f64>,

    /// Sine phase, in radians
    #[serde(default)]
    pub phase: Option<f64>,

    /// Message, replay signal or signal set, depending on the project
    #[serde(default)]
    pub signal_file: Option<String>,

    /// Repeater scaling
    #[serde(default)]
    pub scaling_factor: Option<f64>,

    /// Log-compress the replayed signal
    #[serde(default)]
    pub logarithmic: bool,

    /// Folder searched for signal files given without a path
    #[serde(default)]
    pub project_folder: PathBuf,
}

/// Output destinations
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Where the time series is written
    #[serde(default = "defaults::time_series_file")]
    pub time_series_file: PathBuf,

    /// Where the frames are written
    #[serde(default = "defaults::frames_file")]
    pub frames_file: PathBuf,
}

mod defaults {
    use crate::config::constants::paths;
    use std::path::PathBuf;

    pub fn time_series_file() -> PathBuf { PathBuf::from(paths::DEFAULT_TIME_SERIES_FILE) }
    pub fn frames_file() -> PathBuf { PathBuf::from(paths::DEFAULT_FRAMES_FILE) }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            time_series_file: defaults::time_series_file(),
            frames_file: defaults::frames_file(),
        }
    }
}

impl ModelConfig {
    /// Configured pixel count
    pub fn length(&self) -> usize {
        match self {
            ModelConfig::QuarterWave { length }
            | ModelConfig::ScrollingWindow { length, .. }
            | ModelConfig::Gauges { length, .. } => *length,
        }
    }

    /// Build the configured model
    ///
    /// `channels` supplies the gauge count when the configuration leaves it out.
    pub fn build(&self, channels: Option<usize>) -> LedResult<Box<dyn DisplayModel>> {
        let model: Box<dyn DisplayModel> = match self {
            ModelConfig::QuarterWave { length } => Box::new(QuarterWave::new(*length)?),
            ModelConfig::ScrollingWindow { length, direction, input_origin } => {
                Box::new(ScrollingWindow::new(*length, direction.as_deref(), *input_origin)?)
            }
            ModelConfig::Gauges { length, gauges } => {
                let gauges = gauges.or(channels).ok_or_else(|| {
                    LedError::Configuration("gauge count is neither configured nor known from the signal set".to_string())
                })?;
                Box::new(Gauges::new(*length, gauges)?)
            }
        };
        Ok(model)
    }
}

impl SignalConfig {
    /// Signal file resolved against the project folder
    pub fn resolved_signal_file(&self) -> Option<PathBuf> {
        self.signal_file
            .as_deref()
            .map(|name| resolve_signal_path(name, &self.project_folder))
    }

    fn required_signal_file(&self) -> LedResult<PathBuf> {
        self.resolved_signal_file()
            .ok_or_else(|| LedError::Configuration("signal_file is not configured".to_string()))
    }

    /// Sine wave from the configured parameters
    pub fn sine_wave(&self) -> LedResult<SineWave> {
        SineWave::new(self.wavelength, self.amplitude, self.phase)
    }

    /// Morse generator for the configured message file
    pub fn morse_code(&self) -> LedResult<MorseCode> {
        MorseCode::from_file(self.required_signal_file()?)
    }

    /// Repeater for the configured signal file
    pub fn repeater(&self) -> LedResult<SignalRepeater> {
        SignalRepeater::from_file(self.required_signal_file()?, self.scaling_factor, self.logarithmic)
    }
}

impl ProjectConfig {
    /// Configuration with default signal and output sections
    pub fn new(model: ModelConfig) -> Self {
        Self {
            model,
            signal: SignalConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Check the whole configuration, reporting every problem found
    pub fn validate_consistency(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let length = self.model.length();
        if length == 0 {
            errors.push("model length must be a positive integer, not 0".to_string());
        }

        match &self.model {
            ModelConfig::ScrollingWindow { direction, input_origin, .. } => {
                let parsed = direction.as_deref().map(str::parse::<ScrollDirection>);
                match parsed {
                    Some(Err(e)) => errors.push(e.to_string()),
                    Some(Ok(ScrollDirection::Both)) => {
                        if let Some(origin) = input_origin {
                            if *origin >= length {
                                errors.push(format!(
                                    "input_origin must be less than the model length ({}), not {}",
                                    length, origin
                                ));
                            }
                        }
                    }
                    _ => {}
                }
            }
            ModelConfig::Gauges { gauges: Some(gauges), .. } => {
                let max_gauges = length / models::MIN_PIXELS_PER_GAUGE;
                if *gauges == 0 || *gauges > max_gauges {
                    errors.push(format!(
                        "gauge count must be between 1 and one-third of the model length ({}), not {}",
                        max_gauges, gauges
                    ));
                }
            }
            _ => {}
        }

        if let Some(wavelength) = self.signal.wavelength {
            if wavelength < generators::MIN_CONFIG_WAVELENGTH {
                errors.push(format!(
                    "wavelength must be {} or greater, not {}",
                    generators::MIN_CONFIG_WAVELENGTH,
                    wavelength
                ));
            }
        }

        if matches!(&self.signal.signal_file, Some(name) if name.is_empty()) {
            errors.push("signal_file cannot be an empty string".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_config() -> ProjectConfig {
        ProjectConfig::new(ModelConfig::ScrollingWindow {
            length: 20,
            direction: Some("both".to_string()),
            input_origin: Some(4),
        })
    }

    #[test]
    fn test_default_outputs() {
        let config = window_config();
        assert_eq!(config.output.time_series_file, PathBuf::from(paths::DEFAULT_TIME_SERIES_FILE));
        assert!(config.validate_consistency().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = window_config();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: ProjectConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_parse_from_toml() {
        let config: ProjectConfig = toml::from_str(
            r#"
            [model]
            kind = "gauges"
            length = 30

            [signal]
            signal_file = "alarms.json"
            project_folder = "projects/gauges"
            "#,
        )
        .unwrap();

        assert_eq!(config.model, ModelConfig::Gauges { length: 30, gauges: None });
        assert_eq!(
            config.signal.resolved_signal_file(),
            Some(PathBuf::from("projects/gauges/alarms.json"))
        );
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_validation_collects_all_problems() {
        let mut config = ProjectConfig::new(ModelConfig::Gauges { length: 0, gauges: Some(2) });
        config.signal.wavelength = Some(0.5);
        config.signal.signal_file = Some(String::new());

        let errors = config.validate_consistency().unwrap_err();
        assert_eq!(errors.len(), 4, "{:?}", errors);
    }

    #[test]
    fn test_invalid_direction() {
        let config = ProjectConfig::new(ModelConfig::ScrollingWindow {
            length: 10,
            direction: Some("sideways".to_string()),
            input_origin: None,
        });
        assert_eq!(config.validate_consistency().unwrap_err().len(), 1);
    }

    #[test]
    fn test_build_models() {
        let model = window_config().model.build(None).unwrap();
        assert_eq!(model.length(), 20);

        let gauges = ModelConfig::Gauges { length: 12, gauges: None };
        assert_eq!(gauges.build(Some(3)).unwrap().snapshot().len(), 12);
        assert!(matches!(gauges.build(None), Err(LedError::Configuration(_))));

        assert!(ModelConfig::QuarterWave { length: 0 }.build(None).is_err());
    }

    #[test]
    fn test_signal_builders() {
        let mut signal = SignalConfig {
            wavelength: Some(20.0),
            amplitude: Some(3.0),
            ..SignalConfig::default()
        };
        let sine = signal.sine_wave().unwrap();
        assert_eq!(sine.wavelength(), 20.0);
        assert!(matches!(signal.morse_code(), Err(LedError::Configuration(_))));

        signal.signal_file = Some("missing.txt".to_string());
        assert!(matches!(signal.morse_code(), Err(LedError::NotFound(_))));
    }
}
