//! LED-Core: signal generators and LED strip display models
//!
//! This library simulates how a strip of LEDs responds to a stream of
//! samples. It features:
//!
//! - Signal generators: constant, sine wave, Morse code and replayed signals
//! - Display models: quarter-wave antenna, scrolling window and gauges
//! - A signal aggregator loading several generators from a JSON signal set
//! - A simulation driver recording every sample and every frame
//! - TOML project configuration and JSON export of recordings
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use led_core::generators::{MorseCode, SineWave};
//! use led_core::models::{QuarterWave, ScrollingWindow};
//! use led_core::simulation::{run_model, Source};
//!
//! fn main() -> Result<(), led_core::LedError> {
//!     // A sine wave bouncing along a quarter-wave antenna for 100 ticks
//!     let mut antenna = QuarterWave::new(20)?;
//!     let mut wave = SineWave::new(Some(25.0), Some(1.0), None)?;
//!     let recording = run_model(&mut antenna, Source::Single(&mut wave), Some(100), None)?;
//!     println!("{} frames", recording.len());
//!
//!     // A Morse message scrolling until it has been sent
//!     let mut window = ScrollingWindow::new(30, Some("left"), None)?;
//!     let mut morse = MorseCode::from_text("sos")?;
//!     let recording = run_model(&mut window, Source::Single(&mut morse), None, None)?;
//!     led_core::export::save_frames(&recording, "frames.json")?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod error;
pub mod config;
pub mod utils;
pub mod generators;
pub mod models;
pub mod aggregator;
pub mod simulation;
pub mod export;

// Re-export commonly used types for convenience
pub use error::{LedError, LedResult};

pub use config::{ConfigLoader, ModelConfig, OutputConfig, ProjectConfig, SignalConfig};

pub use generators::{
    Constant, Generator, GeneratorKind, MorseCode, SignalGenerator, SignalRepeater, SineWave,
};

pub use models::{DisplayModel, Frame, Gauges, InputKind, QuarterWave, ScrollDirection, ScrollingWindow};

pub use aggregator::{SignalAggregator, SignalSpec};

pub use simulation::{run_model, Recording, RunState, Sample, Simulation, Source, StopReason};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "LED strip signal simulation library".to_string(),
        generators: GeneratorKind::ALL.iter().map(|kind| kind.name().to_string()).collect(),
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// Registered generator names
    pub generators: Vec<String>,
}
