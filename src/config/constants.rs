// src/config/constants.rs
//! Crate-wide default values and limits

/// Signal generator defaults
pub mod generators {
    /// Value of a constant generator built without one
    pub const DEFAULT_CONSTANT_VALUE: f64 = 0.0;

    /// Sine wavelength, in samples
    pub const DEFAULT_WAVELENGTH: f64 = 10.0;
    /// Sine peak value
    pub const DEFAULT_AMPLITUDE: f64 = 1.0;
    /// Sine phase, in radians
    pub const DEFAULT_PHASE: f64 = 0.0;

    /// Smallest wavelength a project configuration accepts
    pub const MIN_CONFIG_WAVELENGTH: f64 = 1.0;

    /// Repeater scaling applied before any log transform
    pub const DEFAULT_SCALING_FACTOR: f64 = 1.0;
}

/// Morse code timing, in samples
pub mod morse {
    /// Sample emitted while a dot or dash is keyed
    pub const ON: f64 = 1.0;
    /// Sample emitted during gaps
    pub const OFF: f64 = 0.0;

    /// "On" samples in a dot
    pub const DOT_ON_SAMPLES: usize = 1;
    /// "On" samples in a dash
    pub const DASH_ON_SAMPLES: usize = 3;
    /// Gap after every dot or dash
    pub const SYMBOL_GAP_SAMPLES: usize = 1;
    /// Gap appended after every character
    pub const CHARACTER_GAP_SAMPLES: usize = 3;
    /// A space character is encoded as this many "off" samples
    pub const WORD_SPACE_SAMPLES: usize = 6;
}

/// Display model geometry
pub mod models {
    /// Scrolling direction when none is given
    pub const DEFAULT_DIRECTION: &str = "left";

    /// Every gauge needs one interior pixel plus a border pixel on each side
    pub const MIN_PIXELS_PER_GAUGE: usize = 3;
    /// Dark pixels framing each gauge band
    pub const GAUGE_BORDER_PIXELS: usize = 2;
}

/// Default output locations
pub mod paths {
    /// Exported time series
    pub const DEFAULT_TIME_SERIES_FILE: &str = "time_series.json";
    /// Exported frame sequence
    pub const DEFAULT_FRAMES_FILE: &str = "frames.json";
    /// Project configuration read by `ConfigLoader::new`
    pub const DEFAULT_CONFIG_FILE: &str = "led.toml";
}
