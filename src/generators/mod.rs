// src/generators/mod.rs
//! Signal generators that produce one numeric sample per tick
//!
//! Every generator keeps a [`GeneratorState`]: a tick counter, the last sample
//! pulled and, for finite generators, an end-of-signal marker. Pulling past
//! the end of a finite generator is not an error; it yields `None` and sets
//! the marker.

pub mod constant;
pub mod sine;
pub mod morse;
pub mod repeater;

pub use constant::Constant;
pub use sine::SineWave;
pub use morse::MorseCode;
pub use repeater::SignalRepeater;

use crate::error::LedError;
use std::fmt;
use std::str::FromStr;

/// Common contract for every signal generator
pub trait SignalGenerator {
    /// Pull the next sample, advancing the counter by exactly one
    fn next_value(&mut self) -> Option<f64>;

    /// Last sample pulled, `None` before the first pull
    fn current(&self) -> Option<f64>;

    /// Number of samples pulled so far
    fn counter(&self) -> u64;

    /// Whether this generator runs out after a known number of pulls
    fn is_finite(&self) -> bool {
        false
    }

    /// Set once a finite generator has been pulled past its last sample
    fn end_of_signal(&self) -> bool {
        false
    }
}

/// Mutable per-generator bookkeeping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorState {
    counter: u64,
    current_value: Option<f64>,
    end_of_signal: bool,
}

impl GeneratorState {
    /// Fresh state: no pulls, no current value
    pub fn new() -> Self {
        Self::default()
    }

    /// Pulls so far
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Value returned by the latest pull
    pub fn current(&self) -> Option<f64> {
        self.current_value
    }

    /// Set once a pull ran past the end of the stream
    pub fn end_of_signal(&self) -> bool {
        self.end_of_signal
    }

    /// Store the sample for this tick and advance the counter
    pub fn record(&mut self, value: Option<f64>) -> Option<f64> {
        self.current_value = value;
        self.counter += 1;
        value
    }

    /// Pull the sample at the current counter from a fixed stream
    pub fn pull_from(&mut self, stream: &[f64]) -> Option<f64> {
        let value = usize::try_from(self.counter)
            .ok()
            .and_then(|index| stream.get(index))
            .copied();
        if value.is_none() {
            self.end_of_signal = true;
        }
        self.record(value)
    }
}

/// Closed registry of generator kinds accepted by declarative signal sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// Same value on every pull
    Constant,
    /// Sampled sine wave
    SineWave,
    /// Message keyed as Morse code
    MorseCode,
    /// Replay of a stored signal
    SignalRepeater,
}

impl GeneratorKind {
    /// Every registered kind
    pub const ALL: [GeneratorKind; 4] = [
        GeneratorKind::Constant,
        GeneratorKind::SineWave,
        GeneratorKind::MorseCode,
        GeneratorKind::SignalRepeater,
    ];

    /// Name used in signal-set files
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Constant => "ConstantGenerator",
            GeneratorKind::SineWave => "SineWaveGenerator",
            GeneratorKind::MorseCode => "MorseCodeGenerator",
            GeneratorKind::SignalRepeater => "SignalRepeater",
        }
    }

    /// Kinds whose first argument is a data file
    pub fn takes_file(&self) -> bool {
        matches!(self, GeneratorKind::MorseCode | GeneratorKind::SignalRepeater)
    }

    /// Kinds that run out of samples
    pub fn is_finite(&self) -> bool {
        self.takes_file()
    }

    /// Number of positional construction arguments
    pub fn max_arguments(&self) -> usize {
        match self {
            GeneratorKind::Constant => 1,
            GeneratorKind::SineWave => 3,
            GeneratorKind::MorseCode => 1,
            GeneratorKind::SignalRepeater => 3,
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ConstantGenerator" | "Constant" => Ok(GeneratorKind::Constant),
            "SineWaveGenerator" | "SineWave" => Ok(GeneratorKind::SineWave),
            "MorseCodeGenerator" | "MorseCode" => Ok(GeneratorKind::MorseCode),
            "SignalRepeater" => Ok(GeneratorKind::SignalRepeater),
            other => Err(LedError::validation(
                "generator",
                format!(
                    "\"{}\" does not match any known generator ({})",
                    other,
                    GeneratorKind::ALL.map(|kind| kind.name()).join(", ")
                ),
            )),
        }
    }
}

/// Any concrete generator, dispatched without runtime type inspection
#[derive(Debug, Clone)]
pub enum Generator {
    /// Constant
    Constant(Constant),
    /// Sine wave
    SineWave(SineWave),
    /// Morse code
    MorseCode(MorseCode),
    /// Signal repeater
    SignalRepeater(SignalRepeater),
}

impl Generator {
    /// Registry entry for this generator
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Constant(_) => GeneratorKind::Constant,
            Generator::SineWave(_) => GeneratorKind::SineWave,
            Generator::MorseCode(_) => GeneratorKind::MorseCode,
            Generator::SignalRepeater(_) => GeneratorKind::SignalRepeater,
        }
    }

    fn inner(&self) -> &dyn SignalGenerator {
        match self {
            Generator::Constant(g) => g,
            Generator::SineWave(g) => g,
            Generator::MorseCode(g) => g,
            Generator::SignalRepeater(g) => g,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SignalGenerator {
        match self {
            Generator::Constant(g) => g,
            Generator::SineWave(g) => g,
            Generator::MorseCode(g) => g,
            Generator::SignalRepeater(g) => g,
        }
    }
}

impl SignalGenerator for Generator {
    fn next_value(&mut self) -> Option<f64> {
        self.inner_mut().next_value()
    }

    fn current(&self) -> Option<f64> {
        self.inner().current()
    }

    fn counter(&self) -> u64 {
        self.inner().counter()
    }

    fn is_finite(&self) -> bool {
        self.inner().is_finite()
    }

    fn end_of_signal(&self) -> bool {
        self.inner().end_of_signal()
    }
}

impl From<Constant> for Generator {
    fn from(g: Constant) -> Self {
        Generator::Constant(g)
    }
}

impl From<SineWave> for Generator {
    fn from(g: SineWave) -> Self {
        Generator::SineWave(g)
    }
}

impl From<MorseCode> for Generator {
    fn from(g: MorseCode) -> Self {
        Generator::MorseCode(g)
    }
}

impl From<SignalRepeater> for Generator {
    fn from(g: SignalRepeater) -> Self {
        Generator::SignalRepeater(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_starts_empty() {
        let state = GeneratorState::new();
        assert_eq!(state.counter(), 0);
        assert_eq!(state.current(), None);
        assert!(!state.end_of_signal());
    }

    #[test]
    fn test_pull_from_stream() {
        let mut state = GeneratorState::new();
        let stream = [1.0, 2.0];

        assert_eq!(state.pull_from(&stream), Some(1.0));
        assert_eq!(state.pull_from(&stream), Some(2.0));
        assert!(!state.end_of_signal());

        assert_eq!(state.pull_from(&stream), None);
        assert!(state.end_of_signal());
        assert_eq!(state.counter(), 3);
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in GeneratorKind::ALL {
            assert_eq!(kind.name().parse::<GeneratorKind>().unwrap(), kind);
        }
        assert_eq!("SineWave".parse::<GeneratorKind>().unwrap(), GeneratorKind::SineWave);
    }

    #[test]
    fn test_unknown_kind() {
        let err = "SawtoothGenerator".parse::<GeneratorKind>().unwrap_err();
        assert!(err.to_string().contains("SawtoothGenerator"));
    }

    #[test]
    fn test_enum_dispatch() {
        let mut generator: Generator = Constant::new(Some(2.5)).unwrap().into();
        assert_eq!(generator.kind(), GeneratorKind::Constant);
        assert_eq!(generator.next_value(), Some(2.5));
        assert_eq!(generator.counter(), 1);
        assert!(!generator.is_finite());
    }
}
