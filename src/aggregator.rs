// src/aggregator.rs
//! Declarative composition of several signal generators
//!
//! A signal set is a JSON list of `{"generator": <name>, "arguments": [...]}`
//! objects. Every entry is validated before anything is built, and every
//! problem is reported together.

use crate::error::{LedError, LedResult};
use crate::generators::{
    Constant, Generator, GeneratorKind, MorseCode, SignalGenerator, SignalRepeater, SineWave,
};
use crate::utils::paths::resolve_signal_path;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One entry of a signal set: a generator name and its positional arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSpec {
    /// Generator name, long or short form
    pub generator: String,
    /// Positional construction arguments
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl SignalSpec {
    /// Entry for the named generator
    pub fn new(generator: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            generator: generator.into(),
            arguments,
        }
    }
}

/// Construction arguments that passed validation
#[derive(Debug, Clone, PartialEq)]
enum ResolvedSpec {
    Constant(Option<f64>),
    SineWave(Option<f64>, Option<f64>, Option<f64>),
    MorseCode(PathBuf),
    SignalRepeater(PathBuf, Option<f64>, bool),
}

impl ResolvedSpec {
    fn instantiate(&self) -> LedResult<Generator> {
        let generator = match self {
            ResolvedSpec::Constant(value) => Constant::new(*value)?.into(),
            ResolvedSpec::SineWave(wavelength, amplitude, phase) => {
                SineWave::new(*wavelength, *amplitude, *phase)?.into()
            }
            ResolvedSpec::MorseCode(path) => MorseCode::from_file(path)?.into(),
            ResolvedSpec::SignalRepeater(path, scaling_factor, logarithmic) => {
                SignalRepeater::from_file(path, *scaling_factor, *logarithmic)?.into()
            }
        };
        Ok(generator)
    }
}

/// Several generators advanced together, exposing one value per generator
#[derive(Debug, Clone)]
pub struct SignalAggregator {
    specs: Vec<SignalSpec>,
    generators: Vec<Generator>,
    finite: Vec<usize>,
    current_values: Vec<Option<f64>>,
}

impl SignalAggregator {
    /// Load a signal set from a JSON file
    ///
    /// File arguments without a path separator are resolved inside
    /// `project_folder`.
    pub fn from_file(signal_file: impl AsRef<Path>, project_folder: impl AsRef<Path>) -> LedResult<Self> {
        let signal_file = signal_file.as_ref();
        let source_name = signal_file.display().to_string();
        if !signal_file.is_file() {
            return Err(LedError::NotFound(signal_file.to_path_buf()));
        }

        let content = std::fs::read_to_string(signal_file)?;
        let document: Value = serde_json::from_str(&content).map_err(|e| LedError::Parse {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;

        let entries = match document {
            Value::Array(entries) if !entries.is_empty() => entries,
            Value::Array(_) => {
                return Err(signal_set_error(&source_name, vec!["must contain at least one signal".to_string()]));
            }
            other => {
                return Err(signal_set_error(
                    &source_name,
                    vec![format!("must contain a JSON list, not {}", json_type_name(&other))],
                ));
            }
        };

        let mut problems = Vec::new();
        let mut specs = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match parse_entry(index, entry) {
                Ok(spec) => specs.push((index, spec)),
                Err(mut entry_problems) => problems.append(&mut entry_problems),
            }
        }

        Self::build(&source_name, specs, project_folder.as_ref(), problems)
    }

    /// Build from already-parsed specs
    pub fn from_specs(specs: Vec<SignalSpec>, project_folder: impl AsRef<Path>) -> LedResult<Self> {
        if specs.is_empty() {
            return Err(signal_set_error("signal specs", vec!["must contain at least one signal".to_string()]));
        }
        let numbered = specs.into_iter().enumerate().collect();
        Self::build("signal specs", numbered, project_folder.as_ref(), Vec::new())
    }

    fn build(
        source_name: &str,
        numbered: Vec<(usize, SignalSpec)>,
        project_folder: &Path,
        mut problems: Vec<String>,
    ) -> LedResult<Self> {
        let mut resolved = Vec::with_capacity(numbered.len());
        for (index, spec) in &numbered {
            match resolve_spec(*index, spec, project_folder) {
                Ok(resolved_spec) => resolved.push((*index, resolved_spec)),
                Err(mut spec_problems) => problems.append(&mut spec_problems),
            }
        }

        if !problems.is_empty() {
            return Err(signal_set_error(source_name, problems));
        }

        let mut generators = Vec::with_capacity(resolved.len());
        for (index, spec) in &resolved {
            match spec.instantiate() {
                Ok(generator) => generators.push(generator),
                Err(e) => problems.push(format!("signal #{}: {}", index + 1, e)),
            }
        }

        if !problems.is_empty() {
            return Err(signal_set_error(source_name, problems));
        }

        let finite = generators
            .iter()
            .enumerate()
            .filter(|(_, generator)| generator.is_finite())
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        let current_values = generators.iter().map(|generator| generator.current()).collect();

        info!(
            source = source_name,
            generators = generators.len(),
            finite = finite.len(),
            "signal aggregator ready"
        );
        Ok(Self {
            specs: numbered.into_iter().map(|(_, spec)| spec).collect(),
            generators,
            finite,
            current_values,
        })
    }

    /// Pull one sample from every generator, in spec order
    pub fn advance(&mut self) -> &[Option<f64>] {
        for (slot, generator) in self.current_values.iter_mut().zip(self.generators.iter_mut()) {
            *slot = generator.next_value();
        }
        &self.current_values
    }

    /// Latest value of every generator
    pub fn current_values(&self) -> &[Option<f64>] {
        &self.current_values
    }

    /// Generators in signal-set order
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// Entries the generators were built from
    pub fn specs(&self) -> &[SignalSpec] {
        &self.specs
    }

    /// Number of generators
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Never true for a built aggregator
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generators that run out after a known number of pulls
    pub fn finite_signals(&self) -> impl Iterator<Item = &Generator> {
        self.finite.iter().map(move |&index| &self.generators[index])
    }

    /// Whether any generator is finite
    pub fn has_finite(&self) -> bool {
        !self.finite.is_empty()
    }

    /// True once every finite generator has signalled its end
    ///
    /// Always false for a set with no finite generators.
    pub fn is_finished(&self) -> bool {
        self.has_finite() && self.finite_signals().all(|generator| generator.end_of_signal())
    }
}

fn signal_set_error(source_name: &str, problems: Vec<String>) -> LedError {
    warn!(source = source_name, problems = problems.len(), "signal set rejected");
    LedError::SignalSet {
        source_name: source_name.to_string(),
        problems,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Check the shape of one raw entry of a signal-set file
fn parse_entry(index: usize, entry: Value) -> Result<SignalSpec, Vec<String>> {
    let label = format!("signal #{}", index + 1);
    let mut object = match entry {
        Value::Object(object) => object,
        other => return Err(vec![format!("{} must be an object, not {}", label, json_type_name(&other))]),
    };

    let mut problems = Vec::new();
    let generator = match object.remove("generator") {
        Some(Value::String(name)) => Some(name),
        Some(other) => {
            problems.push(format!(
                "generator attribute for {} must be a string, not {}",
                label,
                json_type_name(&other)
            ));
            None
        }
        None => {
            problems.push(format!("{} must have a \"generator\" attribute", label));
            None
        }
    };
    let arguments = match object.remove("arguments") {
        Some(Value::Array(arguments)) => Some(arguments),
        Some(other) => {
            problems.push(format!(
                "arguments attribute for {} must be a list, not {}",
                label,
                json_type_name(&other)
            ));
            None
        }
        None => {
            problems.push(format!("{} must have an \"arguments\" list attribute", label));
            None
        }
    };

    match (generator, arguments) {
        (Some(generator), Some(arguments)) if problems.is_empty() => Ok(SignalSpec { generator, arguments }),
        _ => Err(problems),
    }
}

/// Validate a spec against its generator kind without building anything
fn resolve_spec(index: usize, spec: &SignalSpec, project_folder: &Path) -> Result<ResolvedSpec, Vec<String>> {
    let label = format!("signal #{}", index + 1);

    if spec.generator.is_empty() {
        return Err(vec![format!("generator attribute for {} cannot be empty", label)]);
    }
    let kind: GeneratorKind = spec
        .generator
        .parse()
        .map_err(|e: LedError| vec![format!("{}: {}", label, e)])?;

    let arguments = &spec.arguments;
    let mut problems = Vec::new();
    if arguments.len() > kind.max_arguments() {
        problems.push(format!(
            "{} in {} takes at most {} argument(s), got {}",
            kind,
            label,
            kind.max_arguments(),
            arguments.len()
        ));
    }

    let mut number = |position: usize, name: &str| -> Option<f64> {
        match arguments.get(position) {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => {
                problems.push(format!(
                    "{} in {}: argument {} must be a number, not {}",
                    kind,
                    label,
                    name,
                    json_type_name(other)
                ));
                None
            }
        }
    };

    let resolved = match kind {
        GeneratorKind::Constant => ResolvedSpec::Constant(number(0, "value")),
        GeneratorKind::SineWave => {
            let wavelength = number(0, "wavelength");
            let amplitude = number(1, "amplitude");
            let phase = number(2, "phase");
            ResolvedSpec::SineWave(wavelength, amplitude, phase)
        }
        GeneratorKind::MorseCode => {
            match resolve_file_argument(kind, &label, arguments.first(), project_folder) {
                Ok(path) => ResolvedSpec::MorseCode(path),
                Err(problem) => {
                    problems.push(problem);
                    ResolvedSpec::MorseCode(PathBuf::new())
                }
            }
        }
        GeneratorKind::SignalRepeater => {
            let scaling_factor = number(1, "scaling_factor");
            let logarithmic = match arguments.get(2) {
                None | Some(Value::Null) => false,
                Some(Value::Bool(flag)) => *flag,
                Some(other) => {
                    problems.push(format!(
                        "{} in {}: argument logarithmic must be a boolean, not {}",
                        kind,
                        label,
                        json_type_name(other)
                    ));
                    false
                }
            };
            let path = match resolve_file_argument(kind, &label, arguments.first(), project_folder) {
                Ok(path) => path,
                Err(problem) => {
                    problems.push(problem);
                    PathBuf::new()
                }
            };
            ResolvedSpec::SignalRepeater(path, scaling_factor, logarithmic)
        }
    };

    if problems.is_empty() {
        debug!(generator = %kind, signal = index + 1, "validated signal spec");
        Ok(resolved)
    } else {
        Err(problems)
    }
}

fn resolve_file_argument(
    kind: GeneratorKind,
    label: &str,
    argument: Option<&Value>,
    project_folder: &Path,
) -> Result<PathBuf, String> {
    match argument {
        None => Err(format!("{} in {} must have a first argument that is the path to its data file", kind, label)),
        Some(Value::String(name)) if name.is_empty() => Err(format!(
            "{} in {} must have a first argument that is a file path, not an empty string",
            kind, label
        )),
        Some(Value::String(name)) => {
            let path = resolve_signal_path(name, project_folder);
            if path.is_file() {
                Ok(path)
            } else {
                Err(format!("{} in {}: {} is not a valid file path", kind, label, path.display()))
            }
        }
        Some(other) => Err(format!(
            "{} in {} must have a first argument that is a string, not {}",
            kind,
            label,
            json_type_name(other)
        )),
    }
}
