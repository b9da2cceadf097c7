// src/simulation/mod.rs
//! Simulation driver: steps time, feeds a model and records the result

pub mod recording;
pub mod source;
pub mod driver;

pub use recording::{Recording, Sample};
pub use source::Source;
pub use driver::{run_model, RunState, Simulation, StopReason};
