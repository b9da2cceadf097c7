// src/simulation/source.rs
//! Where a simulation run pulls its samples from

use super::Sample;
use crate::aggregator::SignalAggregator;
use crate::generators::SignalGenerator;

/// Sample source for one driver run
pub enum Source<'a> {
    /// One generator, fed as a scalar
    Single(&'a mut dyn SignalGenerator),
    /// Several generators summed into one scalar per tick
    Summed(Vec<&'a mut dyn SignalGenerator>),
    /// Every aggregator channel, fed whole as a vector
    Aggregate(&'a mut SignalAggregator),
}

impl<'a> Source<'a> {
    /// Pull the next sample from every generator behind this source
    ///
    /// Summed generators that are absent contribute nothing; when all of them
    /// are absent the sample is absent.
    pub fn pull(&mut self) -> Sample {
        match self {
            Source::Single(generator) => Sample::Scalar(generator.next_value()),
            Source::Summed(generators) => {
                let total = generators
                    .iter_mut()
                    .filter_map(|generator| generator.next_value())
                    .fold(None, |sum: Option<f64>, value| Some(sum.unwrap_or(0.0) + value));
                Sample::Scalar(total)
            }
            Source::Aggregate(aggregator) => Sample::Vector(aggregator.advance().to_vec()),
        }
    }

    /// Whether at least one generator is finite
    pub fn has_finite(&self) -> bool {
        match self {
            Source::Single(generator) => generator.is_finite(),
            Source::Summed(generators) => generators.iter().any(|generator| generator.is_finite()),
            Source::Aggregate(aggregator) => aggregator.has_finite(),
        }
    }

    /// True once every finite generator has signalled its end
    pub fn is_exhausted(&self) -> bool {
        match self {
            Source::Single(generator) => generator.is_finite() && generator.end_of_signal(),
            Source::Summed(generators) => {
                self.has_finite()
                    && generators
                        .iter()
                        .filter(|generator| generator.is_finite())
                        .all(|generator| generator.end_of_signal())
            }
            Source::Aggregate(aggregator) => aggregator.is_finished(),
        }
    }

    /// Whether samples are vectors rather than scalars
    pub fn is_vector(&self) -> bool {
        matches!(self, Source::Aggregate(_))
    }
}

impl<'a> From<&'a mut SignalAggregator> for Source<'a> {
    fn from(aggregator: &'a mut SignalAggregator) -> Self {
        Source::Aggregate(aggregator)
    }
}
