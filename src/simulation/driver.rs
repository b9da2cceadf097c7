// src/simulation/driver.rs
//! Tick loop feeding a source into a display model

use super::{Recording, Source};
use crate::error::{LedError, LedResult};
use crate::models::{DisplayModel, Frame, InputKind};
use tracing::{debug, info, warn};

/// Lifecycle of a [`Simulation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, no tick yet
    Ready,
    /// At least one tick done
    Stepping,
    /// Finished; further steps do nothing
    Stopped,
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The explicit sample budget was used up
    BudgetReached,
    /// Every finite generator signalled its end
    SourceExhausted,
    /// The model rejected a sample
    Failed,
}

type FrameObserver<'m> = Box<dyn FnMut(usize, &Frame) + 'm>;

/// One driver run over a model and a source
///
/// With a budget the run lasts exactly that many ticks, whatever the source
/// does. Without one it lasts until every finite generator has ended; the
/// pull that reveals the end is not recorded.
pub struct Simulation<'m, 's> {
    model: &'m mut dyn DisplayModel,
    source: Source<'s>,
    budget: Option<usize>,
    recording: Recording,
    ticks: usize,
    state: RunState,
    stop_reason: Option<StopReason>,
    observer: Option<FrameObserver<'m>>,
}

impl<'m, 's> Simulation<'m, 's> {
    /// Prepare a run, extending `recording` when one is given
    ///
    /// Rejects runs that could never stop and sources whose samples the model
    /// cannot take, before any tick happens.
    pub fn new(
        model: &'m mut dyn DisplayModel,
        source: Source<'s>,
        budget: Option<usize>,
        recording: Option<Recording>,
    ) -> LedResult<Self> {
        if budget.is_none() && !source.has_finite() {
            return Err(LedError::Configuration(
                "an unbounded run needs at least one finite source, otherwise it never ends".to_string(),
            ));
        }
        if source.is_vector() && model.input_kind() == InputKind::Scalar {
            return Err(LedError::Configuration(
                "an aggregated source produces one value per channel but the model takes one value per tick"
                    .to_string(),
            ));
        }

        let recording = recording.unwrap_or_default();
        debug!(
            length = model.length(),
            ?budget,
            recorded = recording.len(),
            "simulation ready"
        );
        Ok(Self {
            model,
            source,
            budget,
            recording,
            ticks: 0,
            state: RunState::Ready,
            stop_reason: None,
            observer: None,
        })
    }

    /// Receive every new frame as it is recorded, e.g. to refresh a plot
    pub fn on_frame(mut self, observer: impl FnMut(usize, &Frame) + 'm) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Set once the run has stopped
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Ticks performed by this run, not counting an extended recording
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Everything recorded so far
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    fn stop(&mut self, reason: StopReason) -> RunState {
        if self.state != RunState::Stopped {
            info!(ticks = self.ticks, recorded = self.recording.len(), ?reason, "simulation stopped");
        }
        self.state = RunState::Stopped;
        self.stop_reason = Some(reason);
        self.state
    }

    fn budget_spent(&self) -> bool {
        self.budget.is_some_and(|budget| self.ticks >= budget)
    }

    /// Advance by one tick
    pub fn step(&mut self) -> LedResult<RunState> {
        if self.state == RunState::Stopped {
            return Ok(self.state);
        }
        if self.budget_spent() {
            return Ok(self.stop(StopReason::BudgetReached));
        }
        self.state = RunState::Stepping;

        let sample = self.source.pull();
        if self.budget.is_none() && self.source.is_exhausted() {
            return Ok(self.stop(StopReason::SourceExhausted));
        }

        if let Err(e) = self.model.ingest(&sample) {
            self.stop(StopReason::Failed);
            return Err(e);
        }

        let frame = self.model.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer(self.recording.len(), &frame);
        }
        self.recording.push(sample, frame);
        self.ticks += 1;

        if self.budget_spent() {
            self.stop(StopReason::BudgetReached);
        }
        Ok(self.state)
    }

    /// Step until stopped and hand back the recording
    ///
    /// A failing tick ends the run with [`LedError::Interrupted`], which still
    /// holds the recording, including any entries the run was asked to extend.
    pub fn run(mut self) -> LedResult<Recording> {
        info!(budget = ?self.budget, recorded = self.recording.len(), "simulation started");
        loop {
            match self.step() {
                Ok(RunState::Stopped) => return Ok(self.recording),
                Ok(_) => {}
                Err(error) => {
                    warn!(tick = self.ticks, recorded = self.recording.len(), %error, "simulation interrupted");
                    return Err(LedError::Interrupted {
                        tick: self.ticks,
                        source: Box::new(error),
                        recording: Box::new(self.recording),
                    });
                }
            }
        }
    }

    /// Stop early and keep what has been recorded so far
    pub fn finish(self) -> Recording {
        self.recording
    }
}

/// Run a model against a source and return the (possibly extended) recording
pub fn run_model(
    model: &mut dyn DisplayModel,
    source: Source<'_>,
    budget: Option<usize>,
    recording: Option<Recording>,
) -> LedResult<Recording> {
    Simulation::new(model, source, budget, recording)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Constant, MorseCode, SignalGenerator, SignalRepeater};
    use crate::models::{Gauges, QuarterWave, ScrollingWindow};
    use crate::simulation::Sample;

    #[test]
    fn test_budget_runs_exact_ticks() {
        let mut window = ScrollingWindow::new(4, None, None).unwrap();
        let mut source = Constant::new(Some(1.0)).unwrap();
        let recording = run_model(&mut window, Source::Single(&mut source), Some(6), None).unwrap();
        assert_eq!(recording.len(), 6);
        assert_eq!(recording.frames().len(), 6);
        assert_eq!(source.counter(), 6);
    }

    #[test]
    fn test_budget_outlasts_finite_source() {
        let mut window = ScrollingWindow::new(4, None, None).unwrap();
        let mut source = SignalRepeater::from_values(vec![5.0], None, false).unwrap();
        let recording = run_model(&mut window, Source::Single(&mut source), Some(3), None).unwrap();
        assert_eq!(
            recording.time_series(),
            &[Sample::Scalar(Some(5.0)), Sample::Scalar(None), Sample::Scalar(None)]
        );
        assert_eq!(recording.frames()[2], Frame::from_reals(&[0.0, 5.0, 0.0, 0.0]));
    }

    #[test]
    fn test_unbounded_stops_with_finite_source() {
        let mut window = ScrollingWindow::new(8, Some("right"), None).unwrap();
        let mut source = MorseCode::from_text("et").unwrap();
        let expected = source.stream_length();

        let mut simulation = Simulation::new(&mut window, Source::Single(&mut source), None, None).unwrap();
        assert_eq!(simulation.state(), RunState::Ready);
        while simulation.step().unwrap() != RunState::Stopped {}
        assert_eq!(simulation.stop_reason(), Some(StopReason::SourceExhausted));
        assert_eq!(simulation.ticks(), expected);
        assert_eq!(simulation.recording().len(), expected);

        // stepping a stopped run does nothing
        assert_eq!(simulation.step().unwrap(), RunState::Stopped);
        assert_eq!(simulation.finish().len(), expected);
    }

    #[test]
    fn test_unbounded_without_finite_source_is_rejected() {
        let mut antenna = QuarterWave::new(4).unwrap();
        let mut source = Constant::zero();
        {
            let result = Simulation::new(&mut antenna, Source::Single(&mut source), None, None);
            assert!(matches!(result, Err(LedError::Configuration(_))));
        }
        assert_eq!(source.counter(), 0);
    }

    #[test]
    fn test_zero_budget() {
        let mut antenna = QuarterWave::new(4).unwrap();
        let mut source = Constant::zero();
        let recording = run_model(&mut antenna, Source::Single(&mut source), Some(0), None).unwrap();
        assert!(recording.is_empty());
        assert_eq!(source.counter(), 0);
    }

    #[test]
    fn test_chained_runs_extend_recording() {
        let mut antenna = QuarterWave::new(3).unwrap();
        let mut pulse = SignalRepeater::from_values(vec![1.0], None, false).unwrap();
        let mut silence = Constant::zero();

        let recording = run_model(&mut antenna, Source::Single(&mut pulse), None, None).unwrap();
        assert_eq!(recording.len(), 1);
        let recording = run_model(&mut antenna, Source::Single(&mut silence), Some(6), Some(recording)).unwrap();
        assert_eq!(recording.len(), 7);
        assert_eq!(recording.frames()[3], Frame::from_reals(&[0.0, 0.0, -1.0]));
        assert_eq!(recording.frames()[6], Frame::from_reals(&[0.0; 3]));
    }

    #[test]
    fn test_failed_phase_returns_earlier_recording() {
        let mut window = ScrollingWindow::new(4, None, None).unwrap();
        let mut pulse = SignalRepeater::from_values(vec![1.0, 2.0], None, false).unwrap();
        let recording = run_model(&mut window, Source::Single(&mut pulse), None, None).unwrap();
        assert_eq!(recording.len(), 2);

        // the sum overflows to infinity on the first tick of the second phase
        let mut big = Constant::new(Some(f64::MAX)).unwrap();
        let mut bigger = Constant::new(Some(f64::MAX)).unwrap();
        let generators = vec![&mut big as &mut dyn SignalGenerator, &mut bigger as &mut dyn SignalGenerator];
        let err = run_model(&mut window, Source::Summed(generators), Some(3), Some(recording)).unwrap_err();

        match &err {
            LedError::Interrupted { tick, source, .. } => {
                assert_eq!(*tick, 0);
                assert!(matches!(**source, LedError::Validation { .. }));
            }
            other => panic!("expected an interrupted run, got {}", other),
        }
        let recording = err.into_recording().unwrap();
        assert_eq!(recording.len(), 2);
        assert_eq!(recording.time_series()[1], Sample::Scalar(Some(2.0)));
    }

    #[test]
    fn test_failed_step_keeps_recording_on_simulation() {
        let mut window = ScrollingWindow::new(4, None, None).unwrap();
        let mut big = Constant::new(Some(f64::MAX)).unwrap();
        let mut bigger = Constant::new(Some(f64::MAX)).unwrap();
        let generators = vec![&mut big as &mut dyn SignalGenerator, &mut bigger as &mut dyn SignalGenerator];
        let mut simulation = Simulation::new(&mut window, Source::Summed(generators), Some(3), None).unwrap();

        assert!(simulation.step().is_err());
        assert_eq!(simulation.state(), RunState::Stopped);
        assert_eq!(simulation.stop_reason(), Some(StopReason::Failed));
        assert!(simulation.finish().is_empty());
    }

    #[test]
    fn test_observer_sees_every_frame() {
        let mut window = ScrollingWindow::new(3, None, None).unwrap();
        let mut source = Constant::new(Some(2.0)).unwrap();
        let mut seen = Vec::new();
        let recording = Simulation::new(&mut window, Source::Single(&mut source), Some(4), None)
            .unwrap()
            .on_frame(|tick, frame| seen.push((tick, frame.clone())))
            .run()
            .unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[3].0, 3);
        assert_eq!(seen[3].1, recording.frames()[3]);
    }

    #[test]
    fn test_vector_source_needs_vector_model() {
        use crate::aggregator::{SignalAggregator, SignalSpec};
        use serde_json::json;

        let mut aggregator = SignalAggregator::from_specs(
            vec![SignalSpec::new("ConstantGenerator", vec![json!(4)])],
            "",
        )
        .unwrap();

        let mut window = ScrollingWindow::new(6, None, None).unwrap();
        {
            let result = Simulation::new(&mut window, Source::Aggregate(&mut aggregator), Some(2), None);
            assert!(matches!(result, Err(LedError::Configuration(_))));
        }

        let mut gauges = Gauges::new(6, 1).unwrap();
        let recording = run_model(&mut gauges, Source::Aggregate(&mut aggregator), Some(2), None).unwrap();
        assert_eq!(recording.time_series()[1], Sample::Vector(vec![Some(4.0)]));
        assert_eq!(recording.frames()[1].get(1), Some(4.0));
    }
}
