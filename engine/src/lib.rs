pub mod app;
pub mod graphics;
pub mod pixels_renderer;
pub mod profiling;
pub mod regression;
pub mod surface;
pub mod ui;
pub mod view_tree;

/// Pure simulation step: the previous state goes in, the next state comes out.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a `GameLogic` without a window. Used by tests and by the windowed runner alike.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
        }
    }

    /// Number of steps taken so far.
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        self.state = self.game.step(&self.state, input);
        self.frame += 1;
        self.frame
    }

    pub fn step_profiled<P: profiling::Profiler>(&mut self, input: G::Input, profiler: &mut P) -> usize {
        use std::time::Instant;

        let total_start = Instant::now();

        let step_start = Instant::now();
        let next_state = self.game.step(&self.state, input);
        let step_dt = step_start.elapsed();

        let commit_start = Instant::now();
        self.state = next_state;
        self.frame += 1;
        let commit_dt = commit_start.elapsed();

        profiler.on_step(
            self.frame,
            profiling::StepTimings {
                step: step_dt,
                commit: commit_dt,
                total: total_start.elapsed(),
            },
        );

        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        for input in inputs {
            self.step(input);
        }
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiling::{Profiler, StepTimings};

    struct Additive;

    impl GameLogic for Additive {
        type State = i32;
        type Input = i32;

        fn initial_state(&self) -> Self::State {
            0
        }

        fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
            *state + input
        }
    }

    #[test]
    fn runner_steps_and_counts_frames() {
        let mut runner = HeadlessRunner::new(Additive);
        runner.run([1, 2, 3]);
        assert_eq!(runner.frame(), 3);
        assert_eq!(runner.state(), &6);
    }

    #[test]
    fn runner_step_profiled_calls_profiler_hook() {
        #[derive(Default)]
        struct Capture {
            frames: Vec<usize>,
            timings: Vec<StepTimings>,
        }

        impl Profiler for Capture {
            fn on_step(&mut self, frame: usize, timings: StepTimings) {
                self.frames.push(frame);
                self.timings.push(timings);
            }
        }

        let mut runner = HeadlessRunner::new(Additive);
        let mut capture = Capture::default();

        let frame = runner.step_profiled(1, &mut capture);
        assert_eq!(frame, 1);
        assert_eq!(runner.state(), &1);
        assert_eq!(capture.frames, vec![1]);

        let t = capture.timings[0];
        assert!(t.total >= t.step);
        assert!(t.total >= t.commit);
    }
}
