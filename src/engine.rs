// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The simulation engine.  It owns the anchors, the running point,
//! the run state and the speed, and knows how to take one step of the
//! chaos game.  Pacing those steps is the driver's job.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info, trace};

use crate::geometry::{side_index, Point};
use crate::surface::{Surface, LARGE_POINT_SIZE, POINT_SIZE};

/// Time, in milliseconds.
pub type Millis = f64;

/// Interval between steps until someone changes it.
pub const DEFAULT_SPEED: Millis = 200.0;

/// Number of clicks captured as anchors before the next one becomes
/// the starting point.
pub const ANCHOR_COUNT: usize = 3;

/// Whether the simulation is advancing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Steps are skipped.
    Stopped,
    /// Steps are taken whenever the driver asks.
    Running,
}

impl RunState {
    /// The other state.
    pub fn toggled(self) -> RunState {
        match self {
            RunState::Stopped => RunState::Running,
            RunState::Running => RunState::Stopped,
        }
    }

    /// The label a toggle control shows in this state: the verb for
    /// leaving it.
    pub fn label(self) -> &'static str {
        match self {
            RunState::Stopped => "Start",
            RunState::Running => "Stop",
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Stopped
    }
}

/// What became of a click delivered during initial capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Capture {
    /// The click was recorded as the anchor with this index.
    Anchor(usize),
    /// The click became the running point; capture is over.
    Start,
    /// Capture was already over.
    Ignored,
}

/// The chaos game.  Generic over the surface it draws on and the
/// source of its die rolls.
pub struct Engine<S, R = ThreadRng> {
    surface: S,
    rng: R,
    anchors: Vec<Point>,
    last: Option<Point>,
    state: RunState,
    speed: Millis,
    steps: usize,
}

impl<S: Surface> Engine<S, ThreadRng> {
    /// An engine rolling with the thread-local generator.
    pub fn new(surface: S) -> Self {
        Engine::with_rng(surface, rand::thread_rng())
    }
}

impl<S: Surface, R: Rng> Engine<S, R> {
    /// An engine rolling with the given generator.  Nothing is drawn
    /// until capture begins.
    pub fn with_rng(surface: S, rng: R) -> Self {
        Engine {
            surface,
            rng,
            anchors: Vec::with_capacity(ANCHOR_COUNT),
            last: None,
            state: RunState::default(),
            speed: DEFAULT_SPEED,
            steps: 0,
        }
    }

    /// Feeds one click of the initial capture sequence.  The first
    /// three clicks become anchors and the fourth the running point;
    /// each is marked on the surface.  Later clicks are ignored.
    pub fn on_initial_point(&mut self, point: Point) -> Capture {
        if self.last.is_some() {
            trace!(x = point.x, y = point.y, "capture complete, click ignored");
            return Capture::Ignored;
        }

        let capture = if self.anchors.len() >= ANCHOR_COUNT {
            self.last = Some(point);
            Capture::Start
        } else {
            self.anchors.push(point);
            Capture::Anchor(self.anchors.len() - 1)
        };
        debug!(x = point.x, y = point.y, ?capture, "point captured");
        self.surface.plot(point.x, point.y, LARGE_POINT_SIZE);
        capture
    }

    /// Flips the run state and returns the label the toggle should now
    /// show.
    pub fn on_toggle(&mut self) -> &'static str {
        self.state = self.state.toggled();
        info!(state = ?self.state, "run state toggled");
        self.state.label()
    }

    /// Replaces the interval between steps.  Any value is taken as is;
    /// zero or less means a step on every tick.
    pub fn on_speed_change(&mut self, speed: Millis) {
        debug!(from = self.speed, to = speed, "speed changed");
        self.speed = speed;
    }

    /// True when a step would actually do something: running, with a
    /// full set of anchors and a point to start from.
    pub fn can_step(&self) -> bool {
        self.state == RunState::Running && self.anchors.len() > 2 && self.last.is_some()
    }

    /// Rolls the die, jumps the running point halfway toward the chosen
    /// anchor and plots where it lands.  Returns the new running point,
    /// or `None` if the engine is not in a state to step.
    pub fn step(&mut self) -> Option<Point> {
        if !self.can_step() {
            return None;
        }
        let current = self.last?;

        let roll = Uniform::new_inclusive(1, self.anchors.len() * 2).sample(&mut self.rng);
        let anchor = self.anchors[side_index(roll)];
        let next = current.toward(&anchor);

        self.last = Some(next);
        self.steps += 1;
        trace!(roll, x = next.x, y = next.y, "step");
        self.surface.plot(next.x, next.y, POINT_SIZE);
        Some(next)
    }

    /// The anchors captured so far, in capture order.
    pub fn anchors(&self) -> &[Point] {
        &self.anchors
    }

    /// The running point, once captured.
    pub fn last(&self) -> Option<Point> {
        self.last
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Current interval between steps.
    pub fn speed(&self) -> Millis {
        self.speed
    }

    /// Number of steps taken since the engine was created.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The surface being drawn on.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Gives the surface back, ending the simulation.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
