//! The animation driver.  A host calls `Driver::tick` on every display
//! refresh; the driver decides whether enough time has passed for the
//! engine to take a step.  `animate` is such a host: it waits on a
//! `Clock` for each refresh, applies whatever input has arrived on a
//! channel, and ticks, until told to stop.

use crossbeam::channel::{Receiver, TryRecvError};
use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use crate::engine::{Engine, Millis};
use crate::geometry::Point;
use crate::surface::Surface;

/// Paces the engine: at most one step per tick, and only once the
/// engine's speed has elapsed since the last step.
#[derive(Copy, Clone, Debug)]
pub struct Driver {
    last: Millis,
}

impl Driver {
    /// A driver whose interval starts counting at `start`.
    pub fn new(start: Millis) -> Driver {
        Driver { last: start }
    }

    /// When the interval last restarted.
    pub fn last(&self) -> Millis {
        self.last
    }

    /// One display refresh at time `now`.  Returns true if the engine
    /// actually stepped.  The interval restarts whenever it has
    /// elapsed, whether or not the engine was able to step; time that
    /// passed beyond it is not made up.
    pub fn tick<S: Surface, R: Rng>(&mut self, engine: &mut Engine<S, R>, now: Millis) -> bool {
        if now - self.last > engine.speed() {
            self.last = now;
            engine.step().is_some()
        } else {
            false
        }
    }
}

/// Input delivered to the animation loop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    /// A click on the surface, fed to the initial capture.
    Click(Point),
    /// The run toggle was activated.
    Toggle,
    /// The speed control now reads this many milliseconds.
    Speed(Millis),
    /// Stop animating.
    Quit,
}

/// Why `animate` returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Halt {
    /// An `Event::Quit` arrived.
    Quit,
    /// Every sender hung up and no input is left.
    Closed,
    /// The engine reached the requested number of steps.
    Limit,
}

/// A source of display refreshes.
pub trait Clock {
    /// The current time.
    fn now(&self) -> Millis;

    /// Blocks until the next display refresh.
    fn next_frame(&mut self);
}

/// Wall-clock time, refreshing at a fixed rate.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    frame: Duration,
    deadline: Instant,
}

impl SystemClock {
    /// A clock refreshing `fps` times per second.  A rate of zero is
    /// treated as one.
    pub fn new(fps: u32) -> SystemClock {
        let origin = Instant::now();
        let frame = Duration::from_secs(1) / fps.max(1);
        SystemClock {
            origin,
            frame,
            deadline: origin + frame,
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn next_frame(&mut self) {
        let now = Instant::now();
        if self.deadline > now {
            thread::sleep(self.deadline - now);
            self.deadline += self.frame;
        } else {
            // Running late: skip the missed refreshes.
            self.deadline = now + self.frame;
        }
    }
}

/// Simulated time that advances one frame per refresh, without ever
/// sleeping.
#[derive(Copy, Clone, Debug)]
pub struct VirtualClock {
    now: Millis,
    frame: Millis,
}

impl VirtualClock {
    /// Starts at time zero, advancing `frame` milliseconds per refresh.
    pub fn new(frame: Millis) -> VirtualClock {
        VirtualClock { now: 0.0, frame }
    }

    /// A clock refreshing `fps` times per simulated second.
    pub fn with_fps(fps: u32) -> VirtualClock {
        VirtualClock::new(1000.0 / f64::from(fps.max(1)))
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Millis {
        self.now
    }

    fn next_frame(&mut self) {
        self.now += self.frame;
    }
}

fn apply<S: Surface, R: Rng>(engine: &mut Engine<S, R>, event: Event) {
    match event {
        Event::Click(point) => {
            engine.on_initial_point(point);
        }
        Event::Toggle => {
            engine.on_toggle();
        }
        Event::Speed(speed) => engine.on_speed_change(speed),
        Event::Quit => (),
    }
}

/// Runs the animation loop until a `Quit` event, until the channel
/// closes, or, given a `limit`, until the engine has taken that many
/// steps.  Pending input is applied before each refresh.
pub fn animate<S, R, C>(
    engine: &mut Engine<S, R>,
    clock: &mut C,
    events: &Receiver<Event>,
    limit: Option<usize>,
) -> Halt
where
    S: Surface,
    R: Rng,
    C: Clock,
{
    let mut driver = Driver::new(clock.now());
    let halt = loop {
        let pending = loop {
            match events.try_recv() {
                Ok(Event::Quit) => break Some(Halt::Quit),
                Ok(event) => apply(engine, event),
                Err(TryRecvError::Empty) => break None,
                Err(TryRecvError::Disconnected) => break Some(Halt::Closed),
            }
        };
        if let Some(halt) = pending {
            break halt;
        }
        if limit.map_or(false, |limit| engine.steps() >= limit) {
            break Halt::Limit;
        }

        clock.next_frame();
        driver.tick(engine, clock.now());
    };
    info!(?halt, steps = engine.steps(), "animation halted");
    halt
}
