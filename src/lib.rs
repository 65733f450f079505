#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Chaos game renderer
//!
//! The chaos game draws a fractal one point at a time.  Pick three
//! anchor points and a starting point anywhere on the plane.  Roll a
//! die, jump halfway from where you are toward the anchor the roll
//! names, and plot where you land.  Repeat.  The points never settle,
//! but they are drawn onto an ever finer set of nested triangles: the
//! Sierpinski triangle emerges from noise.
//!
//! The `Engine` holds the game and takes single steps.  The `Driver`
//! paces those steps against a display refresh so the pattern grows at
//! a chosen speed whatever the refresh rate, and `animate` runs that
//! loop for a host, feeding it input from a channel.  Everything is
//! drawn through the `Surface` trait; `Canvas` is an in-memory surface
//! that can be saved as a greymap.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;
extern crate rand;

pub mod driver;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod surface;

pub use driver::{animate, Clock, Driver, Event, Halt, SystemClock, VirtualClock};
pub use engine::{Capture, Engine, Millis, RunState, DEFAULT_SPEED};
pub use error::ChaosError;
pub use geometry::{lengths, side_index, Point};
pub use surface::{Canvas, Surface, LARGE_POINT_SIZE, POINT_SIZE};
