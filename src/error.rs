//! Errors raised while setting up or saving a render surface.  The
//! simulation itself never fails; anything it cannot do yet it simply
//! skips.

use failure::Fail;
use std::io;

/// Everything that can go wrong outside the animation loop.
#[derive(Debug, Fail)]
pub enum ChaosError {
    /// A surface must be identified by a non-empty name.
    #[fail(display = "render surface has no name")]
    UnnamedSurface,

    /// A surface with no width or no height cannot be drawn on.
    #[fail(
        display = "render surface {} has no drawable area ({}x{})",
        name, width, height
    )]
    EmptySurface {
        /// The name the surface was requested under.
        name: String,
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The surface could not be written out.
    #[fail(display = "could not write render surface {}: {}", name, cause)]
    Write {
        /// The name (and path) of the surface.
        name: String,
        /// The underlying I/O failure.
        #[cause]
        cause: io::Error,
    },
}
