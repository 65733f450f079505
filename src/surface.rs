//! Contains the Surface trait, the seam between the simulation and
//! whatever it draws on, and the Canvas, an in-memory greyscale pixel
//! plane that can be written out as a PNM greymap.

use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use itertools::iproduct;
use num::clamp;
use std::fs::File;

use crate::error::ChaosError;

/// Side of the square plotted for each step of the simulation.
pub const POINT_SIZE: u32 = 2;

/// Side of the square marking anchors and the starting point.
pub const LARGE_POINT_SIZE: u32 = 5;

/// Greyscale value of an empty surface.
pub const BACKGROUND: u8 = 255;

/// Greyscale value plotted points are drawn with.
pub const FOREGROUND: u8 = 0;

/// Something the simulation can draw on.
pub trait Surface {
    /// Paint the whole surface with the background, then switch the
    /// fill to the foreground, ready to plot.
    fn clear(&mut self);

    /// Fill a `size` x `size` square whose top-left corner is at
    /// (`x`, `y`) with the current fill.  Whatever falls outside the
    /// surface is dropped.
    fn plot(&mut self, x: f64, y: f64, size: u32);
}

/// A named, in-memory greyscale surface.  The name doubles as the path
/// the surface is saved to.
#[derive(Debug)]
pub struct Canvas {
    name: String,
    width: u32,
    height: u32,
    fill: u8,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Creates a cleared canvas.  A canvas needs a name and a non-zero
    /// area; anything else is a setup error the caller cannot recover
    /// from.
    pub fn new(name: &str, width: u32, height: u32) -> Result<Canvas, ChaosError> {
        if name.is_empty() {
            return Err(ChaosError::UnnamedSurface);
        }
        if width == 0 || height == 0 {
            return Err(ChaosError::EmptySurface {
                name: name.to_string(),
                width,
                height,
            });
        }

        let mut canvas = Canvas {
            name: name.to_string(),
            width,
            height,
            fill: FOREGROUND,
            pixels: vec![BACKGROUND; (width as usize) * (height as usize)],
        };
        canvas.clear();
        Ok(canvas)
    }

    /// The name this canvas was created under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The greyscale value at (`x`, `y`), if that pixel exists.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.offset(x as usize, y as usize)])
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        y * (self.width as usize) + x
    }

    /// Writes the canvas as a binary PNM greymap to the path it is
    /// named after.
    pub fn save(&self) -> Result<(), ChaosError> {
        let write_error = |cause| ChaosError::Write {
            name: self.name.clone(),
            cause,
        };
        let output = File::create(&self.name).map_err(write_error)?;
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
        encoder
            .encode(&self.pixels[..], self.width, self.height, ColorType::Gray(8))
            .map_err(write_error)?;
        Ok(())
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        for p in self.pixels.iter_mut() {
            *p = BACKGROUND;
        }
        self.fill = FOREGROUND;
    }

    fn plot(&mut self, x: f64, y: f64, size: u32) {
        let (width, height) = (i64::from(self.width), i64::from(self.height));
        let (left, top) = (x.floor() as i64, y.floor() as i64);
        let size = i64::from(size);

        let columns = clamp(left, 0, width)..clamp(left.saturating_add(size), 0, width);
        let rows = clamp(top, 0, height)..clamp(top.saturating_add(size), 0, height);
        for (row, column) in iproduct!(rows, columns) {
            let offset = self.offset(column as usize, row as usize);
            self.pixels[offset] = self.fill;
        }
    }
}
