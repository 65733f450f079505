// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate chaosgame;
extern crate clap;
extern crate crossbeam;
extern crate failure;
extern crate rand;

use chaosgame::{animate, Canvas, Engine, Event, Halt, Millis, Point, SystemClock, VirtualClock};
use clap::{App, Arg, ArgMatches};
use crossbeam::channel::unbounded;
use failure::{bail, err_msg};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_point(s: &str) -> Option<Point> {
    match parse_pair(s, ',') {
        Some((x, y)) => Some(Point { x, y }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn validate_finite(s: &str, isnotanumber_err: &str, isnotfinite_err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(v) if v.is_finite() => Ok(()),
        Ok(_) => Err(isnotfinite_err.to_string()),
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ANCHOR: &str = "anchor";
const START: &str = "start";
const SPEED: &str = "speed";
const STEPS: &str = "steps";
const FPS: &str = "fps";
const REALTIME: &str = "realtime";
const SEED: &str = "seed";

fn args<'a>() -> ArgMatches<'a> {
    App::new("chaos")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Chaos game renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file, also the name of the render surface"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ANCHOR)
                .required(false)
                .long(ANCHOR)
                .short("a")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse anchor point"))
                .help("An anchor point; give exactly three, in order"),
        )
        .arg(
            Arg::with_name(START)
                .required(false)
                .long(START)
                .short("p")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse starting point"))
                .help("Starting point (default: centre of the image)"),
        )
        .arg(
            Arg::with_name(SPEED)
                .required(false)
                .long(SPEED)
                .takes_value(true)
                .default_value("200")
                .allow_hyphen_values(true)
                .validator(|s| {
                    validate_finite(&s, "Could not parse speed", "Speed must be a finite number")
                })
                .help("Milliseconds between simulation steps"),
        )
        .arg(
            Arg::with_name(STEPS)
                .required(false)
                .long(STEPS)
                .short("n")
                .takes_value(true)
                .default_value("20000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000_000,
                        "Could not parse step count",
                        "Step count must be between 1 and 10000000",
                    )
                })
                .help("Number of points to plot before stopping"),
        )
        .arg(
            Arg::with_name(FPS)
                .required(false)
                .long(FPS)
                .takes_value(true)
                .default_value("60")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1000,
                        "Could not parse refresh rate",
                        "Refresh rate must be between 1 and 1000",
                    )
                })
                .help("Display refreshes per second"),
        )
        .arg(
            Arg::with_name(REALTIME)
                .long(REALTIME)
                .help("Pace the animation with the wall clock instead of simulated time"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| validate_number::<u64>(&s, "Could not parse seed"))
                .help("Seed for the die, for repeatable renders"),
        )
        .get_matches()
}

/// Everything the command line decides.
struct Settings {
    output: String,
    width: u32,
    height: u32,
    clicks: Vec<Point>,
    speed: Millis,
    steps: usize,
    fps: u32,
    realtime: bool,
    seed: Option<u64>,
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, failure::Error> {
    matches
        .value_of(name)
        .ok_or_else(|| err_msg(format!("Missing value for --{}", name)))
}

fn number<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error> {
    T::from_str(value(matches, name)?)
        .map_err(|_| err_msg(format!("Could not parse value for --{}", name)))
}

// A triangle inset from the edges of the image.
fn default_anchors(width: u32, height: u32) -> Vec<Point> {
    let (w, h) = (f64::from(width), f64::from(height));
    let margin = (w.min(h) * 0.05).floor();
    vec![
        Point::new((w / 2.0).floor(), margin),
        Point::new(margin, h - margin),
        Point::new(w - margin, h - margin),
    ]
}

fn settings(matches: &ArgMatches) -> Result<Settings, failure::Error> {
    let (width, height) = parse_pair::<u32>(value(matches, SIZE)?, 'x')
        .ok_or_else(|| err_msg("Error parsing image dimensions"))?;

    let mut clicks = match matches.values_of(ANCHOR) {
        None => default_anchors(width, height),
        Some(values) => values
            .map(|s| parse_point(s).ok_or_else(|| err_msg("Error parsing anchor point")))
            .collect::<Result<Vec<Point>, failure::Error>>()?,
    };
    if clicks.len() != 3 {
        bail!("Exactly three anchor points are needed, {} given", clicks.len());
    }
    clicks.push(match matches.value_of(START) {
        None => Point::new(f64::from(width / 2), f64::from(height / 2)),
        Some(s) => parse_point(s).ok_or_else(|| err_msg("Error parsing starting point"))?,
    });

    Ok(Settings {
        output: value(matches, OUTPUT)?.to_string(),
        width,
        height,
        clicks,
        speed: number(matches, SPEED)?,
        steps: number(matches, STEPS)?,
        fps: number(matches, FPS)?,
        realtime: matches.is_present(REALTIME),
        seed: match matches.value_of(SEED) {
            None => None,
            Some(_) => Some(number(matches, SEED)?),
        },
    })
}

/// Plays the scripted session a user would click through: the three
/// anchors, the starting point, the speed, then the run toggle.  The
/// animation stops once enough points are plotted.
fn render<R: Rng>(mut engine: Engine<Canvas, R>, settings: &Settings) -> Result<Canvas, failure::Error> {
    let (tx, rx) = unbounded();
    for click in &settings.clicks {
        tx.send(Event::Click(*click))?;
    }
    tx.send(Event::Speed(settings.speed))?;
    tx.send(Event::Toggle)?;

    let limit = Some(settings.steps);
    let halt = if settings.realtime {
        animate(&mut engine, &mut SystemClock::new(settings.fps), &rx, limit)
    } else {
        animate(&mut engine, &mut VirtualClock::with_fps(settings.fps), &rx, limit)
    };
    if halt != Halt::Limit {
        warn!(?halt, steps = engine.steps(), "animation ended early");
    }
    Ok(engine.into_surface())
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let settings = settings(matches)?;
    let canvas = Canvas::new(&settings.output, settings.width, settings.height)?;
    info!(
        surface = canvas.name(),
        width = canvas.width(),
        height = canvas.height(),
        "canvas ready"
    );

    let canvas = match settings.seed {
        Some(seed) => render(Engine::with_rng(canvas, StdRng::seed_from_u64(seed)), &settings)?,
        None => render(Engine::new(canvas), &settings)?,
    };
    canvas.save()?;
    info!(path = settings.output.as_str(), steps = settings.steps, "render saved");
    Ok(())
}

/// Logs go to stderr, filtered by `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,chaosgame=info,chaos=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
