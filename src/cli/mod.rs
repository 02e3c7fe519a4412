mod error;
mod types;

pub use error::Error;
pub use types::Color;

use std::{env, ffi::OsString};

use clap::{App, AppSettings, Arg};
use log::LevelFilter;
use regex::Regex;

use crate::config::ITERATIONS;
use crate::stats::Dispersion;

const BIN_NAME: &str = "run";

#[derive(Debug, PartialEq)]
pub struct Args {
    pub filter: Option<String>,
    pub color: Color,
    pub dispersion: Dispersion,
    pub iterations: usize,
    pub list: bool,
    pub verbose: u64,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            filter: None,
            color: Color::default(),
            dispersion: Dispersion::default(),
            iterations: ITERATIONS,
            list: false,
            verbose: 0,
        }
    }
}

impl Args {
    /// The compiled pair filter, if one was given.
    pub fn filter(&self) -> Result<Option<Regex>, Error> {
        Ok(self.filter.as_deref().map(Regex::new).transpose()?)
    }

    /// The log level selected by the number of `-v` flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Off,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub fn parse_args() -> Args {
    let args = env::args_os().collect();
    match try_parse_args(args) {
        Ok(args) => args,
        Err(Error::DisplayHelp) => {
            println!("{}", gen_help());
            std::process::exit(0);
        }
        Err(Error::DisplayVersion) => {
            println!("{}", gen_version());
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error parsing CLI args: {}", e);
            eprintln!("{}", gen_help());
            std::process::exit(1);
        }
    }
}

fn app() -> App<'static, 'static> {
    // `-V/--version` is declared below and printed by `parse_args`
    App::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .setting(AppSettings::DisableVersion)
        .about("Times Hydrogen against reference interpreters on a shared benchmark suite.")
        .arg(
            Arg::with_name("FILTER")
                .help("Only run pairs whose `<benchmark>/<language>` id matches this regex.")
                .index(1),
        )
        .arg(
            Arg::with_name("color")
                .short("c")
                .long("color")
                .alias("colour")
                .takes_value(true)
                .help(
                    "Configure coloring of output. always = always colorize output, never = \
                     never colorize output, auto = colorize output if stdout is a tty. \
                     [default: always] [possible values: auto, always, never]",
                ),
        )
        .arg(
            Arg::with_name("dispersion")
                .short("d")
                .long("dispersion")
                .takes_value(true)
                .help(
                    "Spread figure printed under each average. root-sum-squares = \
                     sqrt(sum((x - mean)^2)), population = divide the sum by n first, \
                     sample = divide by n - 1. [default: root-sum-squares]",
                ),
        )
        .arg(
            Arg::with_name("iterations")
                .short("n")
                .long("iterations")
                .takes_value(true)
                .help("Number of runs per pair. [default: 30]"),
        )
        .arg(
            Arg::with_name("list")
                .long("list")
                .help("List the pairs that would run, then exit."),
        )
        .arg(
            Arg::with_name("version")
                .short("V")
                .long("version")
                .help("Prints version information"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Log to stderr. Repeat for more detail."),
        )
}

fn try_parse_args(args: Vec<OsString>) -> Result<Args, Error> {
    let matches = app().get_matches_from_safe(args)?;
    if matches.is_present("version") {
        return Err(Error::DisplayVersion);
    }

    let color = match matches.value_of("color") {
        None => Color::default(),
        Some(s) => s.parse().map_err(|_| Error::InvalidColor(s.to_owned()))?,
    };
    let dispersion = match matches.value_of("dispersion") {
        None => Dispersion::default(),
        Some(s) => s
            .parse()
            .map_err(|_| Error::InvalidDispersion(s.to_owned()))?,
    };
    let iterations = match matches.value_of("iterations") {
        None => ITERATIONS,
        Some(s) => match s.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => return Err(Error::InvalidIterations(s.to_owned())),
        },
    };

    let filter = matches.value_of("FILTER").map(String::from);
    // Reject a bad regex here rather than after the first pair
    if let Some(filter) = &filter {
        Regex::new(filter)?;
    }

    Ok(Args {
        filter,
        color,
        dispersion,
        iterations,
        list: matches.is_present("list"),
        verbose: matches.occurrences_of("verbose"),
    })
}

#[must_use]
fn gen_version() -> String {
    format!("{} {}", BIN_NAME, env!("CARGO_PKG_VERSION"))
}

#[must_use]
fn gen_help() -> String {
    let mut help = Vec::new();
    if app().write_long_help(&mut help).is_err() {
        return String::from("run [OPTIONS] [FILTER]");
    }
    String::from_utf8_lossy(&help).into_owned()
}
