//! A wall-clock benchmark runner for comparing the Hydrogen interpreter against reference
//! interpreters.
//!
//! For every (language, benchmark) pair the harness spawns the language's interpreter on the
//! benchmark's source file a fixed number of times, one run after another, and prints each run
//! time followed by the average and a dispersion figure.
//!
//! ```rust,no_run
//! use hydrogen_bench::{config, Harness};
//!
//! Harness::default()
//!     .run(&config::languages(), &config::benchmarks())
//!     .expect("failed to write the report");
//! ```

#![warn(missing_docs)]
#![allow(clippy::new_ret_no_self)]

#[macro_use]
extern crate log;

#[allow(missing_docs)]
pub mod cli;
pub mod config;
#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
mod format;
pub mod measurement;
#[allow(missing_docs)]
pub mod report;
pub mod runner;
#[allow(missing_docs)]
pub mod stats;

use std::io::{self, Stdout};
use std::path::PathBuf;

use regex::Regex;

pub use crate::config::{Benchmark, Language, ITERATIONS};
pub use crate::error::{Error, PathError};
use crate::measurement::{Measurement, WallTime};
pub use crate::report::{CliReport, PairId, PairSummary, Report};
pub use crate::stats::Dispersion;
use crate::stats::Sample;

/// What became of one pair: its summary, or why it was abandoned.
pub type PairOutcome = Result<PairSummary, Error>;

/// The benchmark manager
///
/// `Harness` holds the run configuration and drives the nested loop over languages and
/// benchmarks. It is configured with the builder methods below, for example:
///
/// ```rust,no_run
/// use hydrogen_bench::{config, Dispersion, Harness};
///
/// Harness::default()
///     .iterations(10)
///     .dispersion(Dispersion::Sample)
///     .run(&config::languages(), &config::benchmarks())
///     .unwrap();
/// ```
pub struct Harness<R: Report = CliReport<Stdout>, M: Measurement = WallTime> {
    report: R,
    measurement: M,
    iterations: usize,
    dispersion: Dispersion,
    working_directory: Option<PathBuf>,
    filter: Option<Regex>,
}

impl Default for Harness {
    /// Creates a harness with the baseline settings:
    ///
    /// - Iterations: 30
    /// - Dispersion: root of the sum of squares
    /// - Report: colorized, to stdout
    /// - Working directory: the directory of the harness executable
    fn default() -> Harness {
        Harness::new(CliReport::new(io::stdout(), true))
    }
}

impl<R: Report> Harness<R, WallTime> {
    /// Creates a harness with the baseline settings that reports to `report`.
    pub fn new(report: R) -> Harness<R, WallTime> {
        Harness {
            report,
            measurement: WallTime,
            iterations: ITERATIONS,
            dispersion: Dispersion::default(),
            working_directory: None,
            filter: None,
        }
    }
}

impl<R: Report, M: Measurement> Harness<R, M> {
    /// Changes the way run times are measured.
    pub fn with_measurement<M2: Measurement>(self, measurement: M2) -> Harness<R, M2> {
        Harness {
            report: self.report,
            measurement,
            iterations: self.iterations,
            dispersion: self.dispersion,
            working_directory: self.working_directory,
            filter: self.filter,
        }
    }

    /// Changes the number of runs per pair.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn iterations(mut self, n: usize) -> Harness<R, M> {
        assert!(n > 0, "at least one run per pair is required");

        self.iterations = n;
        self
    }

    /// Changes the spread figure printed under each average.
    pub fn dispersion(mut self, dispersion: Dispersion) -> Harness<R, M> {
        self.dispersion = dispersion;
        self
    }

    /// Runs every child in `dir` instead of the directory of the harness executable.
    pub fn working_directory<P: Into<PathBuf>>(mut self, dir: P) -> Harness<R, M> {
        self.working_directory = Some(dir.into());
        self
    }

    /// Only runs the pairs whose id (`<benchmark>/<language>`) matches `filter`.
    pub fn filter(mut self, filter: Regex) -> Harness<R, M> {
        self.filter = Some(filter);
        self
    }

    /// The report the harness writes to.
    pub fn report(&self) -> &R {
        &self.report
    }

    /// Consumes the harness and gives back its report.
    pub fn into_report(self) -> R {
        self.report
    }

    fn selected(&self, languages: &[Language], benchmarks: &[Benchmark]) -> Vec<PairId> {
        languages
            .iter()
            .flat_map(|language| {
                benchmarks
                    .iter()
                    .map(move |benchmark| PairId::new(language, benchmark))
            })
            .filter(|id| self.is_selected(id))
            .collect()
    }

    fn is_selected(&self, id: &PairId) -> bool {
        self.filter.as_ref().map_or(true, |re| re.is_match(id.id()))
    }

    /// Reports the id of every pair `run` would execute, in order.
    pub fn list(&mut self, languages: &[Language], benchmarks: &[Benchmark]) -> io::Result<()> {
        for id in self.selected(languages, benchmarks) {
            self.report.list(&id)?;
        }
        Ok(())
    }

    /// Runs every pair: languages in the outer loop, benchmarks in the inner loop.
    ///
    /// A failing pair is reported and the next pair starts; the returned outcomes are in run
    /// order and skip pairs removed by the filter. The only error is a failure to write the
    /// report.
    pub fn run(
        &mut self,
        languages: &[Language],
        benchmarks: &[Benchmark],
    ) -> io::Result<Vec<PairOutcome>> {
        let mut outcomes = Vec::new();
        for language in languages {
            for benchmark in benchmarks {
                let id = PairId::new(language, benchmark);
                if !self.is_selected(&id) {
                    debug!("{}: filtered out", id);
                    continue;
                }
                outcomes.push(self.run_pair(&id, language, benchmark)?);
            }
        }

        let failed = outcomes.iter().filter(|o| o.is_err()).count();
        info!("{} pairs run, {} failed", outcomes.len(), failed);
        Ok(outcomes)
    }

    fn run_pair(
        &mut self,
        id: &PairId,
        language: &Language,
        benchmark: &Benchmark,
    ) -> io::Result<PairOutcome> {
        info!("{}: starting {} runs", id, self.iterations);

        // Resolved again for every pair
        let dir = match &self.working_directory {
            Some(dir) => Ok(dir.clone()),
            None => runner::harness_directory(),
        };

        let times = match runner::run_pair(
            id,
            language,
            benchmark,
            dir,
            self.iterations,
            &self.measurement,
            &mut self.report,
        )? {
            Ok(times) => times,
            Err(e) => return Ok(Err(e)),
        };

        let sample = Sample::new(&times);
        let mean = sample.mean();
        let summary = PairSummary {
            mean,
            dispersion: sample.dispersion(self.dispersion, Some(mean)),
            dispersion_kind: self.dispersion,
            times,
        };
        self.report.pair_complete(id, &summary)?;

        info!("{}: average {:.3}s", id, summary.mean);
        Ok(Ok(summary))
    }
}
