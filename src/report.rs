use crate::config::{Benchmark, Language};
use crate::error::Error;
use crate::format;
use crate::stats::Dispersion;
use anes::{Attribute, Color, ResetAttributes, SetAttribute, SetForegroundColor};
use std::fmt;
use std::io::{self, Write};

const RULE_LEN: usize = 80;

/// Identifies one (language, benchmark) pair, as `<benchmark>/<language>`.
#[derive(Clone, PartialEq, Eq)]
pub struct PairId {
    pub benchmark: String,
    pub language: String,
    full_id: String,
}

impl PairId {
    pub fn new(language: &Language, benchmark: &Benchmark) -> PairId {
        PairId {
            benchmark: benchmark.display_name.clone(),
            language: language.name.clone(),
            full_id: format!("{}/{}", benchmark.display_name, language.name),
        }
    }

    pub fn id(&self) -> &str {
        &self.full_id
    }
}
impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
impl fmt::Debug for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PairId {{ benchmark: \"{}\", language: \"{}\" }}",
            self.benchmark, self.language
        )
    }
}

/// The aggregate of a pair whose runs all succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSummary {
    /// Every run time, in seconds, in run order.
    pub times: Vec<f64>,
    pub mean: f64,
    pub dispersion: f64,
    pub dispersion_kind: Dispersion,
}

/// Hooks the harness calls while it works through the pairs. Every hook defaults to doing
/// nothing.
pub trait Report {
    fn list(&mut self, _id: &PairId) -> io::Result<()> {
        Ok(())
    }

    fn pair_start(&mut self, _id: &PairId) -> io::Result<()> {
        Ok(())
    }
    /// Called immediately before the `run`th (zero based) child is spawned.
    fn run_start(&mut self, _id: &PairId, _run: usize) -> io::Result<()> {
        Ok(())
    }
    fn run_complete(&mut self, _id: &PairId, _run: usize, _seconds: f64) -> io::Result<()> {
        Ok(())
    }
    /// The pair was abandoned. No summary follows.
    fn pair_failed(&mut self, _id: &PairId, _error: &Error) -> io::Result<()> {
        Ok(())
    }
    fn pair_complete(&mut self, _id: &PairId, _summary: &PairSummary) -> io::Result<()> {
        Ok(())
    }
}

/// The human readable, colorized report.
pub struct CliReport<W: Write> {
    out: W,
    pub enable_text_coloring: bool,
}
impl<W: Write> CliReport<W> {
    pub fn new(out: W, enable_text_coloring: bool) -> CliReport<W> {
        CliReport {
            out,
            enable_text_coloring,
        }
    }

    /// Gives back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn with_color(&self, color: Color, s: &str) -> String {
        if self.enable_text_coloring {
            format!(
                "{}{}{}{}",
                SetAttribute(Attribute::Bold),
                SetForegroundColor(color),
                s,
                ResetAttributes
            )
        } else {
            String::from(s)
        }
    }

    fn blue(&self, s: &str) -> String {
        self.with_color(Color::DarkBlue, s)
    }

    fn white(&self, s: &str) -> String {
        self.with_color(Color::White, s)
    }

    fn red(&self, s: &str) -> String {
        self.with_color(Color::DarkRed, s)
    }
}
impl<W: Write> Report for CliReport<W> {
    fn list(&mut self, id: &PairId) -> io::Result<()> {
        writeln!(self.out, "{}", id)
    }

    fn pair_start(&mut self, id: &PairId) -> io::Result<()> {
        let rule = self.white(&"-".repeat(RULE_LEN));
        let benchmark = self.blue("Benchmark: ") + &self.white(&id.benchmark);
        let language = self.blue(" Language: ") + &self.white(&id.language);
        let run_times = self.blue("Run Times: ");

        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "{}", benchmark)?;
        writeln!(self.out, "{}", language)?;
        write!(self.out, "{}", run_times)?;
        self.out.flush()
    }

    fn run_start(&mut self, _: &PairId, _: usize) -> io::Result<()> {
        // The child shares our stdout
        self.out.flush()
    }

    fn run_complete(&mut self, _: &PairId, run: usize, seconds: f64) -> io::Result<()> {
        write!(
            self.out,
            "{}{}",
            format::seconds(seconds),
            format::run_time_separator(run)
        )?;
        self.out.flush()
    }

    fn pair_failed(&mut self, _: &PairId, error: &Error) -> io::Result<()> {
        let label = if error.is_path_error() {
            "Path Error:"
        } else {
            "Error:"
        };
        let line = self.red(label) + " " + &self.white(&error.to_string());
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    fn pair_complete(&mut self, _: &PairId, summary: &PairSummary) -> io::Result<()> {
        let average =
            self.blue(&format::label("Average")) + &self.white(&format::seconds(summary.mean));
        let dispersion = self.blue(&format::label(summary.dispersion_kind.legend()))
            + &self.white(&format::seconds(summary.dispersion));

        writeln!(self.out)?;
        writeln!(self.out, "{}", average)?;
        writeln!(self.out, "{}", dispersion)?;
        self.out.flush()
    }
}
