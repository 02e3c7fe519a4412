//! Spawning and timing the interpreters.

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use crate::config::{Benchmark, Language};
use crate::error::{Error, PathError, Result};
use crate::measurement::Measurement;
use crate::report::{PairId, Report};

/// The absolute directory holding the running harness executable, as located from the path it
/// was invoked with.
pub fn harness_directory() -> ::std::result::Result<PathBuf, PathError> {
    let argv0 = env::args_os().next().ok_or(PathError::MissingExecutable)?;
    let cwd = env::current_dir().map_err(PathError::CurrentDir)?;
    Ok(resolve_harness_directory(Path::new(&argv0), &cwd))
}

/// Takes the parent of `argv0` (`.` when it has none), anchors it at `cwd` if it is relative and
/// cleans it lexically.
pub fn resolve_harness_directory(argv0: &Path, cwd: &Path) -> PathBuf {
    let parent = argv0
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let absolute = if parent.is_absolute() {
        parent.to_path_buf()
    } else {
        cwd.join(parent)
    };

    let mut clean = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // `/..` is `/`
            Component::ParentDir => {
                if !clean.pop() && !clean.has_root() {
                    clean.push(component);
                }
            }
            other => clean.push(other),
        }
    }
    clean
}

/// Builds the invocation of `language` on `benchmark`: the first command token is the
/// executable, the remaining tokens come next, and the source path is last.
///
/// A relative executable path such as `../build/interpreter` is anchored at `dir`, the directory
/// the child runs in. Bare names are left for the search path.
pub fn command(language: &Language, benchmark: &Benchmark, dir: &Path) -> Command {
    let program = Path::new(language.program());
    let program = if program.is_relative() && program.components().count() > 1 {
        dir.join(program)
    } else {
        program.to_path_buf()
    };

    let mut command = Command::new(program);
    command
        .args(language.args())
        .arg(language.source_path(benchmark))
        .current_dir(dir);
    command
}

/// Runs `command` to completion once and returns how long it took in seconds.
///
/// Standard streams are inherited. `run` is only used for error messages.
pub fn run_once<M: Measurement>(
    command: &mut Command,
    measurement: &M,
    run: usize,
) -> Result<f64> {
    let program = command.get_program().to_string_lossy().into_owned();

    let start = measurement.start();
    let status = command.status();
    let elapsed = measurement.end(start);

    let status = status.map_err(|inner| Error::Spawn {
        program: program.clone(),
        dir: command
            .get_current_dir()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        inner,
    })?;
    if !status.success() {
        return Err(Error::Status {
            program,
            run: run + 1,
            status,
        });
    }

    Ok(measurement.to_seconds(&elapsed))
}

/// Runs one pair `iterations` times in `dir`, reporting as it goes.
///
/// The outer `Result` fails only if the report could not be written. The inner one carries the
/// reason the pair was abandoned, after it has been reported.
pub(crate) fn run_pair<R, M>(
    id: &PairId,
    language: &Language,
    benchmark: &Benchmark,
    dir: ::std::result::Result<PathBuf, PathError>,
    iterations: usize,
    measurement: &M,
    report: &mut R,
) -> io::Result<Result<Vec<f64>>>
where
    R: Report,
    M: Measurement,
{
    report.pair_start(id)?;

    let dir = match dir {
        Ok(dir) => dir,
        Err(e) => {
            let e = Error::from(e);
            info!("{}: {}", id, e);
            report.pair_failed(id, &e)?;
            return Ok(Err(e));
        }
    };

    let mut times = Vec::with_capacity(iterations);
    for run in 0..iterations {
        let mut command = command(language, benchmark, &dir);
        debug!("{}: run {} is {:?} in {}", id, run + 1, command, dir.display());

        report.run_start(id, run)?;
        match run_once(&mut command, measurement, run) {
            Ok(seconds) => {
                times.push(seconds);
                report.run_complete(id, run, seconds)?;
            }
            Err(e) => {
                info!("{}: {}", id, e);
                report.pair_failed(id, &e)?;
                return Ok(Err(e));
            }
        }
    }

    Ok(Ok(times))
}
