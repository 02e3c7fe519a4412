use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Why a (language, benchmark) pair did not produce a summary.
#[derive(Debug, Error)]
pub enum Error {
    /// The harness could not work out its own directory.
    #[error("{0}")]
    Path(#[from] PathError),
    /// The interpreter could not be started at all.
    #[error("failed to launch {program:?} in {dir:?}: {inner}")]
    Spawn {
        program: String,
        dir: PathBuf,
        #[source]
        inner: io::Error,
    },
    /// The interpreter ran but exited unsuccessfully or was killed by a signal.
    #[error("{program:?} failed on run {run}: {status}")]
    Status {
        program: String,
        run: usize,
        status: ExitStatus,
    },
}

impl Error {
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }
}

#[derive(Debug, Error)]
pub enum PathError {
    #[error("no executable path in the process arguments")]
    MissingExecutable,
    #[error("failed to read the current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;
