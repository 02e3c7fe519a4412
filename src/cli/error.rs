use std::fmt;

#[derive(Debug)]
pub enum Error {
    DisplayHelp,
    DisplayVersion,
    Clap(clap::Error),
    InvalidColor(String),
    InvalidDispersion(String),
    InvalidIterations(String),
    InvalidFilter(regex::Error),
}

impl From<clap::Error> for Error {
    fn from(e: clap::Error) -> Self {
        match e.kind {
            clap::ErrorKind::HelpDisplayed => Self::DisplayHelp,
            clap::ErrorKind::VersionDisplayed => Self::DisplayVersion,
            _ => Self::Clap(e),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(e: regex::Error) -> Self {
        Self::InvalidFilter(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DisplayHelp => f.write_str("Signals to display help"),
            Self::DisplayVersion => f.write_str("Signals to display version"),
            Self::Clap(err) => write!(f, "Arg-parse error: {}", err.message),
            Self::InvalidColor(s) => write!(f, "Invalid color: {}", s),
            Self::InvalidDispersion(s) => write!(f, "Invalid dispersion: {}", s),
            Self::InvalidIterations(s) => {
                write!(f, "Invalid iterations: {} (expected a whole number >= 1)", s)
            }
            Self::InvalidFilter(err) => write!(f, "Invalid filter: {}", err),
        }
    }
}

impl std::error::Error for Error {}
