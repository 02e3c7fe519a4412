use std::{fmt, str::FromStr};

#[derive(Debug)]
pub struct TypeParseError(String);

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unexpected value: {}", self.0)
    }
}

impl std::error::Error for TypeParseError {}

/// When to emit ANSI escape sequences.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    /// Whether output to stdout should be colorized.
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => atty::is(atty::Stream::Stdout),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::Always
    }
}

impl FromStr for Color {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            invalid => Err(TypeParseError(invalid.to_owned())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        })
    }
}
