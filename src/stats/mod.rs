//! Aggregate statistics over the run times of one pair.

mod float;
mod sample;

use std::fmt;
use std::str::FromStr;

pub use self::float::Float;
pub use self::sample::Sample;

/// Which spread figure the summary prints.
///
/// The harness historically reports the square root of the undivided sum of squared
/// deviations. That figure grows with the number of runs, so the textbook variants are
/// available too. Each variant carries its own legend so a corrected value is never shown
/// under the historical label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispersion {
    /// `sqrt(sum((x - mean)^2))`
    RootSumOfSquares,
    /// `sqrt(sum((x - mean)^2) / n)`
    Population,
    /// `sqrt(sum((x - mean)^2) / (n - 1))`
    Sample,
}

impl Default for Dispersion {
    fn default() -> Self {
        Self::RootSumOfSquares
    }
}

impl Dispersion {
    /// Label printed in front of the figure in the summary.
    pub fn legend(self) -> &'static str {
        match self {
            Self::RootSumOfSquares => "Standard Deviation",
            Self::Population => "Std. Dev. (n)",
            Self::Sample => "Std. Dev. (n-1)",
        }
    }
}

#[derive(Debug)]
pub struct ParseDispersionError(String);

impl fmt::Display for ParseDispersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unexpected value: {}", self.0)
    }
}

impl std::error::Error for ParseDispersionError {}

impl FromStr for Dispersion {
    type Err = ParseDispersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root-sum-squares" => Ok(Self::RootSumOfSquares),
            "population" => Ok(Self::Population),
            "sample" => Ok(Self::Sample),
            invalid => Err(ParseDispersionError(invalid.to_owned())),
        }
    }
}

impl fmt::Display for Dispersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RootSumOfSquares => "root-sum-squares",
            Self::Population => "population",
            Self::Sample => "sample",
        })
    }
}

fn sum<A>(xs: &[A]) -> A
where
    A: Float,
{
    use std::ops::Add;

    xs.iter().cloned().fold(A::cast(0), Add::add)
}
