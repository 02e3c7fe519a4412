//! This module defines the trait the runner uses to time a single interpreter run, and the
//! [WallTime](struct.WallTime.html) struct which is the default wall-clock measurement.

use std::time::{Duration, Instant};

/// Something the runner can measure around a spawn-and-wait.
///
/// `start` is called immediately before the child is spawned to produce some intermediate value
/// (for example, the wall-clock time at that moment) and `end` is called immediately after the
/// child has exited with the value returned by `start`.
pub trait Measurement {
    /// This type represents an intermediate value for the measurements. It will be produced by the
    /// start function and passed to the end function.
    type Intermediate;

    /// This type is the measured value.
    type Value;

    /// Called before spawning the interpreter.
    fn start(&self) -> Self::Intermediate;

    /// Called after the interpreter has exited to get the measured value.
    fn end(&self, i: Self::Intermediate) -> Self::Value;

    /// Converts the measured value to seconds so it can be reported and aggregated.
    fn to_seconds(&self, value: &Self::Value) -> f64;
}

/// `WallTime` is the default measurement. It reads the monotonic clock on both sides of the
/// run, so the figure includes interpreter startup.
pub struct WallTime;
impl Measurement for WallTime {
    type Intermediate = Instant;
    type Value = Duration;

    fn start(&self) -> Self::Intermediate {
        Instant::now()
    }
    fn end(&self, i: Self::Intermediate) -> Self::Value {
        i.elapsed()
    }
    fn to_seconds(&self, val: &Self::Value) -> f64 {
        val.as_secs_f64()
    }
}
