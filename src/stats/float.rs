//! Float trait

use cast::From;
use num_traits::float;

/// This is an extension of `num_traits::float::Float` that adds safe
/// casting from the integer and float types the statistics need.
pub trait Float: float::Float + From<usize, Output = Self> + From<f32, Output = Self> {}

impl Float for f32 {}
impl Float for f64 {}
