use std::ops;

use crate::stats::float::Float;
use crate::stats::Dispersion;

/// The run times collected for one pair
///
/// Invariants:
///
/// - The sample contains at least 1 data point
/// - The sample contains no `NaN`s
#[repr(transparent)]
pub struct Sample<A>([A]);

impl<A> Sample<A>
where
    A: Float,
{
    /// Creates a new sample from an existing slice
    ///
    /// # Panics
    ///
    /// Panics if `slice` contains any `NaN` or if `slice` is empty
    #[allow(clippy::new_ret_no_self)]
    pub fn new(slice: &[A]) -> &Sample<A> {
        assert!(!slice.is_empty() && slice.iter().all(|x| !x.is_nan()));

        // `Sample` is a transparent wrapper around `[A]`
        unsafe { &*(slice as *const [A] as *const Sample<A>) }
    }

    /// Returns the arithmetic average of the sample
    ///
    /// - Time: `O(length)`
    pub fn mean(&self) -> A {
        let n = self.len();

        self.sum() / A::cast(n)
    }

    /// Returns the sum of squared deviations from the mean
    ///
    /// The `mean` can be optionally passed along to save a pass over the data
    ///
    /// - Time: `O(length)`
    pub fn sum_of_squares(&self, mean: Option<A>) -> A {
        use std::ops::Add;

        let mean = mean.unwrap_or_else(|| self.mean());

        self.iter()
            .map(|&x| (x - mean).powi(2))
            .fold(A::cast(0), Add::add)
    }

    /// Returns the spread of the sample around its mean, in the requested form
    ///
    /// A single data point has no spread, so every form returns zero for it.
    ///
    /// - Time: `O(length)`
    pub fn dispersion(&self, kind: Dispersion, mean: Option<A>) -> A {
        let sum_of_squares = self.sum_of_squares(mean);
        let n = self.len();

        match kind {
            Dispersion::RootSumOfSquares => sum_of_squares.sqrt(),
            Dispersion::Population => (sum_of_squares / A::cast(n)).sqrt(),
            Dispersion::Sample if n < 2 => A::cast(0),
            Dispersion::Sample => (sum_of_squares / A::cast(n - 1)).sqrt(),
        }
    }

    /// Returns the sum of all the elements of the sample
    ///
    /// - Time: `O(length)`
    pub fn sum(&self) -> A {
        crate::stats::sum(self)
    }
}

impl<A> ops::Deref for Sample<A> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.0
    }
}
