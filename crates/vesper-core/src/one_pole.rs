//! One-pole lowpass used for input bandwidth and tank damping.
//!
//! ```text
//! y[n] = x[n] + c * (y[n-1] - x[n])
//!      = (1 - c) * x[n] + c * y[n-1]
//! ```
//!
//! The coefficient is set directly rather than derived from a cutoff: the
//! reverb exposes bandwidth and damping as unitless amounts. `c = 0` passes
//! the input through unchanged, `c → 1` holds the previous output.
//!
//! ```rust
//! use vesper_core::OnePole;
//!
//! let mut lp = OnePole::new(0.5);
//! assert_eq!(lp.process(1.0), 0.5);
//! assert_eq!(lp.process(1.0), 0.75);
//! ```

use crate::flush_denormal;

/// One-pole (6 dB/oct) lowpass filter.
///
/// `state` is flushed to zero below 1e-20 so long silent tails stay out of
/// the denormal range.
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    state: f32,
    coeff: f32,
}

impl OnePole {
    /// Creates a filter with feedback coefficient `coeff`.
    pub fn new(coeff: f32) -> Self {
        Self { state: 0.0, coeff }
    }

    /// Sets the feedback coefficient.
    pub fn set_coefficient(&mut self, coeff: f32) {
        self.coeff = coeff;
    }

    /// Returns the feedback coefficient.
    pub fn coefficient(&self) -> f32 {
        self.coeff
    }

    /// Last output.
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        self.state
    }

    /// Clears the filter state.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
