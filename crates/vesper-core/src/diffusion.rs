//! Schroeder all-pass diffusion built on [`DelayLine`].
//!
//! A diffusion stage smears transients without colouring the long-term
//! spectrum:
//!
//! ```text
//! d    = line.current_output()
//! v    = x - coef * d          (pushed into the line)
//! y    = d + coef * v
//! ```
//!
//! The transfer function is `(coef + z^-L) / (1 + coef·z^-L)`, an all-pass
//! for `|coef| < 1`.

use crate::{DelayLine, flush_denormal};

/// Runs one frame of all-pass diffusion through `line`.
///
/// The line is read before it is pushed, so an integer length `L` gives a
/// delay of exactly `L` frames. With `coefficient = 0` the stage is a pure
/// delay.
///
/// # Example
///
/// ```rust
/// use vesper_core::{DelayLine, diffuse};
///
/// let mut line = DelayLine::with_length(5.0);
/// let y = diffuse(&mut line, 1.0, 0.5);
/// assert_eq!(y, 0.5);
/// ```
#[inline]
pub fn diffuse(line: &mut DelayLine, input: f32, coefficient: f32) -> f32 {
    let delayed = line.current_output();
    let fed = flush_denormal(input - coefficient * delayed);
    line.push(fed);
    delayed + coefficient * fed
}

/// A [`DelayLine`] bundled with its diffusion coefficient.
#[derive(Debug, Clone)]
pub struct DiffusionStage {
    line: DelayLine,
    coefficient: f32,
}

impl DiffusionStage {
    /// Creates a stage with the given length in samples and coefficient.
    pub fn new(length: f32, coefficient: f32) -> Self {
        Self {
            line: DelayLine::with_length(length),
            coefficient,
        }
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        diffuse(&mut self.line, input, self.coefficient)
    }

    /// Sets the diffusion coefficient.
    pub fn set_coefficient(&mut self, coefficient: f32) {
        self.coefficient = coefficient;
    }

    /// Returns the diffusion coefficient.
    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }

    /// Forwards to [`DelayLine::set_length`].
    pub fn set_length(&mut self, length: f32) {
        self.line.set_length(length);
    }

    /// Underlying delay line.
    pub fn line(&self) -> &DelayLine {
        &self.line
    }

    /// Mutable access to the underlying delay line.
    pub fn line_mut(&mut self) -> &mut DelayLine {
        &mut self.line
    }

    /// Clears the line history.
    pub fn clear(&mut self) {
        self.line.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_coefficient_is_pure_delay() {
        let mut stage = DiffusionStage::new(7.0, 0.0);
        let out: Vec<f32> = (0..20)
            .map(|n| stage.process(if n == 0 { 1.0 } else { 0.0 }))
            .collect();

        assert_eq!(out[7], 1.0);
        assert_eq!(out.iter().filter(|&&y| y != 0.0).count(), 1);
    }

    #[test]
    fn test_first_output_is_feedforward_term() {
        let mut line = DelayLine::with_length(10.0);
        assert_eq!(diffuse(&mut line, 1.0, 0.6), 0.6);
    }

    #[test]
    fn test_impulse_energy_is_preserved() {
        let mut stage = DiffusionStage::new(10.0, 0.5);
        let energy: f32 = (0..4000)
            .map(|n| {
                let y = stage.process(if n == 0 { 1.0 } else { 0.0 });
                y * y
            })
            .sum();
        assert!(
            (energy - 1.0).abs() < 1e-3,
            "all-pass should preserve energy, got {energy}"
        );
    }

    #[test]
    fn test_negative_coefficient_is_stable() {
        let mut stage = DiffusionStage::new(13.0, -0.7);
        for n in 0..10_000 {
            let y = stage.process(if n % 97 == 0 { 1.0 } else { 0.0 });
            assert!(y.is_finite() && y.abs() < 10.0);
        }
    }

    #[test]
    fn test_clear_resets_history() {
        let mut stage = DiffusionStage::new(9.0, 0.4);
        for _ in 0..50 {
            stage.process(1.0);
        }
        stage.clear();
        assert_eq!(stage.process(0.0), 0.0);
    }
}
