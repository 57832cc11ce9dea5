//! Core [`Effect`] trait.
//!
//! Processors take one sample (or one stereo frame) at a time and advance
//! their internal state by one frame per call. Block helpers are provided on
//! top of the per-frame methods.
//!
//! The trait is object-safe, so front ends can hold a `Box<dyn Effect>`.

/// Core trait for audio processors.
///
/// # Example
///
/// ```rust
/// use vesper_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (left * self.gain, right * self.gain)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut g = Gain { gain: 0.5 };
/// let mut frames = [1.0, -1.0, 0.5, 0.25, 9.0];
/// g.process_interleaved_inplace(&mut frames);
/// assert_eq!(frames, [0.5, -0.5, 0.25, 0.125, 9.0]);
/// ```
pub trait Effect {
    /// Process a single mono sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process one stereo frame.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a block of mono samples.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a mono block in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Process interleaved stereo frames in place.
    ///
    /// A trailing odd sample is not a complete frame and is left untouched.
    fn process_interleaved_inplace(&mut self, buffer: &mut [f32]) {
        for frame in buffer.chunks_exact_mut(2) {
            let (l, r) = self.process_stereo(frame[0], frame[1]);
            frame[0] = l;
            frame[1] = r;
        }
    }

    /// Update the sample rate and recompute rate-dependent state.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state without changing parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Default is 0.
    fn latency_samples(&self) -> usize {
        0
    }
}
