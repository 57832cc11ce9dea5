//! Buffer entry points and the [`Effect`] implementation.
//!
//! Both entry points transform the buffer in place, one frame per
//! [`ReverbNetwork::compute`] call, mixing `dry × input + wet × tap_output`
//! per channel.

use vesper_core::Effect;

use crate::network::ReverbNetwork;

impl ReverbNetwork {
    /// Processes a mono buffer in place.
    ///
    /// Each sample feeds both network inputs; the left wet output is used.
    pub fn process_mono(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let x = *sample;
            let (wet_left, _) = self.compute(x, x);
            *sample = self.dry_gain() * x + self.wet_gain() * wet_left;
        }
    }

    /// Processes an interleaved `[L, R, L, R, ...]` buffer in place.
    ///
    /// A trailing odd sample is not a frame and is left untouched.
    pub fn process_stereo(&mut self, buffer: &mut [f32]) {
        for frame in buffer.chunks_exact_mut(2) {
            let (left, right) = self.process_frame(frame[0], frame[1]);
            frame[0] = left;
            frame[1] = right;
        }
    }

    /// Processes one stereo frame and returns the mixed output.
    #[inline]
    pub fn process_frame(&mut self, left: f32, right: f32) -> (f32, f32) {
        let (wet_left, wet_right) = self.compute(left, right);
        let (dry, wet) = (self.dry_gain(), self.wet_gain());
        (dry * left + wet * wet_left, dry * right + wet * wet_right)
    }
}

impl Effect for ReverbNetwork {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let (wet_left, _) = self.compute(input, input);
        self.dry_gain() * input + self.wet_gain() * wet_left
    }

    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        self.process_frame(left, right)
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        self.process_mono(buffer);
    }

    fn process_interleaved_inplace(&mut self, buffer: &mut [f32]) {
        ReverbNetwork::process_stereo(self, buffer);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        ReverbNetwork::set_sample_rate(self, sample_rate);
    }

    fn reset(&mut self) {
        ReverbNetwork::reset(self);
    }

    fn latency_samples(&self) -> usize {
        self.predelay_samples()
    }
}
