//! Growable, modulating circular delay line.
//!
//! [`DelayLine`] is the single primitive every stage of the reverb network is
//! built from: the predelay, the input diffusers, the modulated tank
//! diffusers and the long recirculation delays are all instances of it,
//! configured differently.
//!
//! # Layout
//!
//! The buffer holds `2 × length` active samples. The read position sits
//! `length` samples ahead of the write cursor (modulo the active length),
//! which is the same as `length` samples behind it, so reading *before*
//! pushing yields the sample pushed `length` frames ago:
//!
//! ```text
//!            write_pos            write_pos + read_offset (+ excursion)
//!                │                          │
//!   [ . . . . . .W. . . . . . . . . . . . . R . . . . . . ]   len = 2 × read_offset
//! ```
//!
//! # Interpolation
//!
//! A non-integer length (or an active modulation) leaves a fractional
//! remainder. It is resolved by reading a second tap one slot further on and
//! blending the pair according to [`Interpolation`]. The all-pass mode is a
//! stateful first-order filter, so [`DelayLine::current_output`] takes
//! `&mut self`.
//!
//! # Memory
//!
//! Storage only grows. Growth happens in [`DelayLine::set_length`], never in
//! [`DelayLine::push`] or [`DelayLine::current_output`], so the per-sample
//! path is allocation-free.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::flush_denormal;

/// Read offset of a freshly created line, in samples.
pub const INITIAL_DELAY: usize = 256;

/// Lengths at or below this many samples are ignored by [`DelayLine::set_length`].
pub const MIN_LENGTH: f32 = 2.0;

/// Interpolation method for the fractional part of the read position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Truncate to the integer read position.
    None,
    /// Linear blend of the two adjacent taps.
    Linear,
    /// First-order all-pass fractional delay (stateful, flat magnitude response).
    #[default]
    Allpass,
}

/// Circular delay line with optional sinusoidal modulation, fractional
/// interpolation and internal feedback.
///
/// # Example
///
/// ```rust
/// use vesper_core::DelayLine;
///
/// let mut line = DelayLine::new();
/// line.set_length(10.0);
///
/// let mut out = Vec::new();
/// for n in 0..12 {
///     out.push(line.current_output());
///     line.push(if n == 0 { 1.0 } else { 0.0 });
/// }
/// assert_eq!(out[10], 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    /// Active length (`n_samples`), always `2 × read_offset` after a valid `set_length`.
    len: usize,
    read_offset: usize,
    write_pos: usize,

    /// Fractional remainder left over by `set_length`.
    length_fraction: f32,
    /// Fraction used by the interpolator (length remainder or modulation remainder).
    read_fraction: f32,
    /// Integer part of the current modulation offset.
    excursion: isize,

    phase: f64,
    mod_frequency: f32,
    mod_extent: f32,
    modulated: bool,

    interpolation: Interpolation,
    feedback: f32,
    allpass_state: f32,
}

impl DelayLine {
    /// Creates a line with capacity for `2 × INITIAL_DELAY` samples.
    ///
    /// Defaults: read offset [`INITIAL_DELAY`], all-pass interpolation,
    /// no modulation, no feedback.
    pub fn new() -> Self {
        Self {
            buffer: vec![0.0; INITIAL_DELAY * 2],
            len: INITIAL_DELAY * 2,
            read_offset: INITIAL_DELAY,
            write_pos: 0,
            length_fraction: 0.0,
            read_fraction: 0.0,
            excursion: 0,
            phase: 0.0,
            mod_frequency: 0.0,
            mod_extent: 0.0,
            modulated: false,
            interpolation: Interpolation::Allpass,
            feedback: 0.0,
            allpass_state: 0.0,
        }
    }

    /// Creates a line already set to `length` samples.
    pub fn with_length(length: f32) -> Self {
        let mut line = Self::new();
        line.set_length(length);
        line
    }

    /// Sets the interpolation method used by [`current_output`](Self::current_output).
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Returns the interpolation method.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Sets the internal feedback coefficient. Zero disables feedback.
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback;
    }

    /// Returns the feedback coefficient.
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Sets the modulation depth (in samples) and rate (cycles per sample).
    ///
    /// An extent of exactly zero switches modulation off: the excursion drops
    /// back to zero and the interpolator returns to the remainder left by
    /// [`set_length`](Self::set_length).
    pub fn set_modulation(&mut self, extent: f32, frequency: f32) {
        self.mod_extent = extent;
        self.mod_frequency = frequency;
        self.modulated = extent != 0.0;

        if !self.modulated {
            self.excursion = 0;
            self.read_fraction = self.length_fraction;
        }
    }

    /// Returns `true` while the read position is being modulated.
    pub fn is_modulated(&self) -> bool {
        self.modulated
    }

    /// Sets the delay length in samples.
    ///
    /// Grows storage to `2 × ⌈length⌉ + 1` when needed (new samples are
    /// zeroed, storage never shrinks), places the read position `⌊length⌋`
    /// ahead of the write cursor and keeps the remainder for interpolation.
    ///
    /// Lengths rejected by [`accepts_length`](Self::accepts_length) leave the
    /// line untouched.
    pub fn set_length(&mut self, length: f32) {
        let Some(required) = required_capacity(length) else {
            return;
        };

        let whole = length as usize;
        if required > self.buffer.len() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = self.buffer.len(),
                to = required,
                "delay line grown"
            );
            self.buffer.resize(required, 0.0);
        }

        self.read_offset = whole;
        self.len = whole * 2;
        self.length_fraction = length - whole as f32;
        if !self.modulated {
            self.read_fraction = self.length_fraction;
        }

        if self.write_pos >= self.len {
            self.write_pos %= self.len;
        }
    }

    /// Returns `true` if [`set_length`](Self::set_length) would apply `length`.
    ///
    /// Rejects lengths `≤ MIN_LENGTH`, NaN, infinities, and lengths whose
    /// storage could not be addressed.
    ///
    /// ```rust
    /// use vesper_core::DelayLine;
    ///
    /// assert!(DelayLine::accepts_length(480.0));
    /// assert!(!DelayLine::accepts_length(2.0));
    /// assert!(!DelayLine::accepts_length(1e30));
    /// ```
    pub fn accepts_length(length: f32) -> bool {
        required_capacity(length).is_some()
    }

    /// Configured length in samples, including the fractional remainder.
    pub fn length(&self) -> f32 {
        self.read_offset as f32 + self.length_fraction
    }

    /// Writes one sample and advances the line by one frame.
    ///
    /// When modulated, the modulation phase advances and a new excursion is
    /// derived from it. The phase is never wrapped. With a non-zero feedback
    /// coefficient the sample just written also receives
    /// `feedback × current_output()`.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        let pos = self.write_pos;
        self.buffer[pos] = sample;
        self.write_pos = if pos + 1 >= self.len { 0 } else { pos + 1 };

        if self.modulated {
            self.phase += core::f64::consts::TAU * f64::from(self.mod_frequency);

            // Keep the read tap strictly away from the write cursor.
            let limit = self.read_offset.saturating_sub(1) as f32;
            let extent = self.mod_extent.clamp(-limit, limit);

            let offset = libm::sin(self.phase) * f64::from(extent);
            let floor = libm::floor(offset);
            self.excursion = floor as isize;
            self.read_fraction = (offset - floor) as f32;
        }

        if self.feedback != 0.0 {
            let fed_back = self.feedback * self.current_output();
            self.buffer[pos] = flush_denormal(self.buffer[pos] + fed_back);
        }
    }

    /// Returns the (possibly interpolated) output at the read position.
    ///
    /// Does not advance the line, but the all-pass interpolator updates its
    /// internal state on every call.
    #[inline]
    pub fn current_output(&mut self) -> f32 {
        let len = self.len as isize;
        let base = self.write_pos as isize + self.read_offset as isize + self.excursion;
        let a = self.buffer[base.rem_euclid(len) as usize];
        let b = self.buffer[(base + 1).rem_euclid(len) as usize];

        if self.read_fraction == 0.0 {
            return a;
        }

        match self.interpolation {
            Interpolation::None => a,
            Interpolation::Linear => (1.0 - self.read_fraction) * a + self.read_fraction * b,
            Interpolation::Allpass => {
                let eta = 1.0 - self.read_fraction;
                let coeff = (1.0 - eta) / (1.0 + eta);
                let out = b * coeff + a - coeff * self.allpass_state;
                self.allpass_state = flush_denormal(out);
                out
            }
        }
    }

    /// Reads the sample written `index` pushes ago (`index = 1` is the most
    /// recent one), ignoring modulation and interpolation.
    #[inline]
    pub fn tap_at(&self, index: usize) -> f32 {
        let len = self.len as isize;
        let pos = (self.write_pos as isize - index as isize).rem_euclid(len);
        self.buffer[pos as usize]
    }

    /// Zeroes the stored samples and interpolator/modulation state.
    ///
    /// Length, capacity and configuration are kept.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
        self.allpass_state = 0.0;
        self.phase = 0.0;
        self.excursion = 0;
        self.read_fraction = self.length_fraction;
    }

    /// Integer delay in samples (the read offset).
    pub fn delay_samples(&self) -> usize {
        self.read_offset
    }

    /// Fractional remainder of the configured length.
    pub fn fraction(&self) -> f32 {
        self.length_fraction
    }

    /// Active number of samples in the circular buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: an active line holds at least `2 × 3` samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated storage in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

/// Storage needed for `length`: `2 × ⌈length⌉ + 1` samples, or `None` when
/// the length is degenerate or the buffer would exceed `isize::MAX` bytes.
fn required_capacity(length: f32) -> Option<usize> {
    if !length.is_finite() || length <= MIN_LENGTH {
        return None;
    }
    let limit = isize::MAX.unsigned_abs() / core::mem::size_of::<f32>();
    // Float-to-int casts saturate, so an oversized length lands on usize::MAX.
    (libm::ceilf(length) as usize)
        .checked_mul(2)
        .and_then(|n| n.checked_add(1))
        .filter(|&n| n <= limit)
}

impl Default for DelayLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads before pushing, the way a diffusion stage does.
    fn run(line: &mut DelayLine, input: &[f32]) -> Vec<f32> {
        input
            .iter()
            .map(|&x| {
                let y = line.current_output();
                line.push(x);
                y
            })
            .collect()
    }

    fn impulse(len: usize) -> Vec<f32> {
        let mut v = vec![0.0; len];
        v[0] = 1.0;
        v
    }

    #[test]
    fn test_new_line_defaults() {
        let line = DelayLine::new();
        assert_eq!(line.capacity(), 512);
        assert_eq!(line.len(), 512);
        assert_eq!(line.delay_samples(), INITIAL_DELAY);
        assert_eq!(line.interpolation(), Interpolation::Allpass);
        assert!(!line.is_modulated());
    }

    #[test]
    fn test_integer_length_is_pure_delay() {
        let mut line = DelayLine::with_length(10.0);
        let out = run(&mut line, &impulse(30));

        for (n, &y) in out.iter().enumerate() {
            let expected = if n == 10 { 1.0 } else { 0.0 };
            assert_eq!(y, expected, "frame {n}");
        }
    }

    #[test]
    fn test_linear_interpolation_splits_impulse() {
        let mut line = DelayLine::with_length(10.5);
        line.set_interpolation(Interpolation::Linear);
        let out = run(&mut line, &impulse(30));

        assert!((out[9] - 0.5).abs() < 1e-6, "got {}", out[9]);
        assert!((out[10] - 0.5).abs() < 1e-6, "got {}", out[10]);
        let rest: f32 = out
            .iter()
            .enumerate()
            .filter(|(n, _)| *n != 9 && *n != 10)
            .map(|(_, y)| y.abs())
            .sum();
        assert_eq!(rest, 0.0);
    }

    #[test]
    fn test_no_interpolation_truncates() {
        let mut line = DelayLine::with_length(10.5);
        line.set_interpolation(Interpolation::None);
        let out = run(&mut line, &impulse(30));
        assert_eq!(out[10], 1.0);
        assert_eq!(out[9], 0.0);
    }

    #[test]
    fn test_allpass_interpolation_has_unity_dc_gain() {
        let mut line = DelayLine::with_length(10.5);
        let out = run(&mut line, &[1.0; 400]);
        let last = *out.last().unwrap();
        assert!((last - 1.0).abs() < 1e-4, "DC should settle to 1.0, got {last}");
    }

    #[test]
    fn test_set_length_grows_capacity_and_zero_fills() {
        let mut line = DelayLine::new();
        line.set_length(1000.25);

        assert_eq!(line.capacity(), 2 * 1001 + 1);
        assert_eq!(line.len(), 2000);
        assert_eq!(line.delay_samples(), 1000);
        assert!((line.fraction() - 0.25).abs() < 1e-6);
        assert!(line.buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_set_length_never_shrinks_capacity() {
        let mut line = DelayLine::with_length(1000.0);
        let capacity = line.capacity();
        line.set_length(100.0);
        assert_eq!(line.capacity(), capacity);
        assert_eq!(line.len(), 200);
        assert_eq!(line.delay_samples(), 100);
    }

    #[test]
    fn test_degenerate_lengths_are_ignored() {
        let mut line = DelayLine::with_length(40.0);
        for bad in [2.0, 1.5, 0.0, -10.0, f32::NAN, f32::INFINITY] {
            line.set_length(bad);
            assert_eq!(line.delay_samples(), 40, "length {bad} should be ignored");
            assert_eq!(line.len(), 80);
        }
    }

    #[test]
    fn test_oversized_lengths_are_ignored() {
        let mut line = DelayLine::with_length(40.5);
        let capacity = line.capacity();
        for huge in [1e19, 1e30, f32::MAX] {
            assert!(!DelayLine::accepts_length(huge));
            line.set_length(huge);
            assert_eq!(line.delay_samples(), 40, "length {huge} should be ignored");
            assert_eq!(line.capacity(), capacity);
            assert_eq!(line.length(), 40.5);
        }
    }

    #[test]
    fn test_length_reports_fraction() {
        let line = DelayLine::with_length(12.25);
        assert_eq!(line.length(), 12.25);
        assert!(DelayLine::accepts_length(12.25));
    }

    #[test]
    fn test_shrinking_rewraps_write_cursor() {
        let mut line = DelayLine::new();
        for _ in 0..450 {
            line.push(0.1);
        }
        assert_eq!(line.write_pos, 450);

        line.set_length(50.0);
        assert!(line.write_pos < line.len());
        assert_eq!(line.write_pos, 50);
    }

    #[test]
    fn test_write_cursor_wraps() {
        let mut line = DelayLine::with_length(3.0);
        for n in 0..100 {
            line.push(n as f32);
            assert!(line.write_pos < line.len());
        }
    }

    #[test]
    fn test_tap_at_reads_history() {
        let mut line = DelayLine::with_length(8.0);
        for n in 1..=5 {
            line.push(n as f32);
        }
        assert_eq!(line.tap_at(1), 5.0);
        assert_eq!(line.tap_at(3), 3.0);
        assert_eq!(line.tap_at(5), 1.0);
    }

    #[test]
    fn test_tap_at_is_pure() {
        let mut line = DelayLine::with_length(20.0);
        line.set_modulation(3.0, 0.01);
        for n in 0..57 {
            line.push(libm::sinf(n as f32 * 0.3));
        }

        let first: Vec<f32> = (0..40).map(|i| line.tap_at(i)).collect();
        let second: Vec<f32> = (0..40).map(|i| line.tap_at(i)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tap_at_wraps_large_index() {
        let mut line = DelayLine::with_length(4.0);
        for n in 1..=8 {
            line.push(n as f32);
        }
        // len = 8, so index 9 wraps onto index 1
        assert_eq!(line.tap_at(9), line.tap_at(1));
    }

    #[test]
    fn test_unmodulated_output_matches_fixed_tap() {
        let mut line = DelayLine::with_length(16.0);
        line.set_modulation(0.0, 0.02);

        for n in 0..200 {
            let expected = line.tap_at(line.delay_samples());
            assert_eq!(line.current_output(), expected, "frame {n}");
            line.push(libm::sinf(n as f32 * 0.17));
        }
    }

    #[test]
    fn test_zero_extent_matches_never_modulated_line() {
        let mut plain = DelayLine::with_length(33.7);
        let mut switched = DelayLine::with_length(33.7);
        switched.set_modulation(12.0, 0.001);
        switched.set_modulation(0.0, 0.001);

        for n in 0..500 {
            let x = libm::sinf(n as f32 * 0.05);
            assert_eq!(plain.current_output(), switched.current_output());
            plain.push(x);
            switched.push(x);
        }
    }

    #[test]
    fn test_modulation_excursion_is_bounded() {
        let mut line = DelayLine::with_length(100.0);
        line.set_modulation(5.0, 0.01);
        assert!(line.is_modulated());

        for _ in 0..1000 {
            line.push(0.0);
            assert!(line.excursion.abs() <= 5);
            assert!((0.0..=1.0).contains(&line.read_fraction));
        }
    }

    #[test]
    fn test_modulation_extent_clamped_to_read_offset() {
        let mut line = DelayLine::with_length(10.0);
        line.set_modulation(200.0, 0.05);

        let mut widest = 0;
        for _ in 0..1000 {
            line.push(1.0);
            widest = widest.max(line.excursion.abs());
            assert!(line.current_output().is_finite());
        }
        assert!(widest <= 9, "excursion {widest} must stay below the read offset");
    }

    #[test]
    fn test_feedback_produces_decaying_echoes() {
        let mut line = DelayLine::with_length(4.0);
        line.set_interpolation(Interpolation::None);
        line.set_feedback(0.5);

        let out = run(&mut line, &impulse(40));
        assert_eq!(out[4], 1.0);

        let echoes: Vec<f32> = out[5..].iter().copied().filter(|&y| y != 0.0).collect();
        assert!(echoes.len() >= 2, "expected recirculating echoes, got {echoes:?}");
        assert_eq!(echoes[0], 0.5);
        assert_eq!(echoes[1], 0.25);
    }

    #[test]
    fn test_without_feedback_single_echo() {
        let mut line = DelayLine::with_length(4.0);
        let out = run(&mut line, &impulse(40));
        assert_eq!(out.iter().filter(|&&y| y != 0.0).count(), 1);
    }

    #[test]
    fn test_clear_silences_line() {
        let mut line = DelayLine::with_length(12.5);
        run(&mut line, &[0.7; 64]);
        line.clear();
        let out = run(&mut line, &[0.0; 64]);
        assert!(out.iter().all(|&y| y == 0.0));
    }
}
