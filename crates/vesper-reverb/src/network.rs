//! The Dattorro plate network.
//!
//! ```text
//!            ┌──────────┐  ┌────┐  ┌──────────────────────────────┐
//! (L+R)/2 ──►│ predelay ├─►│ bw ├─►│ 142 → 107 → 379 → 277 (diff) │──┬──────────┐
//!            └──────────┘  └────┘  └──────────────────────────────┘  │          │
//!                                                                    ▼          ▼
//!              ┌─── decay × out(3163) ──────────────────────────►  (+) p      (+) q ◄── decay × out(3720)
//!              │                                                   │          │
//!              │   tank A:  672~ (diff) → 4453 → damp → ×decay → 1800 (diff) → 3720 ──┐
//!              │   tank B:  908~ (diff) → 4217 → damp → ×decay → 2656 (diff) → 3163 ──┤
//!              └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths are in samples at the 29761 Hz reference rate and scale with
//! `size × sample_rate / 29761`. `~` marks the two modulated diffusers.
//! Each tank is seeded from the *other* tank's recirculation delay, so
//! energy alternates between them. The stereo output is a fixed weighted sum
//! of seven taps per channel into six of the tank lines.

use vesper_core::{
    DelayLine, OnePole, ParamDescriptor, ParameterInfo, db_to_linear, diffuse,
};

use crate::params::{ParamKind, ReverbParam, ReverbSettings};

/// Sample rate the canonical line lengths are tuned for.
pub const REFERENCE_RATE: f32 = 29_761.0;

/// Weight magnitude of every output tap.
pub const OUTPUT_TAP_GAIN: f32 = 0.6;

const TANK_A_MOD_DEPTH: f32 = 60.0;
const TANK_A_MOD_RATE_HZ: f32 = 1.25;
const TANK_B_MOD_DEPTH: f32 = 40.0;
const TANK_B_MOD_RATE_HZ: f32 = 4.87;

/// Role of each of the twelve network lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// First input diffuser (142).
    Input1,
    /// Second input diffuser (107).
    Input2,
    /// Third input diffuser (379).
    Input3,
    /// Fourth input diffuser (277).
    Input4,
    /// Tank A modulated diffuser (672).
    TankAModulated,
    /// Tank A damped long delay (4453).
    TankADelay,
    /// Tank A second diffuser (1800).
    TankADiffuser,
    /// Tank A recirculation delay (3720), seeds tank B.
    TankARecirculation,
    /// Tank B modulated diffuser (908).
    TankBModulated,
    /// Tank B damped long delay (4217).
    TankBDelay,
    /// Tank B second diffuser (2656).
    TankBDiffuser,
    /// Tank B recirculation delay (3163), seeds tank A.
    TankBRecirculation,
}

impl LineRole {
    /// All roles, in storage order.
    pub const ALL: [LineRole; 12] = [
        LineRole::Input1,
        LineRole::Input2,
        LineRole::Input3,
        LineRole::Input4,
        LineRole::TankAModulated,
        LineRole::TankADelay,
        LineRole::TankADiffuser,
        LineRole::TankARecirculation,
        LineRole::TankBModulated,
        LineRole::TankBDelay,
        LineRole::TankBDiffuser,
        LineRole::TankBRecirculation,
    ];

    /// Canonical length in samples at [`REFERENCE_RATE`].
    pub const fn base_length(self) -> f32 {
        match self {
            LineRole::Input1 => 142.0,
            LineRole::Input2 => 107.0,
            LineRole::Input3 => 379.0,
            LineRole::Input4 => 277.0,
            LineRole::TankAModulated => 672.0,
            LineRole::TankADelay => 4453.0,
            LineRole::TankADiffuser => 1800.0,
            LineRole::TankARecirculation => 3720.0,
            LineRole::TankBModulated => 908.0,
            LineRole::TankBDelay => 4217.0,
            LineRole::TankBDiffuser => 2656.0,
            LineRole::TankBRecirculation => 3163.0,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One output tap: line, historical index, signed weight.
type Tap = (LineRole, usize, f32);

const LEFT_TAPS: [Tap; 7] = [
    (LineRole::TankBDelay, 266, 1.0),
    (LineRole::TankBDelay, 2974, 1.0),
    (LineRole::TankBDiffuser, 1913, -1.0),
    (LineRole::TankBRecirculation, 1996, 1.0),
    (LineRole::TankADelay, 1990, -1.0),
    (LineRole::TankADiffuser, 187, -1.0),
    (LineRole::TankARecirculation, 1066, -1.0),
];

const RIGHT_TAPS: [Tap; 7] = [
    (LineRole::TankADelay, 353, 1.0),
    (LineRole::TankADelay, 3627, 1.0),
    (LineRole::TankADiffuser, 1228, -1.0),
    (LineRole::TankARecirculation, 2673, 1.0),
    (LineRole::TankBDelay, 2111, -1.0),
    (LineRole::TankBDiffuser, 335, -1.0),
    (LineRole::TankBRecirculation, 121, -1.0),
];

/// Dattorro plate reverb network.
///
/// Owns the predelay and the twelve network lines exclusively. `compute`
/// is allocation-free; only predelay and size changes may grow storage.
///
/// # Example
///
/// ```rust
/// use vesper_reverb::{ReverbNetwork, ReverbParam};
///
/// let mut reverb = ReverbNetwork::new(48_000.0);
/// reverb.set(ReverbParam::Decay(0.85));
/// reverb.set_size(1.5);
///
/// let (wet_l, wet_r) = reverb.compute(1.0, 0.0);
/// assert!(wet_l.is_finite() && wet_r.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct ReverbNetwork {
    sample_rate: f32,
    settings: ReverbSettings,

    predelay: DelayLine,
    lines: [DelayLine; 12],

    bandwidth: OnePole,
    damping_a: OnePole,
    damping_b: OnePole,

    decay: f32,
    decay_diffusion1: f32,
    decay_diffusion2: f32,
    input_diffusion1: f32,
    input_diffusion2: f32,
    wet: f32,
    dry: f32,
}

impl ReverbNetwork {
    /// Creates a network at `sample_rate` with the stock settings
    /// (bandwidth at half the sample rate).
    pub fn new(sample_rate: f32) -> Self {
        let mut network = Self {
            sample_rate,
            settings: ReverbSettings::for_sample_rate(sample_rate),
            predelay: DelayLine::new(),
            lines: core::array::from_fn(|_| DelayLine::new()),
            bandwidth: OnePole::default(),
            damping_a: OnePole::default(),
            damping_b: OnePole::default(),
            decay: 0.0,
            decay_diffusion1: 0.0,
            decay_diffusion2: 0.0,
            input_diffusion1: 0.0,
            input_diffusion2: 0.0,
            wet: 0.0,
            dry: 0.0,
        };
        network.apply_settings(network.settings);
        network
    }

    /// Creates a network and applies `settings` on top of the stock ones.
    ///
    /// A predelay too short for a delay line keeps the stock 1 ms.
    pub fn with_settings(sample_rate: f32, settings: ReverbSettings) -> Self {
        let mut network = Self::new(sample_rate);
        network.apply_settings(settings);
        network
    }

    /// Applies every value in `settings`.
    pub fn apply_settings(&mut self, settings: ReverbSettings) {
        for param in settings.params() {
            self.set(param);
        }
    }

    /// Applies one parameter change.
    ///
    /// Values are used exactly as given; nothing is clamped or rejected.
    pub fn set(&mut self, param: ReverbParam) {
        #[cfg(feature = "tracing")]
        tracing::debug!(param = param.kind().as_str(), value = param.value(), "reverb parameter");

        match param {
            ReverbParam::Predelay(seconds) => self.set_predelay(seconds),
            ReverbParam::Bandwidth(hz) => self.set_bandwidth(hz),
            ReverbParam::Damping(v) => self.set_damping(v),
            ReverbParam::Decay(v) => self.set_decay(v),
            ReverbParam::Diffusion1(v) => self.set_diffusion1(v),
            ReverbParam::Diffusion2(v) => self.set_diffusion2(v),
            ReverbParam::InputDiffusion1(v) => self.set_input_diffusion1(v),
            ReverbParam::InputDiffusion2(v) => self.set_input_diffusion2(v),
            ReverbParam::Modulation(v) => self.set_modulation(v),
            ReverbParam::Size(v) => self.set_size(v),
            ReverbParam::Wet(db) => self.set_wet(db),
            ReverbParam::Dry(db) => self.set_dry(db),
        }
    }

    /// Predelay in seconds. Lengths of 2 samples or less keep the previous predelay.
    ///
    /// A length the predelay line cannot take (two samples or less, or
    /// unaddressable) keeps the current delay, and the settings report the
    /// delay still in effect.
    pub fn set_predelay(&mut self, seconds: f32) {
        let length = seconds * self.sample_rate;
        if DelayLine::accepts_length(length) {
            self.settings.predelay = seconds;
            self.predelay.set_length(length);
        } else {
            self.settings.predelay = self.predelay.length() / self.sample_rate;
        }
    }

    /// Input bandwidth in Hz; the lowpass passes `hz / sample_rate` of each new sample.
    pub fn set_bandwidth(&mut self, hz: f32) {
        self.settings.bandwidth = hz;
        self.bandwidth.set_coefficient(1.0 - hz / self.sample_rate);
    }

    /// Tank damping, 0 (bright) to 1 (frozen).
    pub fn set_damping(&mut self, damping: f32) {
        self.settings.damping = damping;
        self.damping_a.set_coefficient(damping);
        self.damping_b.set_coefficient(damping);
    }

    /// Tank recirculation gain.
    pub fn set_decay(&mut self, decay: f32) {
        self.settings.decay = decay;
        self.decay = decay;
    }

    /// Coefficient of the modulated tank diffusers.
    pub fn set_diffusion1(&mut self, coefficient: f32) {
        self.settings.diffusion1 = coefficient;
        self.decay_diffusion1 = coefficient;
    }

    /// Coefficient of the second tank diffusers.
    pub fn set_diffusion2(&mut self, coefficient: f32) {
        self.settings.diffusion2 = coefficient;
        self.decay_diffusion2 = coefficient;
    }

    /// Coefficient of input diffusers 1 and 2.
    pub fn set_input_diffusion1(&mut self, coefficient: f32) {
        self.settings.input_diffusion1 = coefficient;
        self.input_diffusion1 = coefficient;
    }

    /// Coefficient of input diffusers 3 and 4.
    pub fn set_input_diffusion2(&mut self, coefficient: f32) {
        self.settings.input_diffusion2 = coefficient;
        self.input_diffusion2 = coefficient;
    }

    /// Modulation depth multiplier. Zero switches both modulated lines off.
    pub fn set_modulation(&mut self, amount: f32) {
        self.settings.modulation = amount;
        self.lines[LineRole::TankAModulated.index()].set_modulation(
            TANK_A_MOD_DEPTH * amount,
            TANK_A_MOD_RATE_HZ / self.sample_rate,
        );
        self.lines[LineRole::TankBModulated.index()].set_modulation(
            TANK_B_MOD_DEPTH * amount,
            TANK_B_MOD_RATE_HZ / self.sample_rate,
        );
    }

    /// Rescales all twelve network lines by `size × sample_rate / 29761`.
    pub fn set_size(&mut self, size: f32) {
        self.settings.size = size;
        let ratio = size * self.sample_rate / REFERENCE_RATE;
        for role in LineRole::ALL {
            self.lines[role.index()].set_length(role.base_length() * ratio);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(size, ratio, "reverb lines resized");
    }

    /// Wet level in dB.
    pub fn set_wet(&mut self, db: f32) {
        self.settings.wet = db;
        self.wet = db_to_linear(db);
    }

    /// Dry level in dB.
    pub fn set_dry(&mut self, db: f32) {
        self.settings.dry = db;
        self.dry = db_to_linear(db);
    }

    /// The values in effect. A rejected predelay reports the delay kept.
    pub fn settings(&self) -> &ReverbSettings {
        &self.settings
    }

    /// Current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Linear wet gain.
    pub fn wet_gain(&self) -> f32 {
        self.wet
    }

    /// Linear dry gain.
    pub fn dry_gain(&self) -> f32 {
        self.dry
    }

    /// Integer length in samples of a network line.
    pub fn line_length(&self, role: LineRole) -> usize {
        self.lines[role.index()].delay_samples()
    }

    /// Integer predelay in samples.
    pub fn predelay_samples(&self) -> usize {
        self.predelay.delay_samples()
    }

    /// Reads `index` pushes back into a network line without touching its state.
    pub fn tap(&self, role: LineRole, index: usize) -> f32 {
        self.lines[role.index()].tap_at(index)
    }

    /// Re-derives every rate-dependent quantity for a new sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.apply_settings(self.settings);
    }

    /// Clears all lines and filter states. Parameters are kept.
    pub fn reset(&mut self) {
        self.predelay.clear();
        for line in &mut self.lines {
            line.clear();
        }
        self.bandwidth.reset();
        self.damping_a.reset();
        self.damping_b.reset();
    }

    #[inline]
    fn line(&mut self, role: LineRole) -> &mut DelayLine {
        &mut self.lines[role.index()]
    }

    /// Advances the network by one frame and returns the wet stereo output.
    #[inline]
    pub fn compute(&mut self, left: f32, right: f32) -> (f32, f32) {
        let x = (left + right) * 0.5;

        self.predelay.push(x);
        let x = self.bandwidth.process(self.predelay.current_output());

        let (id1, id2) = (self.input_diffusion1, self.input_diffusion2);
        let x = diffuse(self.line(LineRole::Input1), x, id1);
        let x = diffuse(self.line(LineRole::Input2), x, id1);
        let x = diffuse(self.line(LineRole::Input3), x, id2);
        let x = diffuse(self.line(LineRole::Input4), x, id2);

        let decay = self.decay;
        let p = decay * self.line(LineRole::TankBRecirculation).current_output() + x;
        let q = decay * self.line(LineRole::TankARecirculation).current_output() + x;

        let (dd1, dd2) = (self.decay_diffusion1, self.decay_diffusion2);

        let p = diffuse(self.line(LineRole::TankAModulated), p, dd1);
        self.line(LineRole::TankADelay).push(p);
        let p = self.line(LineRole::TankADelay).current_output();
        let p = self.damping_a.process(p) * decay;
        let p = diffuse(self.line(LineRole::TankADiffuser), p, dd2);
        self.line(LineRole::TankARecirculation).push(p);

        let q = diffuse(self.line(LineRole::TankBModulated), q, dd1);
        self.line(LineRole::TankBDelay).push(q);
        let q = self.line(LineRole::TankBDelay).current_output();
        let q = self.damping_b.process(q) * decay;
        let q = diffuse(self.line(LineRole::TankBDiffuser), q, dd2);
        self.line(LineRole::TankBRecirculation).push(q);

        (self.sum_taps(&LEFT_TAPS), self.sum_taps(&RIGHT_TAPS))
    }

    #[inline]
    fn sum_taps(&self, taps: &[Tap]) -> f32 {
        taps.iter()
            .map(|&(role, index, sign)| sign * self.tap(role, index))
            .sum::<f32>()
            * OUTPUT_TAP_GAIN
    }
}

impl ParameterInfo for ReverbNetwork {
    fn param_count(&self) -> usize {
        ParamKind::ALL.len()
    }

    /// Bandwidth is bounded by the current sample rate so the input lowpass
    /// coefficient stays in `[0, 1]`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        ParamKind::from_index(index).map(|kind| {
            let desc = kind.descriptor();
            if kind == ParamKind::Bandwidth {
                ParamDescriptor {
                    max: self.sample_rate,
                    default: self.sample_rate / 2.0,
                    ..desc
                }
            } else {
                desc
            }
        })
    }

    fn get_param(&self, index: usize) -> f32 {
        ParamKind::from_index(index).map_or(0.0, |kind| self.settings.get(kind))
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let (Some(kind), Some(desc)) = (ParamKind::from_index(index), self.param_info(index)) {
            self.set(ReverbParam::new(kind, desc.clamp(value)));
        }
    }
}
