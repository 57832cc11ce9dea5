//! Typed reverb parameters.
//!
//! [`ParamKind`] names the twelve controls and carries their stable string
//! ids and descriptors. [`ReverbParam`] pairs a kind with a value and is what
//! [`ReverbNetwork::set`](crate::ReverbNetwork::set) accepts.
//! [`ReverbSettings`] is the plain value snapshot of all twelve.

use core::fmt;
use core::str::FromStr;

use vesper_core::{ParamDescriptor, ParamId};

/// Base [`ParamId`] for reverb parameters; ids are sequential in [`ParamKind::ALL`] order.
pub const PARAM_ID_BASE: u32 = 1500;

/// Identifies one reverb parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Predelay in seconds.
    Predelay,
    /// Input bandwidth in Hz.
    Bandwidth,
    /// Tank damping amount.
    Damping,
    /// Tank recirculation gain.
    Decay,
    /// Modulated tank diffuser coefficient.
    Diffusion1,
    /// Second tank diffuser coefficient.
    Diffusion2,
    /// Coefficient of the first two input diffusers.
    InputDiffusion1,
    /// Coefficient of the last two input diffusers.
    InputDiffusion2,
    /// Depth multiplier for the tank modulation.
    Modulation,
    /// Network size factor.
    Size,
    /// Wet level in dB.
    Wet,
    /// Dry level in dB.
    Dry,
}

impl ParamKind {
    /// Every parameter, in parameter-index order.
    pub const ALL: [ParamKind; 12] = [
        ParamKind::Predelay,
        ParamKind::Bandwidth,
        ParamKind::Damping,
        ParamKind::Decay,
        ParamKind::Diffusion1,
        ParamKind::Diffusion2,
        ParamKind::InputDiffusion1,
        ParamKind::InputDiffusion2,
        ParamKind::Modulation,
        ParamKind::Size,
        ParamKind::Wet,
        ParamKind::Dry,
    ];

    /// Stable string id used in presets and `key=value` overrides.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamKind::Predelay => "predelay",
            ParamKind::Bandwidth => "bandwidth",
            ParamKind::Damping => "damping",
            ParamKind::Decay => "decay",
            ParamKind::Diffusion1 => "diffusion1",
            ParamKind::Diffusion2 => "diffusion2",
            ParamKind::InputDiffusion1 => "input_diffusion1",
            ParamKind::InputDiffusion2 => "input_diffusion2",
            ParamKind::Modulation => "modulation",
            ParamKind::Size => "size",
            ParamKind::Wet => "wet",
            ParamKind::Dry => "dry",
        }
    }

    /// Position in [`ParamKind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display metadata and documented range.
    pub fn descriptor(self) -> ParamDescriptor {
        let desc = match self {
            ParamKind::Predelay => ParamDescriptor::seconds("Predelay", "PreDly", 0.0, 1.0, 0.001),
            ParamKind::Bandwidth => {
                ParamDescriptor::hertz("Bandwidth", "Bandwdth", 1.0, 96_000.0, 22_050.0)
            }
            ParamKind::Damping => ParamDescriptor::coefficient("Damping", "Damping", 0.05),
            ParamKind::Decay => ParamDescriptor::coefficient("Decay", "Decay", 0.7),
            ParamKind::Diffusion1 => ParamDescriptor::coefficient("Diffusion 1", "Diff1", 0.6),
            ParamKind::Diffusion2 => ParamDescriptor::coefficient("Diffusion 2", "Diff2", 0.6),
            ParamKind::InputDiffusion1 => {
                ParamDescriptor::coefficient("Input Diffusion 1", "InDiff1", 0.55)
            }
            ParamKind::InputDiffusion2 => {
                ParamDescriptor::coefficient("Input Diffusion 2", "InDiff2", 0.625)
            }
            ParamKind::Modulation => {
                ParamDescriptor::multiplier("Modulation", "Mod", 0.0, 4.0, 1.0)
            }
            ParamKind::Size => ParamDescriptor::multiplier("Size", "Size", 0.1, 4.0, 1.0),
            ParamKind::Wet => ParamDescriptor::gain_db("Wet Level", "Wet", -120.0, 12.0, -6.0),
            ParamKind::Dry => ParamDescriptor::gain_db("Dry Level", "Dry", -120.0, 12.0, 0.0),
        };
        desc.with_id(ParamId(PARAM_ID_BASE + self as u32), self.as_str())
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`ParamKind::from_str`] for an unrecognised id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseParamKindError;

impl fmt::Display for ParseParamKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown reverb parameter")
    }
}

impl core::error::Error for ParseParamKindError {}

/// Case-insensitive, treating `-` and `_` as the same character.
fn id_matches(id: &str, candidate: &str) -> bool {
    id.len() == candidate.len()
        && id.bytes().zip(candidate.bytes()).all(|(a, b)| {
            let b = if b == b'-' { b'_' } else { b };
            a.eq_ignore_ascii_case(&b)
        })
}

impl FromStr for ParamKind {
    type Err = ParseParamKindError;

    /// Parses a string id (`input_diffusion1`, `Input-Diffusion1`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| id_matches(kind.as_str(), s))
            .ok_or(ParseParamKindError)
    }
}

/// A parameter change: the kind together with its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReverbParam {
    /// Seconds.
    Predelay(f32),
    /// Hz.
    Bandwidth(f32),
    /// 0-1.
    Damping(f32),
    /// 0-1.
    Decay(f32),
    /// 0-1.
    Diffusion1(f32),
    /// 0-1.
    Diffusion2(f32),
    /// 0-1.
    InputDiffusion1(f32),
    /// 0-1.
    InputDiffusion2(f32),
    /// Depth multiplier, 0 disables modulation.
    Modulation(f32),
    /// Size factor.
    Size(f32),
    /// dB.
    Wet(f32),
    /// dB.
    Dry(f32),
}

impl ReverbParam {
    /// Builds the variant for `kind` carrying `value`.
    pub fn new(kind: ParamKind, value: f32) -> Self {
        match kind {
            ParamKind::Predelay => ReverbParam::Predelay(value),
            ParamKind::Bandwidth => ReverbParam::Bandwidth(value),
            ParamKind::Damping => ReverbParam::Damping(value),
            ParamKind::Decay => ReverbParam::Decay(value),
            ParamKind::Diffusion1 => ReverbParam::Diffusion1(value),
            ParamKind::Diffusion2 => ReverbParam::Diffusion2(value),
            ParamKind::InputDiffusion1 => ReverbParam::InputDiffusion1(value),
            ParamKind::InputDiffusion2 => ReverbParam::InputDiffusion2(value),
            ParamKind::Modulation => ReverbParam::Modulation(value),
            ParamKind::Size => ReverbParam::Size(value),
            ParamKind::Wet => ReverbParam::Wet(value),
            ParamKind::Dry => ReverbParam::Dry(value),
        }
    }

    /// Which parameter this change targets.
    pub fn kind(&self) -> ParamKind {
        match self {
            ReverbParam::Predelay(_) => ParamKind::Predelay,
            ReverbParam::Bandwidth(_) => ParamKind::Bandwidth,
            ReverbParam::Damping(_) => ParamKind::Damping,
            ReverbParam::Decay(_) => ParamKind::Decay,
            ReverbParam::Diffusion1(_) => ParamKind::Diffusion1,
            ReverbParam::Diffusion2(_) => ParamKind::Diffusion2,
            ReverbParam::InputDiffusion1(_) => ParamKind::InputDiffusion1,
            ReverbParam::InputDiffusion2(_) => ParamKind::InputDiffusion2,
            ReverbParam::Modulation(_) => ParamKind::Modulation,
            ReverbParam::Size(_) => ParamKind::Size,
            ReverbParam::Wet(_) => ParamKind::Wet,
            ReverbParam::Dry(_) => ParamKind::Dry,
        }
    }

    /// The carried value.
    pub fn value(&self) -> f32 {
        match *self {
            ReverbParam::Predelay(v)
            | ReverbParam::Bandwidth(v)
            | ReverbParam::Damping(v)
            | ReverbParam::Decay(v)
            | ReverbParam::Diffusion1(v)
            | ReverbParam::Diffusion2(v)
            | ReverbParam::InputDiffusion1(v)
            | ReverbParam::InputDiffusion2(v)
            | ReverbParam::Modulation(v)
            | ReverbParam::Size(v)
            | ReverbParam::Wet(v)
            | ReverbParam::Dry(v) => v,
        }
    }
}

/// Snapshot of every user-facing reverb parameter.
///
/// `Default` gives the stock voicing at 44.1 kHz. Use
/// [`for_sample_rate`](Self::for_sample_rate) when the bandwidth default
/// should track another rate.
///
/// ```rust
/// use vesper_reverb::{ParamKind, ReverbSettings};
///
/// let mut settings = ReverbSettings::for_sample_rate(48_000.0);
/// assert_eq!(settings.bandwidth, 24_000.0);
///
/// settings.set(ParamKind::Size, 2.0);
/// assert_eq!(settings.get(ParamKind::Size), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbSettings {
    /// Seconds.
    pub predelay: f32,
    /// Hz.
    pub bandwidth: f32,
    /// Tank damping.
    pub damping: f32,
    /// Tank recirculation gain.
    pub decay: f32,
    /// Modulated tank diffuser coefficient.
    pub diffusion1: f32,
    /// Second tank diffuser coefficient.
    pub diffusion2: f32,
    /// First input diffuser pair coefficient.
    pub input_diffusion1: f32,
    /// Second input diffuser pair coefficient.
    pub input_diffusion2: f32,
    /// Modulation depth multiplier.
    pub modulation: f32,
    /// Size factor.
    pub size: f32,
    /// Wet level, dB.
    pub wet: f32,
    /// Dry level, dB.
    pub dry: f32,
}

impl ReverbSettings {
    /// Stock voicing with the bandwidth at half of `sample_rate`.
    pub fn for_sample_rate(sample_rate: f32) -> Self {
        Self {
            predelay: 0.001,
            bandwidth: sample_rate / 2.0,
            damping: 0.05,
            decay: 0.7,
            diffusion1: 0.6,
            diffusion2: 0.6,
            input_diffusion1: 0.55,
            input_diffusion2: 0.625,
            modulation: 1.0,
            size: 1.0,
            wet: -6.0,
            dry: 0.0,
        }
    }

    /// Reads one parameter.
    pub fn get(&self, kind: ParamKind) -> f32 {
        match kind {
            ParamKind::Predelay => self.predelay,
            ParamKind::Bandwidth => self.bandwidth,
            ParamKind::Damping => self.damping,
            ParamKind::Decay => self.decay,
            ParamKind::Diffusion1 => self.diffusion1,
            ParamKind::Diffusion2 => self.diffusion2,
            ParamKind::InputDiffusion1 => self.input_diffusion1,
            ParamKind::InputDiffusion2 => self.input_diffusion2,
            ParamKind::Modulation => self.modulation,
            ParamKind::Size => self.size,
            ParamKind::Wet => self.wet,
            ParamKind::Dry => self.dry,
        }
    }

    /// Writes one parameter.
    pub fn set(&mut self, kind: ParamKind, value: f32) {
        let slot = match kind {
            ParamKind::Predelay => &mut self.predelay,
            ParamKind::Bandwidth => &mut self.bandwidth,
            ParamKind::Damping => &mut self.damping,
            ParamKind::Decay => &mut self.decay,
            ParamKind::Diffusion1 => &mut self.diffusion1,
            ParamKind::Diffusion2 => &mut self.diffusion2,
            ParamKind::InputDiffusion1 => &mut self.input_diffusion1,
            ParamKind::InputDiffusion2 => &mut self.input_diffusion2,
            ParamKind::Modulation => &mut self.modulation,
            ParamKind::Size => &mut self.size,
            ParamKind::Wet => &mut self.wet,
            ParamKind::Dry => &mut self.dry,
        };
        *slot = value;
    }

    /// Applies a [`ReverbParam`].
    pub fn apply(&mut self, param: ReverbParam) {
        self.set(param.kind(), param.value());
    }

    /// All twelve values as [`ReverbParam`]s, in [`ParamKind::ALL`] order.
    pub fn params(&self) -> impl Iterator<Item = ReverbParam> + '_ {
        ParamKind::ALL
            .into_iter()
            .map(|kind| ReverbParam::new(kind, self.get(kind)))
    }
}

impl Default for ReverbSettings {
    fn default() -> Self {
        Self::for_sample_rate(44_100.0)
    }
}
