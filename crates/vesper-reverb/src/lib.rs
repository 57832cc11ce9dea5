//! Vesper Reverb - Dattorro plate reverb network
//!
//! A stereo plate reverb built from the primitives in `vesper-core`:
//! predelay, bandwidth lowpass, four input diffusers and two cross-coupled
//! decay tanks with modulated diffusers and damping. The wet output is tapped
//! from six tank lines at fixed offsets, giving decorrelated left/right tails
//! from a single input.
//!
//! # Parameters
//!
//! | id | unit | default |
//! |---|---|---|
//! | `predelay` | s | 0.001 |
//! | `bandwidth` | Hz | sample rate / 2 |
//! | `damping` | 0-1 | 0.05 |
//! | `decay` | 0-1 | 0.7 |
//! | `diffusion1` / `diffusion2` | 0-1 | 0.6 / 0.6 |
//! | `input_diffusion1` / `input_diffusion2` | 0-1 | 0.55 / 0.625 |
//! | `modulation` | multiplier | 1.0 |
//! | `size` | multiplier | 1.0 |
//! | `wet` / `dry` | dB | -6 / 0 |
//!
//! Parameter changes take effect on the next frame without smoothing.
//!
//! # Example
//!
//! ```rust
//! use vesper_reverb::{ReverbNetwork, ReverbParam};
//!
//! let mut reverb = ReverbNetwork::new(44_100.0);
//! reverb.set(ReverbParam::Size(2.0));
//! reverb.set(ReverbParam::Wet(-1.0));
//!
//! let mut interleaved = vec![0.0f32; 2 * 4410];
//! interleaved[0] = 1.0;
//! reverb.process_stereo(&mut interleaved);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod buffer;
pub mod network;
pub mod params;

pub use network::{LineRole, OUTPUT_TAP_GAIN, REFERENCE_RATE, ReverbNetwork};
pub use params::{PARAM_ID_BASE, ParamKind, ParseParamKindError, ReverbParam, ReverbSettings};
