//! Vesper Core - building blocks for the vesper plate reverb
//!
//! Everything in the reverb network is assembled from a handful of small,
//! allocation-free primitives:
//!
//! - [`DelayLine`] - growable circular delay with sinusoidal modulation,
//!   fractional interpolation ([`Interpolation`]) and optional feedback
//! - [`diffuse`] / [`DiffusionStage`] - Schroeder all-pass diffusion on top of
//!   a delay line
//! - [`OnePole`] - one-pole lowpass used for bandwidth and damping
//! - [`Effect`] - object-safe processing trait (mono and stereo frames)
//! - [`ParameterInfo`] - runtime parameter discovery
//! - [`db_to_linear`], [`linear_to_db`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! vesper-core = { version = "0.1", default-features = false }
//! ```
//!
//! `alloc` is still required: delay lines own their storage.
//!
//! # Example
//!
//! ```rust
//! use vesper_core::{DelayLine, OnePole, diffuse};
//!
//! let mut bandwidth = OnePole::new(0.0005);
//! let mut line = DelayLine::with_length(142.0);
//!
//! let x = bandwidth.process(0.8);
//! let y = diffuse(&mut line, x, 0.75);
//! assert!(y.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay_line;
pub mod diffusion;
pub mod effect;
pub mod math;
pub mod one_pole;
pub mod param_info;

pub use delay_line::{DelayLine, INITIAL_DELAY, Interpolation, MIN_LENGTH};
pub use diffusion::{DiffusionStage, diffuse};
pub use effect::Effect;
pub use math::{db_to_linear, flush_denormal, linear_to_db};
pub use one_pole::OnePole;
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
