//! Parameter introspection for discoverable processor controls.
//!
//! The [`ParameterInfo`] trait lets front ends (the CLI, preset validation,
//! future hosts) enumerate a processor's controls, read them, and set them by
//! index without knowing the concrete type. Each control is described by a
//! [`ParamDescriptor`] carrying its display names, unit, range, default and a
//! stable identifier pair ([`ParamId`] plus a string id used in presets and on
//! the command line).
//!
//! # Example
//!
//! ```rust
//! use vesper_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Level {
//!     db: f32,
//! }
//!
//! impl ParameterInfo for Level {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Level", "Level", -60.0, 12.0, 0.0)
//!                 .with_id(ParamId(1), "level")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.db } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.db = value.clamp(-60.0, 12.0);
//!         }
//!     }
//! }
//!
//! let mut level = Level { db: 0.0 };
//! let idx = level.find_param_by_name("level").unwrap();
//! level.set_param(idx, 40.0);
//! assert_eq!(level.get_param(idx), 12.0);
//! ```

/// Stable parameter identifier that survives reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are addressed by a zero-based index in `0..param_count()`.
/// Implementations clamp in [`set_param`](Self::set_param) and ignore
/// out-of-range indices.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (`0.0` past the end).
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its descriptor range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches [`ParamDescriptor::name`], [`ParamDescriptor::short_name`] and
    /// [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }
}

/// Metadata for a single parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name (e.g. "Input Diffusion 1").
    pub name: &'static str,
    /// Short name, at most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum value.
    pub min: f32,
    /// Maximum value.
    pub max: f32,
    /// Default value.
    pub default: f32,
    /// Suggested increment for stepped controls.
    pub step: f32,
    /// Stable numeric id. `ParamId(0)` when unassigned.
    pub id: ParamId,
    /// Stable string id used in preset files and `key=value` overrides.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    const fn base(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Unitless amount in `[0, 1]`.
    pub const fn coefficient(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::base(name, short_name, ParamUnit::None, 0.0, 1.0, default, 0.01)
    }

    /// Time in seconds.
    pub const fn seconds(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Seconds, min, max, default, 0.001)
    }

    /// Frequency in Hz.
    pub const fn hertz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Hertz, min, max, default, 1.0)
    }

    /// Gain in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Decibels, min, max, default, 0.5)
    }

    /// Dimensionless multiplier (e.g. a size or depth factor).
    pub const fn multiplier(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Multiplier, min, max, default, 0.05)
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// ```rust
    /// use vesper_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::coefficient("Decay", "Decay", 0.7).with_id(ParamId(7), "decay");
    /// assert_eq!(desc.id, ParamId(7));
    /// assert_eq!(desc.string_id, "decay");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns `true` if `value` is finite and inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Hertz.
    Hertz,
    /// Seconds.
    Seconds,
    /// Scale factor.
    Multiplier,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Unit suffix for display.
    ///
    /// ```rust
    /// use vesper_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Seconds => " s",
            ParamUnit::Multiplier => "x",
            ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        a: f32,
        b: f32,
    }

    impl ParameterInfo for Pair {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(
                    ParamDescriptor::coefficient("Alpha Amount", "Alpha", 0.5)
                        .with_id(ParamId(10), "alpha"),
                ),
                1 => Some(
                    ParamDescriptor::hertz("Beta Cutoff", "Beta", 20.0, 20000.0, 1000.0)
                        .with_id(ParamId(11), "beta_cutoff"),
                ),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.a,
                1 => self.b,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            if let Some(desc) = self.param_info(index) {
                match index {
                    0 => self.a = desc.clamp(value),
                    1 => self.b = desc.clamp(value),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_find_by_any_name() {
        let p = Pair { a: 0.0, b: 0.0 };
        assert_eq!(p.find_param_by_name("alpha amount"), Some(0));
        assert_eq!(p.find_param_by_name("BETA"), Some(1));
        assert_eq!(p.find_param_by_name("beta_cutoff"), Some(1));
        assert_eq!(p.find_param_by_name("gamma"), None);
    }

    #[test]
    fn test_descriptor_ids() {
        let p = Pair { a: 0.0, b: 0.0 };
        assert_eq!(p.param_info(1).map(|d| d.id), Some(ParamId(11)));
        assert_eq!(p.param_info(0).map(|d| d.string_id), Some("alpha"));
        assert!(p.param_info(5).is_none());
    }

    #[test]
    fn test_set_param_clamps() {
        let mut p = Pair { a: 0.0, b: 0.0 };
        p.set_param(0, 3.0);
        assert_eq!(p.get_param(0), 1.0);
        p.set_param(1, 5.0);
        assert_eq!(p.get_param(1), 20.0);
        p.set_param(7, 1.0);
    }

    #[test]
    fn test_contains() {
        let desc = ParamDescriptor::coefficient("Decay", "Decay", 0.7);
        assert!(desc.contains(0.0));
        assert!(desc.contains(1.0));
        assert!(!desc.contains(1.01));
        assert!(!desc.contains(f32::NAN));
    }
}
