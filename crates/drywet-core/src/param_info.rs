//! Parameter metadata for host automation and preset persistence.
//!
//! Each user-facing control of the mixer is described by a [`ParamDescriptor`]
//! containing display metadata, the valid range and a stable [`ParamId`] that
//! hosts use to record automation and to key saved state.
//!
//! This module is fully `no_std` compatible with no heap allocations required.
//!
//! # Example
//!
//! ```rust
//! use drywet_core::{ParamDescriptor, ParamId};
//!
//! let dry = ParamDescriptor::gain_db("Dry Gain", "Dry", -60.0, 12.0, 0.0)
//!     .with_id(ParamId(100), "dry_gain");
//! assert_eq!(dry.clamp(30.0), 12.0);
//! assert_eq!(dry.normalize(-60.0), 0.0);
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Used by plugin hosts for automation recording, preset save/restore,
/// and parameter mapping. Once assigned, a `ParamId` MUST NEVER change
/// for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Describes a single parameter: display names, unit, range and identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Dry Gain").
    pub name: &'static str,

    /// Short name for hardware displays, max 8 characters (e.g., "Dry").
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the processor is created.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID for plugin host automation and preset persistence.
    ///
    /// Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Human-readable stable ID for presets, debugging, and serialization.
    ///
    /// Default: `""` (unassigned).
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Time parameter in milliseconds.
    ///
    /// # Arguments
    ///
    /// * `name` - Full parameter name (e.g., "Ramp Time")
    /// * `short_name` - Short name for hardware displays (e.g., "Ramp")
    /// * `min` - Minimum time in ms
    /// * `max` - Maximum time in ms
    /// * `default` - Default time in ms
    pub const fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
            step: 0.1,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Gain parameter with custom name and range (decibels).
    ///
    /// # Arguments
    ///
    /// * `name` - Full parameter name (e.g., "Wet Gain")
    /// * `short_name` - Short name for hardware displays (e.g., "Wet")
    /// * `min` - Minimum gain in dB
    /// * `max` - Maximum gain in dB
    /// * `default` - Default gain in dB
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// Builder; call after a factory method or struct literal.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// `NaN` maps to the default value.
    ///
    /// ```rust
    /// use drywet_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0);
    /// assert_eq!(desc.clamp(0.0), 0.0);
    /// assert_eq!(desc.clamp(-100.0), -60.0);
    /// assert_eq!(desc.clamp(100.0), 12.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns `true` if `value` lies inside `min..=max`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / range
    }

    /// Converts a normalized value (0.0 to 1.0) to the actual parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize). Out-of-range input is clamped.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let n = if normalized.is_nan() {
            self.normalize(self.default)
        } else {
            normalized.clamp(0.0, 1.0)
        };
        self.min + n * (self.max - self.min)
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - for gain and level parameters.
    Decibels,

    /// Milliseconds (ms) - for time parameters such as ramp length.
    Milliseconds,

    /// No unit - for dimensionless or custom parameters.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use drywet_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::None => "",
        }
    }
}

/// Indexed parameter access for hosts, presets and control surfaces.
///
/// Valid indices are `0..param_count()`. Values are in the descriptor's
/// plain units (dB, ms).
pub trait ParameterInfo {
    /// Returns the number of parameters.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at `index`, or `None` if
    /// `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`.
    ///
    /// Returns 0.0 for an out-of-range index.
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`, clamped to its descriptor range.
    ///
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find the index of the parameter with the given stable id.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_denormalize_linear() {
        let desc = ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0);

        assert_eq!(desc.normalize(-60.0), 0.0);
        assert_eq!(desc.normalize(12.0), 1.0);
        assert_eq!(desc.denormalize(0.0), -60.0);
        assert_eq!(desc.denormalize(1.0), 12.0);

        let original = -7.5;
        let back = desc.denormalize(desc.normalize(original));
        assert!((back - original).abs() < 1e-4);
    }

    #[test]
    fn test_denormalize_clamps() {
        let desc = ParamDescriptor::time_ms("Ramp", "Ramp", 0.0, 100.0, 1.0);
        assert_eq!(desc.denormalize(-1.0), 0.0);
        assert_eq!(desc.denormalize(2.0), 100.0);
        assert!((desc.denormalize(f32::NAN) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_range() {
        let desc = ParamDescriptor::gain_db("Fixed", "Fixed", 0.0, 0.0, 0.0);
        assert_eq!(desc.normalize(5.0), 0.0);
    }

    #[test]
    fn test_with_id() {
        let desc = ParamDescriptor::gain_db("Wet Gain", "Wet", -60.0, 12.0, 0.0)
            .with_id(ParamId(101), "wet_gain");
        assert_eq!(desc.id, ParamId(101));
        assert_eq!(desc.string_id, "wet_gain");
        assert_eq!(desc.unit, ParamUnit::Decibels);
    }

    #[test]
    fn test_contains() {
        let desc = ParamDescriptor::time_ms("Ramp", "Ramp", 0.0, 100.0, 1.0);
        assert!(desc.contains(0.0));
        assert!(desc.contains(100.0));
        assert!(!desc.contains(-0.1));
        assert!(!desc.contains(f32::NAN));
    }
}
