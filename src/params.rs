//! Pendulum physical parameters and their validated bulk update.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ensure_positive, SimError};
use crate::utils::constants::{DEFAULT_LENGTH, DEFAULT_MASS, GRAVITY};

/// Name of an adjustable pendulum parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamName {
    /// Gravitational acceleration `g`
    Gravity,
    /// String length `L`
    Length,
    /// Bob mass `m`
    Mass,
}

impl ParamName {
    pub const ALL: [ParamName; 3] = [ParamName::Gravity, ParamName::Length, ParamName::Mass];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamName::Gravity => "gravity",
            ParamName::Length => "length",
            ParamName::Mass => "mass",
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamName {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gravity" | "g" => Ok(ParamName::Gravity),
            "length" | "L" | "l" => Ok(ParamName::Length),
            "mass" | "m" => Ok(ParamName::Mass),
            other => Err(SimError::InvalidParameter {
                name: other.to_string(),
            }),
        }
    }
}

/// Physical constants of a simple pendulum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumParameters {
    /// Gravitational acceleration (m/s^2)
    pub gravity: f64,
    /// String length (m), must be positive
    pub length: f64,
    /// Bob mass (kg), must be positive
    pub mass: f64,
}

impl Default for PendulumParameters {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            length: DEFAULT_LENGTH,
            mass: DEFAULT_MASS,
        }
    }
}

impl PendulumParameters {
    /// Create a validated parameter set
    pub fn new(gravity: f64, length: f64, mass: f64) -> Result<Self, SimError> {
        let params = Self {
            gravity,
            length,
            mass,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the invariants `length > 0`, `mass > 0` and finite gravity
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.gravity.is_finite() {
            return Err(SimError::Domain {
                name: "gravity",
                value: self.gravity,
                reason: "must be finite",
            });
        }
        ensure_positive("length", self.length)?;
        ensure_positive("mass", self.mass)
    }

    fn set(&mut self, name: ParamName, value: f64) {
        match name {
            ParamName::Gravity => self.gravity = value,
            ParamName::Length => self.length = value,
            ParamName::Mass => self.mass = value,
        }
    }

    /// Natural angular frequency squared, `g / L`
    #[inline]
    pub fn omega0_squared(&self) -> f64 {
        self.gravity / self.length
    }

    /// Apply a bulk update by parameter name.
    ///
    /// All names are resolved and the resulting parameter set is validated
    /// before anything is written, so a failed update leaves `self` untouched.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidParameter`] for the first name that is not a parameter
    /// - [`SimError::Domain`] if the updated set breaks an invariant
    pub fn apply_updates<I, K>(&mut self, updates: I) -> Result<(), SimError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut candidate = *self;
        for (key, value) in updates {
            let name: ParamName = key.as_ref().parse()?;
            candidate.set(name, value);
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let p = PendulumParameters::default();
        assert_eq!(p.gravity, 9.81);
        assert_eq!(p.length, 1.0);
        assert_eq!(p.mass, 1.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_param_name_parsing() {
        assert_eq!("gravity".parse::<ParamName>().unwrap(), ParamName::Gravity);
        assert_eq!("L".parse::<ParamName>().unwrap(), ParamName::Length);
        assert_eq!("m".parse::<ParamName>().unwrap(), ParamName::Mass);
        assert!(matches!(
            "nonexistent".parse::<ParamName>(),
            Err(SimError::InvalidParameter { name }) if name == "nonexistent"
        ));
    }

    #[test]
    fn test_apply_updates() {
        let mut p = PendulumParameters::default();
        let mut updates = HashMap::new();
        updates.insert("length", 2.0);
        updates.insert("mass", 0.5);
        p.apply_updates(updates).unwrap();

        assert_eq!(p.length, 2.0);
        assert_eq!(p.mass, 0.5);
        assert_eq!(p.gravity, 9.81);
    }

    #[test]
    fn test_apply_updates_is_atomic() {
        let mut p = PendulumParameters::default();

        // Valid key first, unknown key second: nothing may be applied
        let result = p.apply_updates(vec![("length", 3.0), ("nonexistent", 1.0)]);
        assert!(matches!(result, Err(SimError::InvalidParameter { .. })));
        assert_eq!(p, PendulumParameters::default());

        let result = p.apply_updates(vec![("gravity", 1.62), ("mass", -1.0)]);
        assert!(matches!(result, Err(SimError::Domain { name: "mass", .. })));
        assert_eq!(p, PendulumParameters::default());
    }

    #[test]
    fn test_new_rejects_bad_length() {
        assert!(PendulumParameters::new(9.81, 0.0, 1.0).is_err());
        assert!(PendulumParameters::new(f64::INFINITY, 1.0, 1.0).is_err());
        assert!(PendulumParameters::new(9.81, 1.0, 1.0).is_ok());
    }
}
