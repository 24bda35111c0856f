//! Error types shared by every simulator operation

use thiserror::Error;

use crate::params::ParamName;

/// Simulator errors
///
/// Every fallible call returns one of these immediately; nothing is retried
/// or replaced by a fallback value inside the crate.
#[derive(Error, Debug)]
pub enum SimError {
    #[error(
        "Unknown parameter '{name}' (expected one of: {})",
        ParamName::ALL.map(|p| p.as_str()).join(", ")
    )]
    InvalidParameter { name: String },

    #[error("Cannot interpret input as pendulum state: {0}")]
    TypeShape(String),

    #[error("Invalid value {value} for {name}: {reason}")]
    Domain {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Unknown compute target '{0}'")]
    UnknownTarget(String),

    #[error("Unknown solver '{0}'")]
    UnknownSolver(String),

    #[error("Invalid settings document: {0}")]
    Config(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        SimError::TypeShape(msg.into())
    }
}

/// Reject non-finite or non-positive values.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), SimError> {
    if !value.is_finite() {
        return Err(SimError::Domain {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(SimError::Domain {
            name,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("dt", 0.01).is_ok());
        assert!(matches!(
            ensure_positive("dt", 0.0),
            Err(SimError::Domain { name: "dt", .. })
        ));
        assert!(matches!(
            ensure_positive("length", f64::NAN),
            Err(SimError::Domain { reason: "must be finite", .. })
        ));
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = SimError::InvalidParameter {
            name: "nonexistent".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown parameter 'nonexistent' (expected one of: gravity, length, mass)"
        );
    }
}
