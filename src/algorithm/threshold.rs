//! Flattening threshold with non-negativity enforced at construction

use crate::io::error::{GrainError, Result};
use std::fmt;

/// Maximum cell loss that still allows a cell to be flattened
///
/// The engine imposes no upper bound. Values beyond `u32::MAX` saturate,
/// which is indistinguishable in output since channel deviations never exceed 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u32);

impl Threshold {
    /// Validate a signed threshold value
    ///
    /// # Errors
    ///
    /// Returns `InvalidThreshold` if `value` is negative
    pub fn new(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(GrainError::InvalidThreshold { value });
        }
        Ok(Self(u32::try_from(value).unwrap_or(u32::MAX)))
    }

    /// Raw threshold value
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether a cell with the given loss qualifies for flattening
    pub fn admits(self, loss: f64) -> bool {
        loss <= f64::from(self.0)
    }
}

impl From<u32> for Threshold {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
