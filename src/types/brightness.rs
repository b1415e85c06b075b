//! Brightness control for lighting devices.

use serde::{Deserialize, Serialize};

/// Brightness level from 0 to 100 percent.
///
/// 0 means the lighting is dark but still driven; disabling the output
/// entirely is a separate operation on the color channel.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Brightness {
    pub(crate) value: u8,
}

impl Brightness {
    const MAX: u8 = 100;

    /// Full brightness (100%).
    pub fn full() -> Self {
        Brightness { value: Self::MAX }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is outside valid range (0-100).
    pub fn create(value: u8) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Brightness { value })
        } else {
            None
        }
    }

    /// Returns full brightness (100%) if value is invalid.
    pub fn create_or(value: u8) -> Self {
        if Self::is_valid(value) {
            Brightness { value }
        } else {
            Self::full()
        }
    }

    fn is_valid(value: u8) -> bool {
        value <= Self::MAX
    }
}
