//! Hue angle on the color wheel.

use serde::{Deserialize, Serialize};

/// Hue angle in degrees (0-360).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Hue {
    pub(crate) degrees: f32,
}

impl Hue {
    const MAX: f32 = 360.0;

    /// Create a new hue from an angle in degrees.
    ///
    /// Returns `None` if the value is outside 0-360.
    ///
    /// # Examples
    ///
    /// ```
    /// use razer_lights_rs::Hue;
    ///
    /// assert!(Hue::create(120.0).is_some());
    /// assert!(Hue::create(360.0).is_some());
    /// assert!(Hue::create(-1.0).is_none());
    /// assert!(Hue::create(360.5).is_none());
    /// ```
    pub fn create(degrees: f32) -> Option<Self> {
        if (0.0..=Self::MAX).contains(&degrees) {
            Some(Hue { degrees })
        } else {
            None
        }
    }

    pub fn degrees(&self) -> f32 {
        self.degrees
    }
}
