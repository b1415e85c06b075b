//! Saturation of a color.

use serde::{Deserialize, Serialize};

/// Color saturation as a percentage (0-100).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Saturation {
    pub(crate) percent: f32,
}

impl Saturation {
    const MAX: f32 = 100.0;

    /// Create a new saturation from a percentage.
    ///
    /// Returns `None` if the value is outside 0-100.
    ///
    /// # Examples
    ///
    /// ```
    /// use razer_lights_rs::Saturation;
    ///
    /// assert!(Saturation::create(80.0).is_some());
    /// assert!(Saturation::create(100.1).is_none());
    /// ```
    pub fn create(percent: f32) -> Option<Self> {
        if (0.0..=Self::MAX).contains(&percent) {
            Some(Saturation { percent })
        } else {
            None
        }
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }
}
