//! Value types for lighting control parameters.

mod brightness;
mod color;
mod hue;
mod saturation;

pub use brightness::Brightness;
pub use color::Color;
pub use hue::Hue;
pub use saturation::Saturation;
