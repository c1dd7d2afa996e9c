/// Qibla bearing and compass math
use serde::{Deserialize, Serialize};

/// Bearing toward the Kaaba, in degrees clockwise from true north
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QiblaDirection(pub f64);

impl QiblaDirection {
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Bearing rounded for display, normalised to 0..360
    pub fn display_degrees(self) -> u16 {
        (self.0.round().rem_euclid(360.0)) as u16
    }

    /// Rotation to apply to the needle so it points at the Qibla while the
    /// compass dial is rotated by `heading`.
    pub fn needle_rotation(self, heading: f64) -> f64 {
        self.0 - heading
    }
}

/// One orientation sensor reading
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationReading {
    /// Absolute compass heading when the platform provides one
    pub compass_heading: Option<f64>,
    /// Rotation around the z axis, in degrees
    pub alpha: Option<f64>,
}

impl OrientationReading {
    /// Heading in degrees, if one can be derived.
    ///
    /// A non-zero compass heading wins; otherwise the heading is `360 - alpha`.
    /// A derived heading of exactly 0 is treated as "no reading".
    pub fn heading(&self) -> Option<f64> {
        let heading = match self.compass_heading {
            Some(h) if h != 0.0 => Some(h),
            _ => self.alpha.map(|a| 360.0 - a),
        };
        heading.filter(|h| h.is_finite() && *h != 0.0)
    }
}
