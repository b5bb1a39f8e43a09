//! Provides the accessibility color bands
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Band an accessibility value falls into
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessibilityBand {
    /// Accessibility of at least 0.6
    Open,
    /// Accessibility in [0.4, 0.6)
    Moderate,
    /// Accessibility in [0.2, 0.4)
    Restricted,
    /// Accessibility below 0.2
    Closed,
}

impl AccessibilityBand {
    /// Display color of the band, as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            AccessibilityBand::Open => "#22c55e",
            AccessibilityBand::Moderate => "#3b82f6",
            AccessibilityBand::Restricted => "#f97316",
            AccessibilityBand::Closed => "#ef4444",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccessibilityBand::Open => "open",
            AccessibilityBand::Moderate => "moderate",
            AccessibilityBand::Restricted => "restricted",
            AccessibilityBand::Closed => "closed",
        }
    }
}

impl Display for AccessibilityBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify an accessibility value into its band
pub fn classify_accessibility(accessibility: f64) -> AccessibilityBand {
    if accessibility >= 0.6 {
        AccessibilityBand::Open
    } else if accessibility >= 0.4 {
        AccessibilityBand::Moderate
    } else if accessibility >= 0.2 {
        AccessibilityBand::Restricted
    } else {
        AccessibilityBand::Closed
    }
}

/// Display color for an accessibility value
pub fn accessibility_color(accessibility: f64) -> &'static str {
    classify_accessibility(accessibility).color()
}

#[cfg(test)]
mod band_tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(classify_accessibility(1.0), AccessibilityBand::Open);
        assert_eq!(classify_accessibility(0.6), AccessibilityBand::Open);
        assert_eq!(classify_accessibility(0.5999), AccessibilityBand::Moderate);
        assert_eq!(classify_accessibility(0.4), AccessibilityBand::Moderate);
        assert_eq!(classify_accessibility(0.3999), AccessibilityBand::Restricted);
        assert_eq!(classify_accessibility(0.2), AccessibilityBand::Restricted);
        assert_eq!(classify_accessibility(0.1999), AccessibilityBand::Closed);
        assert_eq!(classify_accessibility(0.0), AccessibilityBand::Closed);
    }

    #[test]
    fn colors() {
        assert_eq!(accessibility_color(0.72), "#22c55e");
        assert_eq!(accessibility_color(0.45), "#3b82f6");
        assert_eq!(accessibility_color(0.30), "#f97316");
        assert_eq!(accessibility_color(0.06), "#ef4444");
        assert_eq!(format!("{}", AccessibilityBand::Restricted), "restricted");
    }
}
