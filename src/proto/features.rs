//! Feature capability identifiers.
//!
//! Features are reported by the service as a 32-bit bitmask. A small
//! subset of them is boolean-capable: it can be toggled on and off, not
//! merely queried for presence. That subset is its own enum so that the
//! allow-list is enforced by the type system; the fallible conversions
//! exist only for callers arriving with raw ids (wire, CLI).

use serde::{Deserialize, Serialize};

use super::limits::ProtoError;

/// A capability flag the service may report as supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Adaptive backlight (content-adaptive brightness control).
    AdaptiveBacklight,
    /// Hardware navigation key disablement.
    KeyDisable,
    /// Double-tap the touch panel to wake the device.
    TapToWake,
}

impl Feature {
    /// All known features.
    pub const ALL: [Feature; 3] = [
        Feature::AdaptiveBacklight,
        Feature::KeyDisable,
        Feature::TapToWake,
    ];

    /// The feature's bit in the 32-bit capability mask.
    pub const fn bit(self) -> u32 {
        match self {
            Feature::AdaptiveBacklight => 0x1,
            Feature::KeyDisable => 0x20,
            Feature::TapToWake => 0x200,
        }
    }

    /// The feature's canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::AdaptiveBacklight => "FEATURE_ADAPTIVE_BACKLIGHT",
            Feature::KeyDisable => "FEATURE_KEY_DISABLE",
            Feature::TapToWake => "FEATURE_TAP_TO_WAKE",
        }
    }

    /// Looks up a feature by its raw bit value.
    pub fn from_bit(bit: u32) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.bit() == bit)
    }

    /// Looks up a feature by its canonical name.
    ///
    /// A static table lookup; there is deliberately no runtime
    /// introspection here.
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Builds a capability mask from a set of features.
pub fn mask_of(features: &[Feature]) -> u32 {
    features.iter().fold(0, |mask, f| mask | f.bit())
}

/// A feature with simple enable/disable semantics.
///
/// Only these features may be passed to the boolean get/set calls;
/// every other feature is queryable for presence but not settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanFeature {
    /// Hardware navigation key disablement.
    KeyDisable,
    /// Double-tap to wake.
    TapToWake,
}

impl BooleanFeature {
    /// All boolean-capable features.
    pub const ALL: [BooleanFeature; 2] = [BooleanFeature::KeyDisable, BooleanFeature::TapToWake];

    /// The underlying feature.
    pub const fn feature(self) -> Feature {
        match self {
            BooleanFeature::KeyDisable => Feature::KeyDisable,
            BooleanFeature::TapToWake => Feature::TapToWake,
        }
    }

    /// The feature's bit in the capability mask.
    pub const fn bit(self) -> u32 {
        self.feature().bit()
    }

    /// Narrows a feature to its boolean-capable form.
    pub fn from_feature(feature: Feature) -> Result<BooleanFeature, ProtoError> {
        match feature {
            Feature::KeyDisable => Ok(BooleanFeature::KeyDisable),
            Feature::TapToWake => Ok(BooleanFeature::TapToWake),
            other => Err(ProtoError::UnsupportedFeature(other.bit())),
        }
    }

    /// Narrows a raw feature id to its boolean-capable form.
    pub fn from_bit(bit: u32) -> Result<BooleanFeature, ProtoError> {
        Feature::from_bit(bit)
            .ok_or(ProtoError::UnsupportedFeature(bit))
            .and_then(BooleanFeature::from_feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_bits() {
        assert_eq!(Feature::AdaptiveBacklight.bit(), 0x1);
        assert_eq!(Feature::KeyDisable.bit(), 0x20);
        assert_eq!(Feature::TapToWake.bit(), 0x200);
    }

    #[test]
    fn test_name_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert_eq!(Feature::from_name("FEATURE_FLUX_CAPACITOR"), None);
        assert_eq!(Feature::from_name(""), None);
    }

    #[test]
    fn test_mask_of() {
        assert_eq!(mask_of(&[]), 0);
        assert_eq!(mask_of(&Feature::ALL), 0x1 | 0x20 | 0x200);
        assert_eq!(mask_of(&[Feature::TapToWake]), 0x200);
    }

    #[test]
    fn test_boolean_subset() {
        assert!(BooleanFeature::from_feature(Feature::KeyDisable).is_ok());
        assert!(BooleanFeature::from_feature(Feature::TapToWake).is_ok());
        assert_eq!(
            BooleanFeature::from_feature(Feature::AdaptiveBacklight),
            Err(ProtoError::UnsupportedFeature(0x1))
        );
    }

    #[test]
    fn test_boolean_from_bit() {
        assert_eq!(
            BooleanFeature::from_bit(0x200),
            Ok(BooleanFeature::TapToWake)
        );
        assert_eq!(
            BooleanFeature::from_bit(0x4),
            Err(ProtoError::UnsupportedFeature(0x4))
        );
    }
}
