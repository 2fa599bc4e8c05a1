//! Feature capability registry.
//!
//! Holds the fixed supported-feature mask and the current state of the
//! boolean-capable features. The mask is set at construction and never
//! changes; only allow-listed features are settable, and only when
//! their bit is in the mask.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::ServiceConfig;
use crate::proto::{BooleanFeature, Feature};

/// Capability registry for the service surface.
pub struct FeatureRegistry {
    supported: u32,
    states: Mutex<HashMap<BooleanFeature, bool>>,
}

impl FeatureRegistry {
    /// Builds the registry from service configuration.
    pub fn new(config: &ServiceConfig) -> Self {
        let mut states = HashMap::new();
        for feature in BooleanFeature::ALL {
            states.insert(feature, config.default_state(feature));
        }
        Self {
            supported: config.supported_mask(),
            states: Mutex::new(states),
        }
    }

    /// The 32-bit supported-feature bitmask.
    pub fn supported_mask(&self) -> u32 {
        self.supported
    }

    /// Whether a feature's bit is in the supported mask.
    pub fn is_supported(&self, feature: Feature) -> bool {
        self.supported & feature.bit() == feature.bit()
    }

    /// Current state of a boolean-capable feature.
    pub fn get(&self, feature: BooleanFeature) -> bool {
        *self
            .states
            .lock()
            .unwrap()
            .get(&feature)
            .unwrap_or(&false)
    }

    /// Sets a boolean-capable feature. Returns `false` when the feature
    /// is not in the supported mask; the state is left untouched.
    pub fn set(&self, feature: BooleanFeature, enable: bool) -> bool {
        if !self.is_supported(feature.feature()) {
            return false;
        }
        self.states.lock().unwrap().insert(feature, enable);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_from_config() {
        let registry = FeatureRegistry::new(&ServiceConfig::default());
        assert_eq!(registry.supported_mask(), 0x1 | 0x20 | 0x200);
        assert!(registry.is_supported(Feature::TapToWake));
    }

    #[test]
    fn test_set_then_get() {
        let registry = FeatureRegistry::new(&ServiceConfig::default());
        assert!(!registry.get(BooleanFeature::TapToWake));
        assert!(registry.set(BooleanFeature::TapToWake, true));
        assert!(registry.get(BooleanFeature::TapToWake));
        assert!(registry.set(BooleanFeature::TapToWake, false));
        assert!(!registry.get(BooleanFeature::TapToWake));
    }

    #[test]
    fn test_set_unsupported_feature_fails() {
        let config = ServiceConfig {
            supported_features: vec![Feature::AdaptiveBacklight],
            enabled_by_default: Vec::new(),
        };
        let registry = FeatureRegistry::new(&config);
        assert!(!registry.set(BooleanFeature::KeyDisable, true));
        assert!(!registry.get(BooleanFeature::KeyDisable));
    }

    #[test]
    fn test_defaults_applied() {
        let config = ServiceConfig {
            supported_features: Feature::ALL.to_vec(),
            enabled_by_default: vec![BooleanFeature::KeyDisable],
        };
        let registry = FeatureRegistry::new(&config);
        assert!(registry.get(BooleanFeature::KeyDisable));
        assert!(!registry.get(BooleanFeature::TapToWake));
    }
}
