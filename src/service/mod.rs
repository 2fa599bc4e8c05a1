//! The persistent store service: the request/response surface over the
//! engine and the feature registry.
//!
//! Every call of the generic contract dispatches through
//! [`StoreService::handle`]. Failures become a distinct
//! [`Response::Error`] with a category, never a silent default; the
//! caller decides what to degrade to.

mod features;

pub use features::FeatureRegistry;

use crate::config::Config;
use crate::observability::{Event, Logger};
use crate::proto::{BooleanFeature, ErrorKind, Request, Response};
use crate::store::{PersistentStore, StoreError, StoreResult};

/// The authoritative service: durable key/value storage plus the
/// feature capability surface.
pub struct StoreService {
    store: PersistentStore,
    features: FeatureRegistry,
}

impl StoreService {
    /// Builds a service from an already-open store.
    pub fn new(store: PersistentStore, features: FeatureRegistry) -> Self {
        Self { store, features }
    }

    /// Opens the store from configuration and builds the service.
    pub fn open(config: &Config) -> StoreResult<Self> {
        let store = PersistentStore::open(&config.store)?;
        let features = FeatureRegistry::new(&config.service);
        Ok(Self::new(store, features))
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &PersistentStore {
        &self.store
    }

    /// Direct access to the feature registry.
    pub fn features(&self) -> &FeatureRegistry {
        &self.features
    }

    /// Dispatches one request of the generic contract.
    pub fn handle(&self, request: &Request) -> Response {
        match request {
            Request::GetSupportedFeatures => Response::Features {
                mask: self.features.supported_mask(),
            },

            Request::GetBooleanFeature { feature } => match BooleanFeature::from_bit(*feature) {
                Ok(feature) => Response::Flag {
                    enabled: self.features.get(feature),
                },
                Err(err) => self.reject_feature(*feature, &err),
            },

            Request::SetBooleanFeature { feature, enable } => {
                match BooleanFeature::from_bit(*feature) {
                    Ok(feature) => Response::Ack {
                        ok: self.features.set(feature, *enable),
                    },
                    Err(err) => self.reject_feature(*feature, &err),
                }
            }

            Request::WriteBytes { key, value } => {
                match self.store.write(key, value.as_deref()) {
                    Ok(ok) => Response::Ack { ok },
                    Err(err) => Self::storage_failure(key, err),
                }
            }

            Request::ReadBytes { key } => match self.store.read(key) {
                Ok(value) => Response::Value { value },
                Err(err) => Self::storage_failure(key, err),
            },
        }
    }

    fn reject_feature(&self, bit: u32, err: &crate::proto::ProtoError) -> Response {
        Logger::warn(
            Event::FeatureRejected.as_str(),
            &[("feature", &format!("{:#x}", bit))],
        );
        Response::from_proto_error(err)
    }

    fn storage_failure(key: &str, err: StoreError) -> Response {
        let (kind, event) = match &err {
            StoreError::InvalidKey { .. } => (ErrorKind::InvalidKey, Event::WriteRejected),
            StoreError::ValueTooLarge { .. } => (ErrorKind::ValueTooLarge, Event::WriteRejected),
            StoreError::ValueEmpty => (ErrorKind::ValueEmpty, Event::WriteRejected),
            StoreError::Io { .. } | StoreError::Corruption { .. } => {
                (ErrorKind::Storage, Event::StorageError)
            }
        };
        let severity_log = if kind == ErrorKind::Storage {
            Logger::error
        } else {
            Logger::warn
        };
        severity_log(
            event.as_str(),
            &[("key", key), ("reason", &err.to_string())],
        );
        Response::Error {
            kind,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::proto::MAX_VALUE_LEN;
    use tempfile::TempDir;

    fn open_service(dir: &TempDir) -> StoreService {
        let config = Config {
            store: StoreConfig::at(dir.path().join("persist")),
            ..Config::default()
        };
        StoreService::open(&config).unwrap()
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir);

        let write = service.handle(&Request::WriteBytes {
            key: "serial".to_string(),
            value: Some(b"ABC".to_vec()),
        });
        assert_eq!(write, Response::Ack { ok: true });

        let read = service.handle(&Request::ReadBytes {
            key: "serial".to_string(),
        });
        assert_eq!(
            read,
            Response::Value {
                value: Some(b"ABC".to_vec())
            }
        );
    }

    #[test]
    fn test_absent_value_deletes() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir);

        service.handle(&Request::WriteBytes {
            key: "k".to_string(),
            value: Some(b"v".to_vec()),
        });
        let delete = service.handle(&Request::WriteBytes {
            key: "k".to_string(),
            value: None,
        });
        assert_eq!(delete, Response::Ack { ok: true });

        let read = service.handle(&Request::ReadBytes {
            key: "k".to_string(),
        });
        assert_eq!(read, Response::Value { value: None });
    }

    #[test]
    fn test_oversized_value_maps_to_error_kind() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir);

        let response = service.handle(&Request::WriteBytes {
            key: "k".to_string(),
            value: Some(vec![0u8; MAX_VALUE_LEN + 1]),
        });
        assert!(matches!(
            response,
            Response::Error {
                kind: ErrorKind::ValueTooLarge,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_key_maps_to_error_kind() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir);

        let response = service.handle(&Request::ReadBytes {
            key: "k".repeat(65),
        });
        assert!(matches!(
            response,
            Response::Error {
                kind: ErrorKind::InvalidKey,
                ..
            }
        ));
    }

    #[test]
    fn test_feature_surface() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir);

        assert_eq!(
            service.handle(&Request::GetSupportedFeatures),
            Response::Features {
                mask: 0x1 | 0x20 | 0x200
            }
        );

        let set = service.handle(&Request::SetBooleanFeature {
            feature: 0x200,
            enable: true,
        });
        assert_eq!(set, Response::Ack { ok: true });

        let get = service.handle(&Request::GetBooleanFeature { feature: 0x200 });
        assert_eq!(get, Response::Flag { enabled: true });
    }

    #[test]
    fn test_non_boolean_feature_rejected() {
        let dir = TempDir::new().unwrap();
        let service = open_service(&dir);

        // AdaptiveBacklight is supported but not boolean-capable.
        let response = service.handle(&Request::SetBooleanFeature {
            feature: 0x1,
            enable: true,
        });
        assert!(matches!(
            response,
            Response::Error {
                kind: ErrorKind::UnsupportedFeature,
                ..
            }
        ));
    }
}
