//! # Persisted Settings
//!
//! The printer endpoint and paper width preference survive restarts so the
//! next launch can auto-populate and silently reconnect.
//!
//! ## Stored Shape
//!
//! ```json
//! {
//!   "printer": { "host": "192.168.1.50", "port": "9100" },
//!   "width": "576"
//! }
//! ```
//!
//! Port and width are stored as strings, the way form fields and key-value
//! stores hold them; loading validates them back into typed values. A
//! missing file yields defaults, a malformed one is a config error.
//!
//! ## Lifecycle
//!
//! Written after a successful user-initiated connect (or an explicit width
//! change), read on startup, never deleted. It is only overwritten by the
//! next successful connect.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReciboError;
use crate::printer::PaperWidth;
use crate::transport::Endpoint;

/// On-disk form. Kept separate from [`Settings`] so the string-typed
/// stored shapes never leak into the typed API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    printer: Option<StoredEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEndpoint {
    host: String,
    port: String,
}

/// Validated settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Last successfully connected printer, if any.
    pub endpoint: Option<Endpoint>,
    /// Paper width preference.
    pub width: PaperWidth,
}

impl Settings {
    /// Load settings from `path`. A missing file is not an error: it means
    /// first launch, so defaults come back.
    pub fn load(path: &Path) -> Result<Self, ReciboError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| ReciboError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let stored: StoredSettings = serde_json::from_str(&contents).map_err(|e| {
            ReciboError::Config(format!("Malformed settings in {}: {}", path.display(), e))
        })?;

        let endpoint = stored
            .printer
            .map(|p| {
                Endpoint::parse(&p.host, &p.port).map_err(|e| {
                    ReciboError::Config(format!("Invalid persisted printer endpoint: {}", e))
                })
            })
            .transpose()?;

        let width = stored
            .width
            .map(|w| {
                w.parse::<PaperWidth>().map_err(|e| {
                    ReciboError::Config(format!("Invalid persisted paper width: {}", e))
                })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self { endpoint, width })
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ReciboError> {
        let stored = StoredSettings {
            printer: self.endpoint.as_ref().map(|ep| StoredEndpoint {
                host: ep.host.clone(),
                port: ep.port.to_string(),
            }),
            width: Some(self.width.dots().to_string()),
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ReciboError::Config(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| ReciboError::Config(format!("Failed to serialize settings: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| ReciboError::Config(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Default settings location: `~/.config/recibo/settings.json`, or a
    /// file in the working directory when no home is known.
    pub fn default_path() -> PathBuf {
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home)
                .join(".config")
                .join("recibo")
                .join("settings.json"),
            None => PathBuf::from("recibo-settings.json"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("recibo-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/recibo/settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.endpoint.is_none());
        assert_eq!(settings.width, PaperWidth::Mm80);
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round-trip.json");
        let settings = Settings {
            endpoint: Some(Endpoint::new("192.168.1.50", 9100).unwrap()),
            width: PaperWidth::Mm58,
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_stored_shape_uses_strings() {
        let path = temp_path("shape.json");
        let settings = Settings {
            endpoint: Some(Endpoint::new("printer.local", 9100).unwrap()),
            width: PaperWidth::Mm80,
        };
        settings.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["printer"]["host"], "printer.local");
        assert_eq!(raw["printer"]["port"], "9100");
        assert_eq!(raw["width"], "576");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_accepts_endpoint_only() {
        let path = temp_path("endpoint-only.json");
        fs::write(&path, r#"{"printer": {"host": "10.0.0.9", "port": "9100"}}"#).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.endpoint.unwrap().host, "10.0.0.9");
        assert_eq!(loaded.width, PaperWidth::Mm80);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let path = temp_path("malformed.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(ReciboError::Config(_))
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_persisted_port_is_config_error() {
        let path = temp_path("bad-port.json");
        fs::write(&path, r#"{"printer": {"host": "h", "port": "not-a-port"}}"#).unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(ReciboError::Config(_))
        ));
        fs::remove_file(&path).ok();
    }
}
