//! Engine configuration, loaded from RON, TOML, or JSON.
//!
//! The format is picked from the file extension. Every field has a default,
//! so an empty file (or a file naming only what it changes) is valid.
//!
//! ```ron
//! (
//!     automation_interval: 30,
//!     connectors: ["Workbench", "Stone Path"],
//!     machine_overrides: {
//!         "Keg": (priority: 5),
//!         "Bee House": (enabled: false),
//!     },
//! )
//! ```

use automate_core::fixed::Ticks;
use automate_spatial::{DiscoveryConfig, MachineOverride};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    pub fn detect(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Ok(Format::Ron),
            Some("toml") => Ok(Format::Toml),
            Some("json") => Ok(Format::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                file: path.to_path_buf(),
            }),
        }
    }
}

fn deserialize<T: DeserializeOwned>(format: Format, content: &str, file: &Path) -> Result<T, ConfigError> {
    let parse_error = |detail: String| ConfigError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

// ===========================================================================
// AutomateConfig
// ===========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomateConfig {
    /// When false, cycles are skipped and the engine holds no groups.
    pub enabled: bool,
    /// Ticks between automation cycles.
    pub automation_interval: Ticks,
    /// Manhattan distance within which two tiles are adjacent.
    pub adjacency_radius: u32,
    /// Object or floor names that link neighbours (case-insensitive).
    pub connectors: Vec<String>,
    /// Keyed by machine type name.
    pub machine_overrides: BTreeMap<String, MachineOverride>,
}

impl Default for AutomateConfig {
    fn default() -> Self {
        let discovery = DiscoveryConfig::default();
        Self {
            enabled: true,
            automation_interval: 60,
            adjacency_radius: discovery.adjacency_radius,
            connectors: discovery.connectors,
            machine_overrides: discovery.machine_overrides,
        }
    }
}

impl AutomateConfig {
    /// Read and normalize a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = Format::detect(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = deserialize(format, &content, path)?;
        Ok(config.normalized())
    }

    /// Parse and normalize config text in the given format.
    pub fn from_str_with(format: Format, content: &str) -> Result<Self, ConfigError> {
        let config: Self = deserialize(format, content, Path::new("<inline>"))?;
        Ok(config.normalized())
    }

    /// Clamp intervals and radii to at least 1 and drop blank or duplicate
    /// connector names.
    pub fn normalized(mut self) -> Self {
        self.automation_interval = self.automation_interval.max(1);
        self.adjacency_radius = self.adjacency_radius.max(1);
        let mut connectors: Vec<String> = Vec::with_capacity(self.connectors.len());
        for name in self.connectors.drain(..) {
            let name = name.trim();
            if name.is_empty() || connectors.iter().any(|c| c.eq_ignore_ascii_case(name)) {
                continue;
            }
            connectors.push(name.to_string());
        }
        self.connectors = connectors;
        self
    }

    pub fn discovery(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            adjacency_radius: self.adjacency_radius,
            connectors: self.connectors.clone(),
            machine_overrides: self.machine_overrides.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_defaults() {
        let config = AutomateConfig::from_str_with(Format::Json, "{}").unwrap();
        assert_eq!(config, AutomateConfig::default());
        assert!(config.enabled);
        assert_eq!(config.automation_interval, 60);
        assert_eq!(config.discovery(), DiscoveryConfig::default());
    }

    #[test]
    fn ron_overrides() {
        let config = AutomateConfig::from_str_with(
            Format::Ron,
            r#"(
                automation_interval: 30,
                machine_overrides: {
                    "Keg": (priority: 5),
                    "Bee House": (enabled: false),
                },
            )"#,
        )
        .unwrap();
        assert_eq!(config.automation_interval, 30);
        let discovery = config.discovery();
        assert_eq!(discovery.override_for("Keg").priority, 5);
        assert!(discovery.override_for("Keg").enabled);
        assert!(!discovery.override_for("Bee House").enabled);
        assert!(discovery.override_for("Furnace").enabled);
    }

    #[test]
    fn toml_connectors() {
        let config = AutomateConfig::from_str_with(
            Format::Toml,
            r#"
                adjacency_radius = 2
                connectors = ["Workbench", " stone path ", "workbench", ""]
            "#,
        )
        .unwrap();
        assert_eq!(config.adjacency_radius, 2);
        assert_eq!(config.connectors, vec!["Workbench", "stone path"]);
        assert!(config.discovery().is_connector("Stone Path"));
    }

    #[test]
    fn zero_interval_becomes_one() {
        let config =
            AutomateConfig::from_str_with(Format::Json, r#"{"automation_interval": 0}"#).unwrap();
        assert_eq!(config.automation_interval, 1);
    }

    #[test]
    fn parse_errors_name_the_source() {
        let error = AutomateConfig::from_str_with(Format::Json, "{ not json").unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("<inline>"));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::detect(Path::new("automate.ron")).unwrap(), Format::Ron);
        assert_eq!(Format::detect(Path::new("automate.toml")).unwrap(), Format::Toml);
        assert_eq!(Format::detect(Path::new("automate.json")).unwrap(), Format::Json);
        assert!(matches!(
            Format::detect(Path::new("automate.yaml")),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("automate-config-{}.toml", std::process::id()));
        std::fs::write(&path, "enabled = false\n").unwrap();
        let config = AutomateConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!config.enabled);

        let missing = AutomateConfig::load(Path::new("/nonexistent/automate.ron"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
