/// Configuration schema and defaults for launchdash.
///
/// Sections: `[dataset]` (with `[dataset.columns]`), `[server]`,
/// `[dashboard]` (with `[dashboard.site_labels]`) and `[logging]`.
///
/// Every field has a built-in default; config files only need the values
/// they override.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::ColumnNames;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level launchdash configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub dataset: DatasetConfig,
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [dataset]
// ---------------------------------------------------------------------------

/// Where the launch table lives and how its columns are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// CSV path, relative to the working directory unless absolute.
    pub path: String,
    pub columns: ColumnNames,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "spacex_launch_dash.csv".to_string(),
            columns: ColumnNames::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `launchdash serve`.
    pub addr: String,
    /// Open the dashboard in the default browser on start.
    pub open_browser: bool,
    /// Live sessions kept in memory; the oldest is evicted beyond this.
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8050".to_string(),
            open_browser: true,
            max_sessions: 64,
        }
    }
}

// ---------------------------------------------------------------------------
// [dashboard]
// ---------------------------------------------------------------------------

/// Page title, slider granularity and site display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Step of the payload range slider (kg).
    pub slider_step_kg: f64,
    /// Long names shown in the site selector, keyed by site id.
    pub site_labels: BTreeMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let site_labels = [
            (
                "CCAFS LC-40",
                "Cape Canaveral Space Launch Complex 40 (LC-40)",
            ),
            (
                "CCAFS SLC-40",
                "Cape Canaveral Space Launch Complex 40 (SLC-40)",
            ),
            ("KSC LC-39A", "Kennedy Space Center Launch Complex 39A (LC-39A)"),
            (
                "VAFB SLC-4E",
                "Vandenberg Space Force Base Space Launch Complex 4E (SLC-4E)",
            ),
        ]
        .into_iter()
        .map(|(id, label)| (id.to_string(), label.to_string()))
        .collect();

        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            slider_step_kg: 2000.0,
            site_labels,
        }
    }
}

impl DashboardConfig {
    /// Display name of a site, falling back to its id.
    pub fn site_label<'a>(&'a self, site: &'a str) -> &'a str {
        self.site_labels.get(site).map(String::as_str).unwrap_or(site)
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset:
    /// `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl DashConfig {
    /// Annotated default config, written by `launchdash config init`.
    pub fn default_toml() -> String {
        r#"# launchdash Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Command-line flags
#   2. Environment variables (LAUNCHDASH_*)
#   3. Project config (.launchdash.toml in current directory)
#   4. User global config (~/.launchdash/config.toml)
#   5. Built-in defaults

[dataset]
path = "spacex_launch_dash.csv"

[dataset.columns]
site = "Launch Site"
payload_mass = "Payload Mass (kg)"
outcome = "class"                     # 1 = success, 0 = failure
booster_category = "Booster Version Category"

[server]
addr = "127.0.0.1:8050"
open_browser = true
max_sessions = 64

[dashboard]
title = "SpaceX Launch Records Dashboard"
slider_step_kg = 2000.0

[dashboard.site_labels]
"CCAFS LC-40" = "Cape Canaveral Space Launch Complex 40 (LC-40)"
"CCAFS SLC-40" = "Cape Canaveral Space Launch Complex 40 (SLC-40)"
"KSC LC-39A" = "Kennedy Space Center Launch Complex 39A (LC-39A)"
"VAFB SLC-4E" = "Vandenberg Space Force Base Space Launch Complex 4E (SLC-4E)"

[logging]
level = "info"                        # error | warn | info | debug | trace (RUST_LOG wins)
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = DashConfig::default();
        assert_eq!(config.dataset.path, "spacex_launch_dash.csv");
        assert_eq!(config.dataset.columns.outcome, "class");
        assert_eq!(config.server.addr, "127.0.0.1:8050");
        assert!(config.server.open_browser);
        assert_eq!(config.server.max_sessions, 64);
        assert_eq!(config.dashboard.slider_step_kg, 2000.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let config: DashConfig = toml::from_str("").unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn deserialize_minimal_toml() {
        let toml_str = r#"
[server]
addr = "0.0.0.0:9000"
"#;
        let config: DashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:9000");
        assert!(config.server.open_browser);
        assert_eq!(config.dataset.columns, ColumnNames::default());
    }

    #[test]
    fn default_toml_parses_back() {
        let config: DashConfig = toml::from_str(&DashConfig::default_toml()).unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn site_label_falls_back_to_id() {
        let dashboard = DashboardConfig::default();
        assert_eq!(
            dashboard.site_label("KSC LC-39A"),
            "Kennedy Space Center Launch Complex 39A (LC-39A)"
        );
        assert_eq!(dashboard.site_label("Boca Chica"), "Boca Chica");
    }
}
