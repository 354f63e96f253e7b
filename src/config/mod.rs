/// Configuration system for launchdash.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::DashConfig::default()`]
/// 2. **User global config**: `~/.launchdash/config.toml`
/// 3. **Project local config**: `.launchdash.toml` in the current directory
/// 4. **Environment variables**: `LAUNCHDASH_*` overrides
///
/// Command-line flags are applied on top by the binary.
///
/// File layers are merged key by key: a project file that only sets
/// `server.addr` keeps every other value from the global file.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::DashConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Missing files are skipped. A file that exists but is not valid TOML is an
/// error: starting the dashboard against a half-read config would be worse
/// than refusing to start.
pub fn load() -> Result<DashConfig> {
    let layers: Vec<PathBuf> = [global_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .collect();

    let mut config = load_layers(&layers)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Merge defaults with each existing file in `layers`, in order.
pub fn load_layers(layers: &[PathBuf]) -> Result<DashConfig> {
    let mut merged = toml::Value::try_from(DashConfig::default())
        .context("failed to serialize default config")?;

    for path in layers {
        let Some(overlay) = read_toml_file(path)? else {
            continue;
        };
        merge_values(&mut merged, overlay);
    }

    merged
        .try_into()
        .context("merged configuration does not match the schema")
}

/// Read a TOML file as a raw value tree. `Ok(None)` when the file is absent.
fn read_toml_file(path: &Path) -> Result<Option<toml::Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let value = toml::from_str(&content)
        .with_context(|| format!("invalid TOML in config file {}", path.display()))?;
    Ok(Some(value))
}

/// Deep-merge `overlay` into `base`: tables merge recursively, any other
/// value in the overlay replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.launchdash/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".launchdash").join("config.toml"))
}

/// Path to the project local config: `.launchdash.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".launchdash.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Supported variables:
/// - `LAUNCHDASH_DATA`: dataset CSV path
/// - `LAUNCHDASH_ADDR`: server listen address
/// - `LAUNCHDASH_OPEN_BROWSER`: open a browser on start (`1`/`true`/`yes`/`on`)
/// - `LAUNCHDASH_MAX_SESSIONS`: live session cap
/// - `LAUNCHDASH_LOG_LEVEL`: default log level
///
/// `lookup` abstracts the environment so tests need not mutate it.
fn apply_env_overrides(config: &mut DashConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("LAUNCHDASH_DATA")
        && !val.is_empty()
    {
        config.dataset.path = val;
    }
    if let Some(val) = lookup("LAUNCHDASH_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Some(val) = lookup("LAUNCHDASH_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Some(val) = lookup("LAUNCHDASH_MAX_SESSIONS")
        && let Ok(n) = val.parse::<usize>()
        && n > 0
    {
        config.server.max_sessions = n;
    }
    if let Some(val) = lookup("LAUNCHDASH_LOG_LEVEL")
        && !val.is_empty()
    {
        config.logging.level = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.launchdash/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    write_default_config(&path, force)?;
    Ok(path)
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    fs::write(path, DashConfig::default_toml()).context("failed to write config file")
}

/// Set a single config key in the global config file.
///
/// Supports dotted keys like `server.addr` or `dashboard.site_labels.KSC LC-39A`.
pub fn set_config_value(key: &str, value: &str) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    set_value_in_file(&path, key, value)?;
    Ok(path)
}

/// Set a dotted key in the TOML file at `path`, seeding it with the defaults
/// when it does not exist yet.
fn set_value_in_file(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut root: toml::Value = match read_toml_file(path)? {
        Some(existing) => existing,
        None => toml::Value::try_from(DashConfig::default())
            .context("failed to serialize default config")?,
    };

    set_toml_value(&mut root, key, value)?;

    // Reject edits that would make the file unloadable.
    let mut check = toml::Value::try_from(DashConfig::default())
        .context("failed to serialize default config")?;
    merge_values(&mut check, root.clone());
    let _: DashConfig = check
        .try_into()
        .with_context(|| format!("'{value}' is not a valid value for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The new value takes the type of the value it replaces; new keys are
/// stored as strings.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("invalid config key '{key}'");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];
    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected number for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(toml::Value::Table(_)) => {
            anyhow::bail!("'{key}' is a section, not a value")
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show a resolved config as TOML.
pub fn to_toml(config: &DashConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
