use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::Value;

use crate::error::{Error, Result};
use crate::selector::DurationSelector;

pub const DEFAULT_CONFIG_FILE: &str = "cocktails.toml";

fn default_tick_ms() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub minutes: u32,
    pub seconds: u32,
}

impl TimerConfig {
    pub fn selector(&self) -> DurationSelector {
        DurationSelector::new(self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub extra: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiConfig,
    pub timer: TimerConfig,
    pub assets: AssetsConfig,
    pub catalog: CatalogConfig,
    pub log: LogConfig,
    /// File the config was read from; relative paths resolve against its
    /// directory.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub fn resolve_path(&self, p: &Path) -> PathBuf {
        match &self.source {
            Some(src) => resolve_ref_path(src, p),
            None => p.to_path_buf(),
        }
    }

    pub fn assets_dir(&self) -> Option<PathBuf> {
        self.assets.dir.as_deref().map(|d| self.resolve_path(d))
    }

    pub fn extra_catalogs(&self) -> Vec<PathBuf> {
        self.catalog
            .extra
            .iter()
            .map(|p| self.resolve_path(p))
            .collect()
    }
}

fn merge_values(base: &mut Value, child: Value) {
    match (base, child) {
        (Value::Table(base_tbl), Value::Table(child_tbl)) => {
            for (k, v) in child_tbl {
                match base_tbl.get_mut(&k) {
                    Some(existing) => merge_values(existing, v),
                    None => {
                        base_tbl.insert(k, v);
                    }
                }
            }
        }
        (base_slot, child_val) => {
            *base_slot = child_val;
        }
    }
}

fn resolve_ref_path(from_file: &Path, reference: &Path) -> PathBuf {
    if reference.is_absolute() {
        reference.to_path_buf()
    } else {
        from_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(reference)
    }
}

fn load_value_inner(path: &Path, stack: &mut HashSet<PathBuf>) -> Result<Value> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !stack.insert(canonical.clone()) {
        return Err(Error::msg(format!(
            "config extends cycle detected at {}",
            canonical.display()
        )));
    }

    let data = fs::read_to_string(path)
        .map_err(|e| Error::msg(format!("failed to read config {}: {e}", path.display())))?;
    let mut value: Value = toml::from_str(&data)
        .map_err(|e| Error::msg(format!("TOML parse error in {}: {e}", path.display())))?;

    let mut out = Value::Table(Default::default());
    if let Some(ext) = value.get("extends").and_then(Value::as_str) {
        let base_path = resolve_ref_path(path, Path::new(ext));
        out = load_value_inner(&base_path, stack)?;
    }
    if let Some(tbl) = value.as_table_mut() {
        tbl.remove("extends");
    }

    merge_values(&mut out, value);

    stack.remove(&canonical);
    Ok(out)
}

pub fn load(path: &Path) -> Result<AppConfig> {
    let mut stack = HashSet::<PathBuf>::new();
    let value = load_value_inner(path, &mut stack)?;
    let mut cfg: AppConfig = value
        .try_into()
        .map_err(|e| Error::msg(format!("invalid config {}: {e}", path.display())))?;
    cfg.source = Some(path.to_path_buf());
    Ok(cfg)
}

/// Explicit path must exist; otherwise `./cocktails.toml` is used when present
/// and built-in defaults when not.
pub fn load_or_default(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(p) = explicit {
        return load(p);
    }
    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        return load(fallback);
    }
    Ok(AppConfig::default())
}
