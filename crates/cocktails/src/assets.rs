use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::text::sanitize_line;

const MAX_ICON_LINES: usize = 8;

/// Fallback glyph drawn when an icon does not resolve.
pub const PLACEHOLDER_ICON: &str = "[?]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub lines: Vec<String>,
}

/// Resolves a recipe id to its icon. A miss is normal and must be rendered
/// as a placeholder.
pub trait AssetResolver {
    fn icon(&self, id: &str) -> Option<Icon>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetResolver for NoAssets {
    fn icon(&self, _id: &str) -> Option<Icon> {
        None
    }
}

/// Reads `<dir>/<id>.txt` as a small text-art icon.
#[derive(Debug, Clone)]
pub struct DirAssets {
    dir: PathBuf,
}

impl DirAssets {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl AssetResolver for DirAssets {
    fn icon(&self, id: &str) -> Option<Icon> {
        // Ids are free-form; keep lookups inside the asset directory.
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return None;
        }
        let path = self.dir.join(format!("{id}.txt"));
        let raw = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                debug!(id, path = %path.display(), "icon not resolved: {e}");
                return None;
            }
        };
        let lines: Vec<String> = raw
            .lines()
            .take(MAX_ICON_LINES)
            .map(|l| sanitize_line(l).trim_end().to_string())
            .collect();
        if lines.iter().all(|l| l.is_empty()) {
            return None;
        }
        Some(Icon { lines })
    }
}
