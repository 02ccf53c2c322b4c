//! `trn --plant`: create the declared tree on disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::core::choice::non_excluded;
use crate::core::paths::{candidate_paths, resolve_dir};
use crate::core::types::Level;

/// Create every leaf directory of `levels` under `root`, skipping excluded
/// names. Existing directories are left alone.
///
/// Returns the leaf directories in product order.
pub fn plant(levels: &[Level], root: &Path, excluded: &BTreeSet<String>) -> Result<Vec<PathBuf>> {
    let kept: Vec<Level> = levels
        .iter()
        .map(|level| Level {
            name: level.name.clone(),
            dirs: non_excluded(&level.dirs, excluded),
        })
        .collect();

    let mut planted = Vec::new();
    for path in candidate_paths(&kept) {
        let dir = resolve_dir(root, &path);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        planted.push(dir);
    }
    info!(root = %root.display(), count = planted.len(), "planted tree");
    Ok(planted)
}
