//! Candidate path generation and grafting.
//!
//! Paths are `/`-prefixed strings relative to the tree root, e.g. `/dir1/subdir2`.
//! They are only turned into filesystem paths at the I/O boundary via
//! [`resolve_dir`].

use std::path::{Path, PathBuf};

use crate::core::types::Level;

/// Cartesian product of the selected names, one segment per level.
///
/// The last level varies fastest. No levels yields `["/"]`; a level with no
/// names yields no paths.
pub fn candidate_paths(levels: &[Level]) -> Vec<String> {
    let mut combos: Vec<Vec<&str>> = vec![Vec::new()];
    for level in levels {
        combos = combos
            .iter()
            .flat_map(|prefix| {
                level.dirs.iter().map(move |dir| {
                    let mut combo = prefix.clone();
                    combo.push(dir.as_str());
                    combo
                })
            })
            .collect();
    }
    combos
        .into_iter()
        .map(|segments| format!("/{}", segments.join("/")))
        .collect()
}

/// First segment of a graft point: `"/sub/inner"` → `"sub"`.
pub fn entry_point(graft_point: &str) -> &str {
    let rest = graft_point.strip_prefix('/').unwrap_or(graft_point);
    rest.split('/').next().unwrap_or_default()
}

/// Rewrite `paths` so they end in `graft_point`, anchored where its entry point
/// already appears in the path.
///
/// Only paths that contain the entry point as a whole segment participate. The
/// rewritten path keeps the original text up to the first occurrence of the
/// entry point and continues with `graft_point`. Results are deduplicated in
/// first-seen order. An empty `graft_point` grafts nothing.
pub fn graft_paths(paths: &[String], graft_point: &str) -> Vec<String> {
    if graft_point.is_empty() {
        return Vec::new();
    }
    let entry = entry_point(graft_point);
    let tail = graft_point.strip_prefix('/').unwrap_or(graft_point);

    let mut grafted: Vec<String> = Vec::new();
    for path in paths {
        if !path.split('/').any(|segment| segment == entry) {
            continue;
        }
        let Some(anchor) = path.find(entry) else {
            continue;
        };
        let candidate = format!("{}{}", &path[..anchor], tail);
        if !grafted.contains(&candidate) {
            grafted.push(candidate);
        }
    }
    grafted
}

/// Paths to run in: grafted paths when any graft applies, otherwise every path
/// with `run_dir` appended.
pub fn run_paths(paths: &[String], run_dir: &str) -> Vec<String> {
    let grafted = graft_paths(paths, run_dir);
    if !grafted.is_empty() {
        return grafted;
    }
    paths.iter().map(|path| format!("{path}{run_dir}")).collect()
}

/// Join a `/`-prefixed tree path onto `root`.
pub fn resolve_dir(root: &Path, path: &str) -> PathBuf {
    let relative = path.trim_start_matches('/');
    if relative.is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn product_varies_last_level_fastest() {
        let levels = vec![Level::new("L1", ["a", "b"]), Level::new("L2", ["x", "y"])];
        assert_eq!(
            candidate_paths(&levels),
            strings(&["/a/x", "/a/y", "/b/x", "/b/y"])
        );
    }

    #[test]
    fn product_size_and_segment_count_match_levels() {
        let levels = vec![
            Level::new("L1", ["a", "b", "c"]),
            Level::new("L2", ["x"]),
            Level::new("L3", ["1", "2"]),
        ];
        let paths = candidate_paths(&levels);
        assert_eq!(paths.len(), 6);
        for path in &paths {
            let segments: Vec<&str> = path[1..].split('/').collect();
            assert_eq!(segments.len(), 3);
            for (segment, level) in segments.iter().zip(&levels) {
                assert!(level.dirs.iter().any(|dir| dir == segment));
            }
        }
    }

    #[test]
    fn no_levels_yields_root_only() {
        assert_eq!(candidate_paths(&[]), strings(&["/"]));
    }

    #[test]
    fn empty_level_yields_nothing() {
        let levels = vec![Level::new("L1", ["a"]), Level::new("L2", Vec::<String>::new())];
        assert!(candidate_paths(&levels).is_empty());
    }

    #[test]
    fn entry_point_is_first_segment() {
        assert_eq!(entry_point("/sub/inner"), "sub");
        assert_eq!(entry_point("/sub"), "sub");
        assert_eq!(entry_point(""), "");
    }

    #[test]
    fn graft_anchors_at_entry_and_dedups() {
        let paths = strings(&["/a/x", "/a/y", "/b/x", "/b/y"]);
        assert_eq!(graft_paths(&paths, "/a/run"), strings(&["/a/run"]));
        assert_eq!(graft_paths(&paths, "/x/run"), strings(&["/a/x/run", "/b/x/run"]));
    }

    #[test]
    fn graft_without_entry_point_is_empty() {
        let paths = strings(&["/a/x", "/b/y"]);
        assert!(graft_paths(&paths, "/test-v2").is_empty());
        assert!(graft_paths(&paths, "").is_empty());
    }

    #[test]
    fn graft_requires_whole_segment_match() {
        let paths = strings(&["/ab/x"]);
        assert!(graft_paths(&paths, "/b/run").is_empty());
    }

    #[test]
    fn graft_anchors_at_first_text_occurrence() {
        // Segment check passes on "b", but the anchor is the first "b" in "/ab".
        let paths = strings(&["/ab/b"]);
        assert_eq!(graft_paths(&paths, "/b/run"), strings(&["/ab/run"]));
    }

    #[test]
    fn run_paths_falls_back_to_concatenation() {
        let paths = strings(&["/a/x", "/b/x"]);
        assert_eq!(
            run_paths(&paths, "/sub-v2"),
            strings(&["/a/x/sub-v2", "/b/x/sub-v2"])
        );
        assert_eq!(run_paths(&paths, ""), paths);
    }

    #[test]
    fn resolve_dir_joins_relative_to_root() {
        let root = Path::new("/tmp/tree");
        assert_eq!(resolve_dir(root, "/a/x"), PathBuf::from("/tmp/tree/a/x"));
        assert_eq!(resolve_dir(root, "/"), PathBuf::from("/tmp/tree"));
    }
}
