//! Test fixture loader for VQAL selection scenarios and feature files.
//!
//! Golden scenarios live under `golden/selection/` as JSON. Feature files
//! use the same binary layout as the query engine's feature source.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// Encode rows in the feature-file layout.
///
/// Format: header (count: u32 LE, dims: u32 LE) + body (count * dims * f32 LE).
pub fn encode_features(rows: &[Vec<f32>]) -> Vec<u8> {
    let dims = rows.first().map_or(0, Vec::len);
    assert!(
        rows.iter().all(|r| r.len() == dims),
        "All feature rows must have {} values",
        dims
    );
    let mut bytes = Vec::with_capacity(8 + rows.len() * dims * 4);
    bytes.extend_from_slice(&(rows.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&(dims as u32).to_le_bytes());
    for value in rows.iter().flatten() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Points spread around `clusters` well-separated centers in `dims`
/// dimensions. Row `i` belongs to cluster `i % clusters` and sits
/// `(i / clusters) * 0.01` away from its center on every axis.
pub fn clustered_rows(count: usize, clusters: usize, dims: usize) -> Vec<Vec<f32>> {
    let clusters = clusters.max(1);
    (0..count)
        .map(|i| {
            let center = (i % clusters) as f32 * 10.0;
            let offset = (i / clusters) as f32 * 0.01;
            vec![center + offset; dims]
        })
        .collect()
}
