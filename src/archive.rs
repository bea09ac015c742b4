//! On-disk archive of finished matches
//!
//! The details of a match stop changing once it has been played, so a
//! finished match is written to `<data dir>/<match id>.json` and later
//! lookups are answered from disk without touching the network.

use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores match-details payloads keyed by match id
#[derive(Debug, Clone)]
pub struct MatchArchive {
    /// Directory holding one JSON file per finished match
    dir: PathBuf,
}

impl MatchArchive {
    /// Creates an archive in the platform data directory
    ///
    /// Uses `~/.local/share/mobfot/matches/` on Linux, or the equivalent on
    /// other platforms. Returns `None` if no home directory can be found.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "mobfot")?;
        Some(Self::with_dir(project_dirs.data_dir().join("matches")))
    }

    /// Creates an archive rooted at a custom directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, match_id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", match_id))
    }

    /// Loads an archived match, `None` if absent or unreadable
    pub fn load(&self, match_id: u64) -> Option<Value> {
        let content = fs::read_to_string(self.path_for(match_id)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Writes a match payload, creating the directory if needed
    pub fn store(&self, match_id: u64, details: &Value) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(details)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.path_for(match_id), json)
    }
}

/// Whether a match-details payload describes a match that started and finished
///
/// Missing or non-boolean status fields count as not finished.
pub fn is_finished(details: &Value) -> bool {
    let status = &details["header"]["status"];
    status["started"].as_bool() == Some(true) && status["finished"].as_bool() == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn finished_match() -> Value {
        json!({
            "general": {"matchId": 4193490},
            "header": {"status": {"started": true, "finished": true, "scoreStr": "2 - 1"}}
        })
    }

    #[test]
    fn test_is_finished_requires_both_flags() {
        assert!(is_finished(&finished_match()));
        assert!(!is_finished(&json!({"header": {"status": {"started": true, "finished": false}}})));
        assert!(!is_finished(&json!({"header": {"status": {"started": false, "finished": true}}})));
    }

    #[test]
    fn test_is_finished_false_when_status_missing() {
        assert!(!is_finished(&json!({"general": {"matchId": 3901203}})));
        assert!(!is_finished(&json!({"header": {"status": {"started": "yes", "finished": 1}}})));
        assert!(!is_finished(&json!([])));
    }

    #[test]
    fn test_store_then_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let archive = MatchArchive::with_dir(temp_dir.path().join("matches"));

        assert!(archive.load(4193490).is_none());
        archive.store(4193490, &finished_match()).expect("store should succeed");

        assert!(temp_dir.path().join("matches").join("4193490.json").exists());
        assert_eq!(archive.load(4193490), Some(finished_match()));
    }

    #[test]
    fn test_load_ignores_corrupt_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let archive = MatchArchive::with_dir(temp_dir.path().to_path_buf());
        fs::write(temp_dir.path().join("1.json"), "not json").unwrap();

        assert!(archive.load(1).is_none());
    }

    #[test]
    fn test_new_uses_project_data_dir() {
        if let Some(archive) = MatchArchive::new() {
            assert!(archive.dir().to_string_lossy().contains("mobfot"));
        }
    }
}
