//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "app";
const ORGANIZATION: &str = "bucketlist";
const APPLICATION: &str = "bucketlist";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for persistent application data.
///
/// - Linux: `$XDG_DATA_HOME/bucketlist` or `~/.local/share/bucketlist`
/// - macOS: `~/Library/Application Support/app.bucketlist.bucketlist`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory for regenerable data such as logs.
///
/// - Linux: `$XDG_CACHE_HOME/bucketlist` or `~/.cache/bucketlist`
/// - macOS: `~/Library/Caches/app.bucketlist.bucketlist`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the settings database.
pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

/// Path to the current log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Archive `latest.log` under a timestamped name and prune old archives.
///
/// Call at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache, &chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());
}

fn rotate_logs_in(dir: &Path, stamp: &str) {
    let latest = dir.join("latest.log");
    if latest.exists() {
        let _ = fs::rename(&latest, dir.join(format!("{stamp}.log")));
    }
    cleanup_old_logs(dir);
}

/// Keep only the newest MAX_OLD_LOGS archives.
fn cleanup_old_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != "latest.log"
        })
        .collect();

    // oldest first; archive names sort chronologically
    logs.sort_by_key(|e| e.file_name());

    if logs.len() > MAX_OLD_LOGS {
        for entry in logs.iter().take(logs.len() - MAX_OLD_LOGS) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_archives_latest_and_prunes() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..MAX_OLD_LOGS + 3 {
            fs::write(dir.path().join(format!("2024010{}_0000{:02}.log", i / 10, i)), "").unwrap();
        }
        fs::write(dir.path().join("latest.log"), "current").unwrap();

        rotate_logs_in(dir.path(), "20990101_000000");

        assert!(!dir.path().join("latest.log").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("20990101_000000.log")).unwrap(),
            "current"
        );
        let remaining = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(remaining, MAX_OLD_LOGS);
    }
}
