//! Search-path resolution.
//!
//! A package manager counts as present only if its executable resolves on the
//! process search path. Lookup walks `PATH` directly instead of shelling out
//! to `which`/`where`, whose behavior differs between systems.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// File names to try for `tool` in each search directory.
#[cfg(windows)]
fn candidate_names(tool: &str) -> Vec<String> {
    if Path::new(tool).extension().is_some() {
        return vec![tool.to_string()];
    }
    let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    pathext
        .split(';')
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!("{}{}", tool, ext.to_lowercase()))
        .collect()
}

#[cfg(not(windows))]
fn candidate_names(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = candidate_names(tool);
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Whether `tool` resolves on the current process search path.
pub fn command_available(tool: &str) -> bool {
    let found = resolve_tool_path(tool, &parse_system_path());
    tracing::debug!("Probe {}: {:?}", tool, found);
    found.is_some()
}

/// Build a search path value with `dir` in front, without duplicating it.
pub fn path_with_prepended(dir: &Path, current: &[PathBuf]) -> Option<OsString> {
    let mut entries = vec![dir.to_path_buf()];
    entries.extend(current.iter().filter(|p| p.as_path() != dir).cloned());
    std::env::join_paths(entries).ok()
}

/// Prepend a directory to this process's PATH.
///
/// Child processes launched afterwards, and later probes, see the new entry.
pub fn prepend_path(dir: &Path) {
    if let Some(new_path) = path_with_prepended(dir, &parse_system_path()) {
        std::env::set_var("PATH", new_path);
    }
}
