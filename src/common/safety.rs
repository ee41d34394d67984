use std::path::Path;

/// Paths that must NEVER be moved under any circumstances.
/// A safety net against a catalog built from a broken environment
/// (e.g. `APPDATA=/`).
const PROTECTED_PATHS: &[&str] = &[
    "/",
    "/System",
    "/Applications",
    "/Users",
    "/Library",
    "/home",
    "/root",
    "/usr",
    "/bin",
    "/sbin",
    "/var",
    "/etc",
    "/opt",
    "/private",
    "/tmp",
    "/Volumes",
];

/// Paths under home that must never be moved entirely
const PROTECTED_HOME_DIRS: &[&str] = &[
    "Desktop",
    "Documents",
    "Downloads",
    "Library",
    "Library/Application Support",
    "Library/Caches",
    "Library/Preferences",
    "AppData",
    "AppData/Roaming",
    "AppData/Local",
    "AppData/Local/Temp",
    ".config",
    ".cache",
    ".var",
    ".ssh",
    ".gnupg",
];

/// Check if a path is protected and should NEVER be moved.
///
/// Relative paths are protected too: they would resolve against whatever
/// directory the tool happens to be run from.
pub fn is_protected(path: &Path, home: &Path) -> bool {
    if !path.is_absolute() {
        return true;
    }

    if PROTECTED_PATHS.iter().any(|p| path == Path::new(p)) {
        return true;
    }

    if path == home {
        return true;
    }

    PROTECTED_HOME_DIRS.iter().any(|dir| path == home.join(dir))
}
