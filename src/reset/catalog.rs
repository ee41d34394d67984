use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::common::errors::Result;
use crate::platform::Platform;

/// A snapshot of environment variables.
///
/// The catalog reads variables through this rather than `std::env` so it
/// can be computed for any environment, not just the current process.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment. Variables that are not
    /// valid UTF-8 are left out.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    /// Look up a variable; empty values count as unset
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    fn dir_or(&self, key: &str, fallback: PathBuf) -> PathBuf {
        self.get(key).map(PathBuf::from).unwrap_or(fallback)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Paths that hold Zoom's local state on `platform`, in a fixed order with
/// duplicates removed. Pure: nothing here touches the filesystem.
pub fn catalog(platform: Platform, env: &Environment, home: &Path) -> Vec<PathBuf> {
    let candidates = match platform {
        Platform::Windows => windows_paths(env, home),
        Platform::Macos => macos_paths(home),
        Platform::Linux => linux_paths(home),
    };

    let mut paths: Vec<PathBuf> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !paths.contains(&candidate) {
            paths.push(candidate);
        }
    }
    paths
}

/// Like [`catalog`], for a platform given by name. Unknown names are an
/// `UnsupportedPlatform` error, never an empty list.
pub fn catalog_for(platform: &str, env: &Environment, home: &Path) -> Result<Vec<PathBuf>> {
    let platform: Platform = platform.parse()?;
    Ok(catalog(platform, env, home))
}

fn windows_paths(env: &Environment, home: &Path) -> Vec<PathBuf> {
    let appdata = env.dir_or("APPDATA", home.join("AppData").join("Roaming"));
    let localappdata = env.dir_or("LOCALAPPDATA", home.join("AppData").join("Local"));

    vec![
        appdata.join("Zoom"),
        localappdata.join("Zoom"),
        appdata.join("zoom.us"),
        localappdata.join("zoom.us"),
        localappdata.join("ZoomOpener"),
        localappdata.join("Temp").join("zoom"),
    ]
}

fn macos_paths(home: &Path) -> Vec<PathBuf> {
    let library = home.join("Library");
    vec![
        library.join("Application Support").join("zoom.us"),
        library.join("Application Support").join("ZoomOpener"),
        library.join("Preferences").join("us.zoom.xos.plist"),
        library.join("Caches").join("us.zoom.xos"),
        library.join("Logs").join("zoom.us"),
        library.join("WebKit").join("us.zoom.xos"),
        library.join("Cookies").join("us.zoom.xos.binarycookies"),
    ]
}

fn linux_paths(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join(".config").join("zoom"),
        home.join(".cache").join("zoom"),
        home.join(".zoom"),
        home.join(".var").join("app").join("us.zoom.Zoom"),
        home.join(".cache").join("ZoomOpener"),
    ]
}
