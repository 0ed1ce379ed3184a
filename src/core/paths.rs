//! core::paths
//!
//! Config file locations and project root discovery.
//!
//! # Locations
//!
//! - **Global**: `$CARTWRIGHT_CONFIG` if set, else
//!   `<OS config dir>/cartwright/options.cfg` (e.g.
//!   `~/.config/cartwright/options.cfg` on Linux).
//! - **Local**: `<project root>/.cartwright/user.cfg`, where the project
//!   root is the nearest ancestor directory containing a `cart.toml`
//!   marker file.
//!
//! Location helpers only compute paths; none of them require the file to
//! exist. The one filesystem check is the marker walk in
//! [`find_project_root`].
//!
//! # Example
//!
//! ```
//! use cartwright::core::paths;
//! use std::path::Path;
//!
//! let root = Path::new("/work/game");
//! assert_eq!(
//!     paths::local_config_path(root),
//!     Path::new("/work/game/.cartwright/user.cfg").to_path_buf()
//! );
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the global config file path.
pub const GLOBAL_CONFIG_ENV: &str = "CARTWRIGHT_CONFIG";

/// Directory under the OS config dir holding the global config.
pub const GLOBAL_CONFIG_DIR: &str = "cartwright";

/// File name of the global config.
pub const GLOBAL_CONFIG_FILE: &str = "options.cfg";

/// Marker file whose presence defines a project root.
pub const PROJECT_MARKER: &str = "cart.toml";

/// Directory under the project root holding local tool state.
pub const LOCAL_CONFIG_DIR: &str = ".cartwright";

/// File name of the project-local config.
pub const LOCAL_CONFIG_FILE: &str = "user.cfg";

/// Get the global config file path.
///
/// `$CARTWRIGHT_CONFIG` wins when set and non-empty, whether or not the
/// file exists (the `config` command writes through it). Otherwise the
/// OS per-user config directory is used; `None` means no config
/// directory could be determined.
pub fn global_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(GLOBAL_CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
}

/// Find the project root containing `start`, if any.
///
/// Walks `start` and each of its ancestors looking for the
/// [`PROJECT_MARKER`] file. Returns the directory holding the marker.
/// `None` is not an error; it just means `start` is outside any project.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).is_file())
        .map(Path::to_path_buf)
}

/// Get the local config file path for a project root.
pub fn local_config_path(root: &Path) -> PathBuf {
    root.join(LOCAL_CONFIG_DIR).join(LOCAL_CONFIG_FILE)
}

/// Locate the config file for a scope.
///
/// With no project directory, returns the global config path. With one,
/// walks up for the project marker and returns the local config path
/// under the discovered root. `None` means no location applies (no OS
/// config dir, or no marker anywhere up the tree).
pub fn locate_config_file(project_dir: Option<&Path>) -> Option<PathBuf> {
    match project_dir {
        None => global_config_path(),
        Some(dir) => find_project_root(dir).map(|root| local_config_path(&root)),
    }
}
