// Store location resolution

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable overriding the default store location
pub const STORE_ENV: &str = "GYMLOG_HOME";

/// Directory under the platform data dir used when nothing else is given
const APP_DIR: &str = "gymlog";

/// Pick the directory the store lives under
///
/// Precedence: explicit flag, then `GYMLOG_HOME`, then the platform data
/// directory, then the current directory.
pub fn resolve_store_path(flag: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve using the process environment
pub fn store_path_from_env(flag: Option<PathBuf>) -> PathBuf {
    resolve_store_path(flag, std::env::var_os(STORE_ENV))
}
