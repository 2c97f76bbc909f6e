//! CLI-specific configuration for the terminal host.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal host configuration.
///
/// Game, strategy and persistence settings live in
/// [`RuntimeConfig`](runtime::RuntimeConfig); this only covers what the
/// terminal itself needs.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// How long a damage number stays on screen.
    pub damage_display: Duration,
    pub log_dir: PathBuf,
    /// Log sub-directory name; generated from the clock when unset.
    pub session_id: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            damage_display: Duration::from_millis(Self::DEFAULT_DAMAGE_DISPLAY_MS),
            log_dir: default_log_dir(),
            session_id: None,
        }
    }
}

impl CliConfig {
    pub const DEFAULT_DAMAGE_DISPLAY_MS: u64 = 600;

    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DAMAGE_DISPLAY_MS` - Damage number display time (default: 600)
    /// - `LOG_DIR` - Root directory for session logs (default: platform cache dir)
    /// - `SESSION_ID` - Log session name (default: `session_<unix time>`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("DAMAGE_DISPLAY_MS") {
            config.damage_display = Duration::from_millis(ms);
        }
        if let Ok(dir) = env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        config.session_id = env::var("SESSION_ID").ok().filter(|id| !id.is_empty());

        config
    }
}

/// Platform cache directory for logs.
///
/// - Linux: `~/.cache/tactics/logs`
/// - macOS: `~/Library/Caches/tactics/logs`
/// - Fallback: `<tmp>/tactics/logs`
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tactics")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| env::temp_dir().join("tactics").join("logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
