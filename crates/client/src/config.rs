//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for one client run.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Content directory holding `config.toml` and `rosters/`.
    pub data_dir: Option<PathBuf>,
    pub roster: String,
    /// Overrides `step_seconds` from the content config.
    pub step_seconds: Option<f64>,
    pub max_steps: u64,
    pub realtime: bool,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    pub events_json: bool,
}

impl ClientConfig {
    pub const DEFAULT_ROSTER: &'static str = "forest_road";
    pub const DEFAULT_MAX_STEPS: u64 = 100_000;

    pub fn new() -> Self {
        Self {
            roster: Self::DEFAULT_ROSTER.to_owned(),
            max_steps: Self::DEFAULT_MAX_STEPS,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EXPEDITION_DATA_DIR` - Content directory (default: bundled content data)
    /// - `EXPEDITION_ROSTER` - Roster name under `rosters/` (default: forest_road)
    /// - `EXPEDITION_STEP_SECONDS` - Seconds per update (default: from config.toml)
    /// - `EXPEDITION_MAX_STEPS` - Update limit before giving up (default: 100000)
    /// - `EXPEDITION_REALTIME` - Pace updates with wall-clock time (default: false)
    /// - `EXPEDITION_LOG_DIR` - Log directory (default: platform-specific)
    /// - `EXPEDITION_SESSION_ID` - Log subdirectory name (default: timestamp)
    /// - `EXPEDITION_EVENTS_JSON` - Print every event as a JSON line (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::new();

        config.data_dir = env::var("EXPEDITION_DATA_DIR").ok().map(PathBuf::from);

        if let Ok(roster) = env::var("EXPEDITION_ROSTER") {
            config.roster = roster;
        }

        config.step_seconds = read_env::<f64>("EXPEDITION_STEP_SECONDS")
            .filter(|step| step.is_finite() && *step > 0.0);

        if let Some(max_steps) = read_env::<u64>("EXPEDITION_MAX_STEPS") {
            config.max_steps = max_steps.max(1);
        }

        config.realtime = read_flag("EXPEDITION_REALTIME");
        config.events_json = read_flag("EXPEDITION_EVENTS_JSON");

        config.log_dir = env::var("EXPEDITION_LOG_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("EXPEDITION_SESSION_ID").ok();

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// `true`/`false` values are honored; a variable set to anything else counts as on.
fn read_flag(key: &str) -> bool {
    read_env::<bool>(key).unwrap_or_else(|| env::var(key).is_ok())
}
