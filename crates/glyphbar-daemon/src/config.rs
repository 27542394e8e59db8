//! Daemon runtime configuration.
//!
//! Precedence, highest first: CLI flags (applied by the caller through the
//! `with_*` builders), environment variables, the persisted settings file,
//! built-in defaults. Invalid values never abort startup; they warn and fall
//! back.

use std::env;
use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use glyphbar_core::display::DisplayMode;
use tracing::warn;

use crate::settings::config_dir;
use crate::settings::DisplaySettings;

pub const DEFAULT_PORT: u16 = 1738;
const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub port: u16,
    pub bind: IpAddr,
    pub mode: DisplayMode,
    /// Rotation cadence resolved from the environment or the settings
    /// file, kept even when `mode` is not rotating so a later switch to
    /// rotating can reuse it.
    pub rotation_interval_secs: f64,
    /// Applied at startup as if it had arrived over the wire.
    pub init_command: Option<String>,
    /// Extra symbol ids, one per line, merged into the builtin catalog.
    pub symbols_path: Option<PathBuf>,
    /// Directory searched for `<name>.png` custom images.
    pub icon_dir: PathBuf,
    /// When set, every transition is mirrored to this file as JSON.
    pub state_path: Option<PathBuf>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self::from_env(&DisplaySettings::default())
    }
}

impl DaemonConfig {
    /// Reads the `GLYPHBAR_*` environment, with `settings` filling the
    /// display mode and interval where the environment is silent.
    pub fn from_env(settings: &DisplaySettings) -> Self {
        let mode_name = env_string("GLYPHBAR_MODE").unwrap_or_else(|| settings.mode.clone());
        let interval_secs =
            env_interval("GLYPHBAR_INTERVAL").unwrap_or(settings.rotation_interval_secs);
        let mode = DisplayMode::from_name(&mode_name, interval_secs).unwrap_or_else(|| {
            warn!(value = %mode_name, "Unknown display mode; using single");
            DisplayMode::Single
        });

        Self {
            port: env_port("GLYPHBAR_PORT"),
            bind: env_bind("GLYPHBAR_BIND"),
            mode,
            rotation_interval_secs: interval_secs,
            init_command: env_string("GLYPHBAR_INIT"),
            symbols_path: env_path("GLYPHBAR_SYMBOLS"),
            icon_dir: env_path("GLYPHBAR_ICON_DIR").unwrap_or_else(|| config_dir().join("icons")),
            state_path: env_path("GLYPHBAR_STATE"),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_bind(mut self, bind: IpAddr) -> Self {
        self.bind = bind;
        self
    }

    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_init_command(mut self, init_command: Option<String>) -> Self {
        self.init_command = init_command;
        self
    }

    pub fn with_symbols_path(mut self, symbols_path: Option<PathBuf>) -> Self {
        self.symbols_path = symbols_path;
        self
    }

    pub fn with_icon_dir(mut self, icon_dir: PathBuf) -> Self {
        self.icon_dir = icon_dir;
        self
    }

    pub fn with_state_path(mut self, state_path: Option<PathBuf>) -> Self {
        self.state_path = state_path;
        self
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn env_port(key: &str) -> u16 {
    match env::var(key) {
        Err(_) => DEFAULT_PORT,
        Ok(raw) => match raw.trim().parse::<u16>() {
            Ok(port) if port > 0 => port,
            _ => {
                warn!(key, value = %raw, "Invalid port; using default");
                DEFAULT_PORT
            }
        },
    }
}

fn env_bind(key: &str) -> IpAddr {
    match env::var(key) {
        Err(_) => DEFAULT_BIND,
        Ok(raw) => match raw.trim().parse() {
            Ok(addr) => addr,
            Err(_) => {
                warn!(key, value = %raw, "Invalid bind address; using loopback");
                DEFAULT_BIND
            }
        },
    }
}

fn env_interval(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Some(secs),
        _ => {
            warn!(key, value = %raw, "Invalid rotation interval; ignoring");
            None
        }
    }
}
