//! Daemon side of glyphbar: configuration, catalogs, renderers, and the
//! UDP server loop around the core engine.

#![deny(clippy::all)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod render;
pub mod server;
pub mod settings;

pub use catalog::IconDir;
pub use catalog::SymbolSet;
pub use config::DaemonConfig;
pub use config::DEFAULT_PORT;
pub use error::DaemonError;
pub use render::LogRenderer;
pub use render::StateFileRenderer;
pub use server::Server;
pub use settings::config_dir;
pub use settings::settings_path;
pub use settings::DisplaySettings;
pub use settings::SettingsError;
