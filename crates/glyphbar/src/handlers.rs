//! Subcommand handlers.

use std::error::Error;
use std::net::UdpSocket;

use glyphbar_core::display::DisplayMode;
use glyphbar_daemon::config::DaemonConfig;
use glyphbar_daemon::server::Server;
use glyphbar_daemon::settings::config_dir;
use glyphbar_daemon::settings::settings_path;
use glyphbar_daemon::settings::DisplaySettings;

use crate::commands::ModeArg;
use crate::commands::ServeArgs;

pub type HandlerResult = Result<(), Box<dyn Error>>;

pub fn handle_serve(args: ServeArgs) -> HandlerResult {
    let settings = DisplaySettings::load_or_default(&settings_path());
    let config = apply_args(DaemonConfig::from_env(&settings), args);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let server = Server::bind(config).await?;
        server.run().await
    })?;
    Ok(())
}

/// Lays the serve flags over an env/settings-resolved config. A `--mode
/// rotating` without `--interval` keeps the cadence the config already
/// resolved; the flag only overrides what it actually names.
fn apply_args(mut config: DaemonConfig, args: ServeArgs) -> DaemonConfig {
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(bind) = args.bind {
        config = config.with_bind(bind);
    }
    if let Some(mode) = args.mode {
        let interval = args.interval.unwrap_or(config.rotation_interval_secs);
        config = config.with_mode(mode.to_display_mode(interval));
    } else if let (Some(secs), DisplayMode::Rotating { .. }) = (args.interval, config.mode) {
        // --interval alone retunes an already-rotating mode.
        config = config.with_mode(DisplayMode::rotating(secs));
    }
    if args.init.is_some() {
        config = config.with_init_command(args.init);
    }
    if args.symbols.is_some() {
        config = config.with_symbols_path(args.symbols);
    }
    if let Some(icon_dir) = args.icon_dir {
        config = config.with_icon_dir(icon_dir);
    }
    if args.state.is_some() {
        config = config.with_state_path(args.state);
    }
    config
}

pub fn handle_send(message: &str, host: &str, port: u16) -> HandlerResult {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.send_to(message.as_bytes(), (host, port))?;
    println!("Sent '{message}' to {host}:{port}");
    Ok(())
}

pub fn handle_mode(mode: ModeArg, interval: Option<f64>) -> HandlerResult {
    let path = settings_path();
    let mut settings = DisplaySettings::load_or_default(&path);
    settings.mode = mode.name().to_string();
    if let Some(secs) = interval {
        if secs.is_finite() && secs > 0.0 {
            settings.rotation_interval_secs = secs;
        } else {
            eprintln!(
                "Warning: rotation interval must be positive; keeping {}s",
                settings.rotation_interval_secs
            );
        }
    }
    settings.save(&path)?;

    match mode {
        ModeArg::Rotating => println!(
            "Display mode set to rotating ({}s interval)",
            settings.rotation_interval_secs
        ),
        _ => println!("Display mode set to {}", mode.name()),
    }
    println!("Takes effect at the next daemon start, or right away with SIGHUP.");
    Ok(())
}

pub fn handle_env() -> HandlerResult {
    let settings = DisplaySettings::load_or_default(&settings_path());
    let config = DaemonConfig::from_env(&settings);

    println!("Effective configuration:");
    println!("  Listen:     {}:{}", config.bind, config.port);
    println!("  Mode:       {}", config.mode.label());
    if let DisplayMode::Rotating { interval } = config.mode {
        println!("  Interval:   {}s", interval.as_secs_f64());
    }
    println!(
        "  Init:       {}",
        config.init_command.as_deref().unwrap_or("(none)")
    );
    println!("  Icon dir:   {}", config.icon_dir.display());
    println!(
        "  Symbols:    {}",
        config
            .symbols_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(builtin only)".to_string())
    );
    println!(
        "  State file: {}",
        config
            .state_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(disabled)".to_string())
    );
    println!("  Config dir: {}", config_dir().display());
    println!("  Settings:   {}", settings_path().display());
    println!();

    println!("Environment variables:");
    for key in [
        "GLYPHBAR_PORT",
        "GLYPHBAR_BIND",
        "GLYPHBAR_MODE",
        "GLYPHBAR_INTERVAL",
        "GLYPHBAR_INIT",
        "GLYPHBAR_SYMBOLS",
        "GLYPHBAR_ICON_DIR",
        "GLYPHBAR_STATE",
        "GLYPHBAR_CONFIG_DIR",
        "GLYPHBAR_LOG",
    ] {
        let value = std::env::var(key).unwrap_or_else(|_| "(not set)".to_string());
        println!("  {key}={value}");
    }
    Ok(())
}
