use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;

use glyphbar::commands::Cli;
use glyphbar::commands::Commands;
use glyphbar::handlers;
use glyphbar::telemetry;
use glyphbar_daemon::DaemonError;
use glyphbar_daemon::SettingsError;

fn main() {
    let cli = Cli::parse();
    let _telemetry = telemetry::init_tracing("info");

    if let Err(e) = run(cli) {
        if let Some(daemon_error) = e.downcast_ref::<DaemonError>() {
            eprintln!("Error: {daemon_error}");
            eprintln!("Suggestion: {}", daemon_error.suggestion());
            std::process::exit(74); // EX_IOERR
        } else if let Some(settings_error) = e.downcast_ref::<SettingsError>() {
            eprintln!("Error: {settings_error}");
            eprintln!("Suggestion: check that the config directory is writable, or point GLYPHBAR_CONFIG_DIR somewhere that is.");
            std::process::exit(74); // EX_IOERR
        } else {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Serve(args) => handlers::handle_serve(args),
        Commands::Send {
            message,
            host,
            port,
        } => handlers::handle_send(&message, &host, port),
        Commands::Mode { mode, interval } => handlers::handle_mode(mode, interval),
        Commands::Env => handlers::handle_env(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "glyphbar", &mut std::io::stdout());
            Ok(())
        }
    }
}
