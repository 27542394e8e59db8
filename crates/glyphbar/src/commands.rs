use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
pub use clap_complete::Shell;

use glyphbar_core::display::DisplayMode;

const LONG_ABOUT: &str = r#"glyphbar shows a tintable status glyph driven by UDP datagrams.

Run the daemon once, then point any script or tool at its port. Each
datagram is one UTF-8 command; there are no replies and no handshake, so a
shell one-liner is a full client.

WIRE PROTOCOL (one command per datagram):
    quit                      terminate the daemon
    star.fill                 cataloged symbol, accent tint
    star.fill#ff0000          cataloged symbol, explicit color
    bolt.fill#ff0,cloud.fill#0ff
                              symbol list, laid out per the display mode
    red | hollow | question   legacy color words
    <name>                    custom image <icon-dir>/<name>.png

    Colors are 3- or 6-digit hex (with or without '#') or one of: white,
    red, orange, yellow, green, cyan, blue, purple, black, gray, accent.
    Unrecognized input never errors; it falls back to a marker icon.

EXAMPLES:
    glyphbar serve --port 1738
    glyphbar send star.fill#ff0000
    glyphbar send "bolt.fill#ff0,cloud.fill#0ff"
    glyphbar mode rotating --interval 1.5
    echo -n green | nc -u -w0 127.0.0.1 1738
    glyphbar send quit"#;

#[derive(Parser)]
#[command(name = "glyphbar")]
#[command(author, version)]
#[command(about = "UDP-controlled status glyph daemon")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the daemon and listen for display commands
    #[command(long_about = r#"Run the daemon and listen for display commands.

Flags beat environment variables, which beat the persisted settings file.
The matching variables are GLYPHBAR_PORT, GLYPHBAR_BIND, GLYPHBAR_MODE,
GLYPHBAR_INTERVAL, GLYPHBAR_INIT, GLYPHBAR_SYMBOLS, GLYPHBAR_ICON_DIR and
GLYPHBAR_STATE. Invalid values are logged and replaced with defaults; the
daemon always comes up.

SIGHUP makes a running daemon re-read the settings file and apply the
resolved display mode without a restart."#)]
    Serve(ServeArgs),

    /// Send one command datagram to a running daemon
    #[command(long_about = r#"Send one command datagram to a running daemon.

The message is sent as-is; see the top-level help for the wire protocol.
Delivery is fire-and-forget: a missing daemon is not detectable here."#)]
    Send {
        /// Command text, e.g. 'star.fill#ff0000' or 'quit'
        message: String,

        /// Daemon host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Daemon port
        #[arg(short, long, env = "GLYPHBAR_PORT", default_value_t = glyphbar_daemon::DEFAULT_PORT)]
        port: u16,
    },

    /// Persist the display mode used for multi-symbol commands
    #[command(long_about = r#"Persist the display mode used for multi-symbol commands.

Writes the settings file that `serve` reads at startup. A running daemon
keeps its current mode until it is restarted or sent SIGHUP."#)]
    Mode {
        /// Display mode
        #[arg(value_enum)]
        mode: ModeArg,

        /// Rotation interval in seconds (rotating mode)
        #[arg(short, long)]
        interval: Option<f64>,
    },

    /// Print the effective configuration and where it comes from
    Env,

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Default, clap::Args)]
pub struct ServeArgs {
    /// UDP port to listen on (default 1738)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind (default 127.0.0.1)
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Display mode for multi-symbol commands
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Rotation interval in seconds (rotating mode)
    #[arg(short, long)]
    pub interval: Option<f64>,

    /// Command applied at startup as if received over the wire
    #[arg(long, value_name = "COMMAND")]
    pub init: Option<String>,

    /// File with extra symbol ids, one per line
    #[arg(long, value_name = "FILE")]
    pub symbols: Option<PathBuf>,

    /// Directory searched for custom <name>.png images
    #[arg(long, value_name = "DIR")]
    pub icon_dir: Option<PathBuf>,

    /// Mirror every transition to this JSON file
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,
}

/// CLI-facing display mode names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Show only the first symbol of a list
    Single,
    /// Cycle through the list on a timer
    Rotating,
    /// Show the whole list at once
    SideBySide,
}

impl ModeArg {
    /// `interval_secs` only matters for rotating; the caller supplies the
    /// cadence resolved from its other configuration sources.
    pub fn to_display_mode(self, interval_secs: f64) -> DisplayMode {
        match self {
            ModeArg::Single => DisplayMode::Single,
            ModeArg::Rotating => DisplayMode::rotating(interval_secs),
            ModeArg::SideBySide => DisplayMode::SideBySide,
        }
    }

    /// The settings-file spelling, identical to the `value_enum` spelling.
    pub fn name(self) -> &'static str {
        match self {
            ModeArg::Single => "single",
            ModeArg::Rotating => "rotating",
            ModeArg::SideBySide => "side-by-side",
        }
    }
}
