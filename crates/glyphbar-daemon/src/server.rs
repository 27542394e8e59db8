//! The daemon runtime: UDP intake and the display-state loop.
//!
//! Datagrams land on a receive task and are marshaled over a bounded
//! channel to one owner loop, the only context that touches the parser
//! mode, the controller, and its rotation deadline. Messages apply strictly
//! in arrival order; `quit` stops the loop without draining what is still
//! queued behind it. SIGHUP re-reads the settings file and swaps the
//! display mode without a restart.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::time;
use tracing::debug;
use tracing::info;
use tracing::warn;

use glyphbar_core::clock::SystemClock;
use glyphbar_core::command::Command;
use glyphbar_core::command::CommandParser;
use glyphbar_core::controller::DisplayController;
use glyphbar_core::display::DisplayMode;
use glyphbar_core::display::ImageCatalog;
use glyphbar_core::observer::DisplayObserver;
use glyphbar_core::symbol::SymbolCatalog;

use crate::catalog::IconDir;
use crate::catalog::SymbolSet;
use crate::config::DaemonConfig;
use crate::error::DaemonError;
use crate::render::LogRenderer;
use crate::render::StateFileRenderer;
use crate::settings::settings_path;
use crate::settings::DisplaySettings;

const CHANNEL_CAPACITY: usize = 128;
/// Largest datagram the receive task accepts.
const MAX_DATAGRAM: usize = 65_536;

pub struct Server {
    socket: UdpSocket,
    config: DaemonConfig,
}

impl Server {
    /// Binds the listen socket. Port 0 asks the OS for a free port;
    /// [`local_addr`](Self::local_addr) reports what was assigned.
    pub async fn bind(config: DaemonConfig) -> Result<Self, DaemonError> {
        let addr = SocketAddr::new(config.bind, config.port);
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| DaemonError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self { socket, config })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DaemonError> {
        Ok(self.socket.local_addr()?)
    }

    /// Runs with the standard renderers until `quit`, a termination signal,
    /// or socket teardown.
    pub async fn run(self) -> Result<(), DaemonError> {
        let mut observers: Vec<Arc<dyn DisplayObserver>> = vec![Arc::new(LogRenderer::new())];
        if let Some(path) = &self.config.state_path {
            observers.push(Arc::new(StateFileRenderer::new(path.clone())));
        }
        self.run_with_observers(observers).await
    }

    /// Like [`run`](Self::run) with caller-chosen renderers.
    pub async fn run_with_observers(
        self,
        observers: Vec<Arc<dyn DisplayObserver>>,
    ) -> Result<(), DaemonError> {
        let Server { socket, config } = self;
        let local = socket.local_addr()?;
        info!(addr = %local, mode = config.mode.label(), "Listening for display commands");

        let symbols: Arc<dyn SymbolCatalog> = Arc::new(load_symbols(&config));
        let images: Arc<dyn ImageCatalog> = Arc::new(IconDir::new(config.icon_dir.clone()));
        let parser = CommandParser::new(symbols, images);
        let mut mode = config.mode;

        // Installed this early so a HUP during startup queues instead of
        // taking its default action and killing the process.
        let (reload_tx, mut reload_rx) = mpsc::channel::<()>(1);
        let reload_watcher = spawn_reload_watcher(reload_tx);

        let mut controller = DisplayController::new(Arc::new(SystemClock::new()));
        for observer in observers {
            controller.add_observer(observer);
        }
        // Renderers see the launch glyph before the first command.
        controller.publish();

        if let Some(init) = config.init_command.as_deref() {
            debug!(command = init, "Applying startup command");
            if apply_message(&parser, &mut controller, mode, init) {
                info!("Startup command requested quit");
                controller.shutdown();
                if let Some(task) = reload_watcher {
                    task.abort();
                }
                return Ok(());
            }
        }

        let (tx, mut rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
        let receiver = tokio::spawn(receive_datagrams(socket, tx));

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            // Snapshot the deadline before sleeping; a message that lands
            // first re-enters the loop and re-reads it, so a cancelled
            // rotation can never fire.
            let deadline = controller.next_deadline();
            let rotate = async {
                match deadline {
                    Some(at) => time::sleep_until(time::Instant::from_std(at)).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                received = rx.recv() => match received {
                    Some(message) => {
                        if apply_message(&parser, &mut controller, mode, &message) {
                            info!("Quit command received");
                            break;
                        }
                    }
                    None => {
                        warn!("Receive task stopped; shutting down");
                        break;
                    }
                },
                () = rotate => {
                    controller.tick();
                }
                Some(()) = reload_rx.recv() => {
                    let settings = DisplaySettings::load_or_default(&settings_path());
                    mode = DaemonConfig::from_env(&settings).mode;
                    info!(mode = mode.label(), "Reloaded display settings");
                    controller.set_mode(mode);
                }
                () = &mut shutdown => {
                    info!("Termination signal received");
                    break;
                }
            }
        }

        controller.shutdown();
        receiver.abort();
        if let Some(task) = reload_watcher {
            task.abort();
        }
        Ok(())
    }
}

/// Parses and applies one message. Returns true when it was `quit`.
fn apply_message(
    parser: &CommandParser,
    controller: &mut DisplayController,
    mode: DisplayMode,
    message: &str,
) -> bool {
    match parser.parse(message, mode) {
        Command::Quit => true,
        Command::Show(state) => {
            debug!(message, state = ?state, "Applying display state");
            controller.apply(state);
            false
        }
    }
}

async fn receive_datagrams(socket: UdpSocket, tx: mpsc::Sender<String>) {
    let mut buf = vec![0u8; MAX_DATAGRAM];
    loop {
        match socket.recv_from(&mut buf).await {
            Ok((len, peer)) => {
                let message = match std::str::from_utf8(&buf[..len]) {
                    Ok(text) => text.trim().to_string(),
                    Err(_) => {
                        warn!(%peer, len, "Dropping non-UTF-8 datagram");
                        continue;
                    }
                };
                debug!(%peer, message = %message, "Received command");
                if tx.send(message).await.is_err() {
                    // Owner loop is gone; nothing left to deliver to.
                    return;
                }
            }
            Err(err) => {
                warn!(error = %err, "UDP receive failed");
                return;
            }
        }
    }
}

fn load_symbols(config: &DaemonConfig) -> SymbolSet {
    match config.symbols_path.as_deref() {
        Some(path) => match SymbolSet::from_file(path) {
            Ok(set) => {
                debug!(path = %path.display(), symbols = set.len(), "Loaded symbol catalog");
                set
            }
            Err(err) => {
                warn!(
                    error = %err,
                    path = %path.display(),
                    "Failed to read symbol catalog; using the builtin set"
                );
                SymbolSet::builtin()
            }
        },
        None => SymbolSet::builtin(),
    }
}

/// Watches SIGHUP and nudges the owner loop to re-read the settings file.
#[cfg(unix)]
fn spawn_reload_watcher(tx: mpsc::Sender<()>) -> Option<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::signal;
    use tokio::signal::unix::SignalKind;

    match signal(SignalKind::hangup()) {
        Ok(mut stream) => Some(tokio::spawn(async move {
            while stream.recv().await.is_some() {
                if tx.send(()).await.is_err() {
                    // Owner loop is gone.
                    return;
                }
            }
        })),
        Err(err) => {
            warn!(error = %err, "Failed to install SIGHUP handler");
            None
        }
    }
}

#[cfg(not(unix))]
fn spawn_reload_watcher(tx: mpsc::Sender<()>) -> Option<tokio::task::JoinHandle<()>> {
    drop(tx);
    None
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::signal;
    use tokio::signal::unix::SignalKind;

    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
