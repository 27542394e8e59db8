//! Daemon lifecycle errors.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaemonError {
    #[error("Failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("Socket error: {0}")]
    Socket(#[from] io::Error),
}

impl DaemonError {
    /// Returns a helpful suggestion for resolving the error.
    pub fn suggestion(&self) -> String {
        match self {
            DaemonError::Bind { addr, .. } => {
                format!(
                    "Another process may already be listening on {}. Pick a different port with --port or GLYPHBAR_PORT.",
                    addr
                )
            }
            DaemonError::Socket(_) => {
                "The listen socket failed mid-run; restarting the daemon usually recovers it.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_mentions_the_address() {
        let err = DaemonError::Bind {
            addr: "127.0.0.1:1738".to_string(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().contains("127.0.0.1:1738"));
        assert!(err.suggestion().contains("GLYPHBAR_PORT"));
    }
}
