use thiserror::Error;

/// Errors produced while turning one already-extracted line into a
/// [`crate::wire::Message`]. Never escapes a connection: the caller
/// silently discards the line (§7, "Parser failure ... is protocol tier").
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty or whitespace-only message")]
    Empty,
    #[error("prefix missing trailing space")]
    DanglingPrefix,
    #[error("no command token present")]
    MissingCommand,
}

/// Startup-time failures (§7.3). These abort `main` with a diagnostic
/// and a non-zero exit; nothing downstream of a successful bind ever
/// produces one.
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("invalid listen port {0}: must be in 1..=65535")]
    InvalidPort(u32),
    #[error("shared password must not be empty")]
    EmptyPassword,
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
