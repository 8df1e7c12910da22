//! Command-line surface (§6 "Command-line surface"). Two positional
//! arguments, no environment variables, no persisted state.

use clap::Parser;

use crate::error::FatalError;

const DEFAULT_SERVER_NAME: &str = "ft_irc";

/// `irc_server <port> <password> [--server-name NAME] [--verbose]`
#[derive(Debug, Parser)]
#[command(name = "irc_server", version, about = "A single-process IRC server")]
pub struct Cli {
    /// TCP port to listen on (1..=65535)
    pub port: u32,
    /// Shared password every connecting client must present via PASS
    pub password: String,
    /// Source prefix used on numeric replies (§6 "Server identity")
    #[arg(long, default_value = DEFAULT_SERVER_NAME)]
    pub server_name: String,
    /// Emit debug-level diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated, ready-to-bind configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub password: String,
    pub server_name: String,
    pub verbose: bool,
}

impl Config {
    pub fn try_from_cli(cli: Cli) -> Result<Self, FatalError> {
        let port = u16::try_from(cli.port).map_err(|_| FatalError::InvalidPort(cli.port))?;
        if port == 0 {
            return Err(FatalError::InvalidPort(cli.port));
        }
        if cli.password.is_empty() {
            return Err(FatalError::EmptyPassword);
        }
        Ok(Config { port, password: cli.password, server_name: cli.server_name, verbose: cli.verbose })
    }
}
