use clap::Parser;
use flexi_logger::{Duplicate, Logger};
use log::error;
use tokio::net::TcpListener;

use irc_server::config::{Cli, Config};
use irc_server::error::FatalError;
use irc_server::net::core_loop;
use irc_server::state::ServerState;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), FatalError> {
    let cli = Cli::parse();
    let config = Config::try_from_cli(cli)?;

    let level = if config.verbose { "debug" } else { "info" };
    Logger::try_with_str(level)
        .and_then(|logger| logger.log_to_stderr().duplicate_to_stderr(Duplicate::All).start())
        .ok();

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await.map_err(|source| FatalError::Bind { addr: addr.clone(), source })?;
    log::info!("listening on {addr} as {}", config.server_name);

    let state = ServerState::new(config.server_name, config.password);
    core_loop::run(listener, state).await;
    Ok(())
}
