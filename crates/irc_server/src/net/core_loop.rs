//! The single task that owns [`ServerState`] (§4.5, §5 "every mutable
//! record is reachable only through the server state and mutated only
//! from the loop thread"). It multiplexes the listening socket, every
//! connection's inbound-event channel, and the shutdown signals onto
//! one `select!`, which is this server's readiness loop.

use log::{error, info};
use tokio::net::TcpListener;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;

use crate::handlers;
use crate::state::{Client, ClientId, ServerState};
use crate::wire::parse_message;

use super::{Event, connection};

/// Capacity of the inbound-event channel: the cooperative-scheduling
/// analogue of "the poll loop hasn't gotten around to this socket yet"
/// (§B.1) — a connection's reader task simply awaits a free slot
/// instead of busy-spinning.
const EVENT_CHANNEL_CAPACITY: usize = 256;

pub async fn run(listener: TcpListener, state: ServerState) {
    let (events_tx, mut events_rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAPACITY);
    let mut next_id: ClientId = 1;

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(err) => {
            error!("failed to install SIGTERM handler: {err}");
            return;
        }
    };

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("received SIGINT, shutting down");
                break;
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, addr)) => {
                        let id = next_id;
                        next_id += 1;
                        accept_connection(&state, id, socket, addr, &events_tx);
                    }
                    Err(err) => error!("accept failed: {err}"),
                }
            }
            event = events_rx.recv() => {
                match event {
                    Some(Event::Inbound(id, raw)) => handle_inbound(&state, id, &raw),
                    Some(Event::Disconnected(id)) => handlers::quit::disconnect(&state, id, None),
                    None => unreachable!("core loop holds its own events_tx clone"),
                }
            }
        }
    }

    shutdown(&state);
}

fn accept_connection(
    state: &ServerState,
    id: ClientId,
    socket: tokio::net::TcpStream,
    addr: std::net::SocketAddr,
    events_tx: &mpsc::Sender<Event>,
) {
    // Hostname resolution is left as "unknown" (§9 Open Question (d));
    // the seed scenarios assert against that literal.
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let client = Client::new(id, outbound_tx);
    state.insert_client(client);

    info!("accepted connection {id} from {addr}");
    tokio::spawn(connection::run(id, socket, events_tx.clone(), outbound_rx));
}

/// Ignores a line that doesn't decode as UTF-8 or doesn't parse —
/// parser failure is protocol tier and discarded silently (§7).
fn handle_inbound(state: &ServerState, id: ClientId, raw: &[u8]) {
    let Ok(line) = std::str::from_utf8(raw) else { return };
    if let Ok(msg) = parse_message(line) {
        handlers::dispatch(state, id, &msg);
    }
}

/// Closes every client cleanly (§4.5 "closes all clients cleanly, and
/// returns"): broadcasts QUIT to whatever channels each was in, then
/// purges it, which drops its outbound sender and ends its connection
/// task.
fn shutdown(state: &ServerState) {
    for id in state.client_ids() {
        handlers::quit::disconnect(state, id, Some("Server shutting down"));
    }
}
