//! One task per accepted socket: reassembles messages via [`ByteBuffer`]
//! and reports them to the core task, and is the sole writer of its
//! socket's write half, draining the client's outbound channel (§4.5,
//! "the loop is the sole writer to sockets" — generalised to one writer
//! task per socket, since each socket only ever has one writer anyway).

use log::debug;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{Sender, UnboundedReceiver};

use crate::state::ClientId;
use crate::wire::ByteBuffer;

use super::Event;

/// Read chunk size; the spec requires accepting at least 512 bytes per
/// read (§4.5).
const CHUNK_SIZE: usize = 4096;

/// Runs until the peer disconnects, a fatal I/O error occurs, or the
/// client's `outbound` sender is dropped (the core task purged this
/// client from `ServerState`, e.g. after QUIT or a password-attempt
/// cutoff). Either path ends with both socket halves dropped, closing
/// the connection.
pub async fn run(
    id: ClientId,
    stream: TcpStream,
    events_tx: Sender<Event>,
    mut outbound_rx: UnboundedReceiver<Vec<u8>>,
) {
    let (mut read_half, mut write_half) = stream.into_split();
    let mut buffer = ByteBuffer::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        tokio::select! {
            outgoing = outbound_rx.recv() => {
                match outgoing {
                    Some(bytes) => {
                        if write_half.write_all(&bytes).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            read = read_half.read(&mut chunk) => {
                match read {
                    Ok(0) => {
                        let _ = events_tx.send(Event::Disconnected(id)).await;
                        break;
                    }
                    Ok(n) => {
                        buffer.append(&chunk[..n]);
                        for raw in buffer.extract() {
                            if events_tx.send(Event::Inbound(id, raw)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(err) => {
                        debug!("connection {id} read error: {err}");
                        let _ = events_tx.send(Event::Disconnected(id)).await;
                        break;
                    }
                }
            }
        }
    }
}
