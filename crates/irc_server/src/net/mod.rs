//! Socket I/O and readiness multiplexing (§4.5). A per-connection task
//! plays the role of the source's `poll()` entry for one handle; a
//! single core task plays the role of the dispatch-to-handler step and
//! is the only place `ServerState` is mutated, which gives us the
//! "handler code never yields mid-handler" guarantee (§5) without a
//! manual readiness loop.

pub mod connection;
pub mod core_loop;

use crate::state::ClientId;

/// What a connection task reports to the core task. Accept is handled
/// inline in the core loop (it owns the listener), not as an event.
#[derive(Debug)]
pub enum Event {
    Inbound(ClientId, Vec<u8>),
    Disconnected(ClientId),
}
