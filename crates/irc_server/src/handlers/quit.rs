//! QUIT and the shared disconnect path (§4.4, §4.5 "Disconnect is a
//! single function").

use crate::reply;
use crate::state::{ClientId, ServerState};
use crate::wire::Message;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let reason = msg.all_params().first().map(|s| s.to_string());
    disconnect(state, id, reason.as_deref());
}

/// Broadcasts QUIT to every member of every channel the client is in —
/// each member sees it at most once — then purges the client from all
/// server indices. Used both for an explicit QUIT command and for
/// connection errors detected by the net layer (§7.2).
pub fn disconnect(state: &ServerState, id: ClientId, reason: Option<&str>) {
    let Some(client) = state.client(id) else { return };
    let prefix = client.prefix();
    drop(client);

    let reason = reason.unwrap_or("Leaving");
    let line = reply::command(&prefix, "QUIT", &[], Some(reason));

    let mut already_notified = std::collections::HashSet::new();
    let channels: Vec<String> = state.client(id).map(|c| c.channels.iter().cloned().collect()).unwrap_or_default();
    for chan in &channels {
        let Some(ch) = state.channel(chan) else { continue };
        for member in &ch.members {
            if *member != id && already_notified.insert(*member) {
                state.send_to(*member, &line);
            }
        }
    }

    state.purge_client(id);
}
