//! PING (§4.4). PONG carries no handler; dispatch ignores it.

use crate::reply;
use crate::state::{ClientId, ServerState};
use crate::wire::Message;

pub fn handle_ping(state: &ServerState, id: ClientId, msg: &Message) {
    let token = msg.all_params().first().copied().unwrap_or(&state.server_name);
    let line = reply::command(&state.server_name, "PONG", &[&state.server_name], Some(token));
    state.send_to(id, &line);
}
