//! PART (§4.4).

use crate::reply::{self, Numeric};
use crate::state::{ClientId, ServerState};
use crate::util::fold;
use crate::wire::Message;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let Some(channels_arg) = msg.params.first() else {
        super::err_need_more_params(state, id, "PART");
        return;
    };
    let reason = msg.trailing.clone().unwrap_or_else(|| "Leaving".to_string());

    for name in channels_arg.split(',') {
        part_one(state, id, name, &reason);
    }
}

fn part_one(state: &ServerState, id: ClientId, name: &str, reason: &str) {
    let nick = state.client(id).map(|c| c.nick_display.clone()).unwrap_or_default();

    if !state.channel_exists(name) {
        let line = reply::numeric(&state.server_name, Numeric::ErrNoSuchChannel, &nick, &[name], None);
        state.send_to(id, &line);
        return;
    }
    if !state.channel(name).map(|c| c.is_member(id)).unwrap_or(false) {
        let line = reply::numeric(&state.server_name, Numeric::ErrNotOnChannel, &nick, &[name], None);
        state.send_to(id, &line);
        return;
    }

    let prefix = state.client(id).map(|c| c.prefix()).unwrap_or_default();
    let line = reply::command(&prefix, "PART", &[name], Some(reason));
    state.broadcast_to_channel(name, &line, None);

    let empty = state.channel_mut(name).map(|mut c| c.remove_member(id)).unwrap_or(false);
    if let Some(mut client) = state.client_mut(id) {
        client.channels.remove(&fold(name));
    }
    if empty {
        state.remove_channel_if_empty(name);
    }
}
