//! PRIVMSG (§4.4).

use crate::reply::{self, Numeric};
use crate::state::{ClientId, ServerState};
use crate::wire::Message;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let Some(target) = msg.params.first() else {
        super::err_need_more_params(state, id, "PRIVMSG");
        return;
    };
    let nick = state.client(id).map(|c| c.nick_display.clone()).unwrap_or_default();

    let text = match msg.trailing.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => {
            let err = reply::numeric(&state.server_name, Numeric::ErrNoTextToSend, &nick, &[], None);
            state.send_to(id, &err);
            return;
        }
    };

    let prefix = state.client(id).map(|c| c.prefix()).unwrap_or_default();
    let line = reply::command(&prefix, "PRIVMSG", &[target], Some(text));

    if let Some(channel) = target.strip_prefix('#').map(|_| target.as_str()) {
        if !state.channel_exists(channel) {
            let err = reply::numeric(&state.server_name, Numeric::ErrNoSuchChannel, &nick, &[channel], None);
            state.send_to(id, &err);
            return;
        }
        if !state.channel(channel).map(|c| c.is_member(id)).unwrap_or(false) {
            let err = reply::numeric(&state.server_name, Numeric::ErrCannotSendToChan, &nick, &[channel], None);
            state.send_to(id, &err);
            return;
        }
        state.broadcast_to_channel(channel, &line, Some(id));
    } else {
        match state.find_by_nick(target) {
            Some(dest) => state.send_to(dest, &line),
            None => {
                let err = reply::numeric(&state.server_name, Numeric::ErrNoSuchNick, &nick, &[target], None);
                state.send_to(id, &err);
            }
        }
    }
}
