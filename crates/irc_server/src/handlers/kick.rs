//! KICK (§4.4).

use crate::reply::{self, Numeric};
use crate::state::{ClientId, ServerState};
use crate::util::fold;
use crate::wire::Message;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let (Some(channel), Some(target_nick)) = (msg.params.first().cloned(), msg.params.get(1).cloned()) else {
        super::err_need_more_params(state, id, "KICK");
        return;
    };
    let reason = msg.trailing.clone();
    let nick = state.client(id).map(|c| c.nick_display.clone()).unwrap_or_default();

    if !state.channel_exists(&channel) {
        let line = reply::numeric(&state.server_name, Numeric::ErrNoSuchChannel, &nick, &[&channel], None);
        state.send_to(id, &line);
        return;
    }
    if !state.channel(&channel).map(|c| c.is_member(id)).unwrap_or(false) {
        let line = reply::numeric(&state.server_name, Numeric::ErrNotOnChannel, &nick, &[&channel], None);
        state.send_to(id, &line);
        return;
    }
    if !state.channel(&channel).map(|c| c.is_operator(id)).unwrap_or(false) {
        let line = reply::numeric(&state.server_name, Numeric::ErrChanOPrivsNeeded, &nick, &[&channel], None);
        state.send_to(id, &line);
        return;
    }
    let Some(target_id) = state.find_by_nick(&target_nick) else {
        let line = reply::numeric(&state.server_name, Numeric::ErrNoSuchNick, &nick, &[&target_nick], None);
        state.send_to(id, &line);
        return;
    };
    if !state.channel(&channel).map(|c| c.is_member(target_id)).unwrap_or(false) {
        let line = reply::numeric(&state.server_name, Numeric::ErrUserNotInChannel, &nick, &[&target_nick, &channel], None);
        state.send_to(id, &line);
        return;
    }

    let target_display = state.client(target_id).map(|c| c.nick_display.clone()).unwrap_or(target_nick.clone());
    let prefix = state.client(id).map(|c| c.prefix()).unwrap_or_default();
    let reason = reason.unwrap_or_else(|| nick.clone());
    let line = reply::command(&prefix, "KICK", &[&channel, &target_display], Some(&reason));
    state.broadcast_to_channel(&channel, &line, None);

    let empty = state.channel_mut(&channel).map(|mut c| c.remove_member(target_id)).unwrap_or(false);
    if let Some(mut client) = state.client_mut(target_id) {
        client.channels.remove(&fold(&channel));
    }
    if empty {
        state.remove_channel_if_empty(&channel);
    }
}
