//! INVITE (§4.4).

use crate::reply::{self, Numeric};
use crate::state::{ClientId, ServerState};
use crate::util::fold;
use crate::wire::Message;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let (Some(target_nick), Some(channel)) = (msg.params.first().cloned(), msg.params.get(1).cloned()) else {
        super::err_need_more_params(state, id, "INVITE");
        return;
    };
    let nick = state.client(id).map(|c| c.nick_display.clone()).unwrap_or_default();

    let Some(target_id) = state.find_by_nick(&target_nick) else {
        let line = reply::numeric(&state.server_name, Numeric::ErrNoSuchNick, &nick, &[&target_nick], None);
        state.send_to(id, &line);
        return;
    };
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
    if state.channel(&channel).map(|c| c.is_member(target_id)).unwrap_or(false) {
        let line = reply::numeric(&state.server_name, Numeric::ErrUserOnChannel, &nick, &[&target_nick, &channel], None);
        state.send_to(id, &line);
        return;
    }
    let Some((invite_only, is_op)) = state.channel(&channel).map(|c| (c.modes.invite_only, c.is_operator(id))) else {
        return;
    };
    if invite_only && !is_op {
        let line = reply::numeric(&state.server_name, Numeric::ErrChanOPrivsNeeded, &nick, &[&channel], None);
        state.send_to(id, &line);
        return;
    }

    let target_display = state.client(target_id).map(|c| c.nick_display.clone()).unwrap_or(target_nick.clone());
    let display_channel = state.channel(&channel).map(|c| c.name_display.clone()).unwrap_or(channel.clone());
    let Some(mut ch) = state.channel_mut(&channel) else { return };
    ch.invited.insert(fold(&target_nick));
    drop(ch);

    let line = reply::numeric(&state.server_name, Numeric::Inviting, &nick, &[&channel, &target_display], None);
    state.send_to(id, &line);

    let prefix = state.client(id).map(|c| c.prefix()).unwrap_or_default();
    let invite_line = reply::command(&prefix, "INVITE", &[&target_display], Some(&display_channel));
    state.send_to(target_id, &invite_line);
}
