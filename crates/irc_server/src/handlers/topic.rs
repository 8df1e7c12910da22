//! TOPIC (§4.4).

use crate::reply::{self, Numeric};
use crate::state::{ClientId, ServerState};
use crate::util::now_unix;
use crate::wire::Message;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let Some(channel) = msg.params.first() else {
        super::err_need_more_params(state, id, "TOPIC");
        return;
    };
    let nick = state.client(id).map(|c| c.nick_display.clone()).unwrap_or_default();

    if !state.channel_exists(channel) {
        let line = reply::numeric(&state.server_name, Numeric::ErrNoSuchChannel, &nick, &[channel], None);
        state.send_to(id, &line);
        return;
    }
    if !state.channel(channel).map(|c| c.is_member(id)).unwrap_or(false) {
        let line = reply::numeric(&state.server_name, Numeric::ErrNotOnChannel, &nick, &[channel], None);
        state.send_to(id, &line);
        return;
    }

    let new_topic = msg.trailing.clone().or_else(|| msg.params.get(1).cloned());

    let Some(new_topic) = new_topic else {
        let Some((topic, display)) = state.channel(channel).map(|c| (c.topic.clone(), c.name_display.clone())) else {
            return;
        };
        let line = match topic {
            Some(t) => reply::numeric(&state.server_name, Numeric::Topic, &nick, &[&display], Some(&t)),
            None => reply::numeric(&state.server_name, Numeric::NoTopic, &nick, &[&display], None),
        };
        state.send_to(id, &line);
        return;
    };

    let Some((protected, is_op)) = state.channel(channel).map(|c| (c.modes.topic_protected, c.is_operator(id))) else {
        return;
    };
    if protected && !is_op {
        let line = reply::numeric(&state.server_name, Numeric::ErrChanOPrivsNeeded, &nick, &[channel], None);
        state.send_to(id, &line);
        return;
    }

    {
        let mut ch = match state.channel_mut(channel) {
            Some(c) => c,
            None => return,
        };
        ch.topic = Some(new_topic.clone());
        ch.topic_setter = Some(nick.clone());
        ch.topic_set_at = Some(now_unix());
    }

    let prefix = state.client(id).map(|c| c.prefix()).unwrap_or_default();
    let line = reply::command(&prefix, "TOPIC", &[channel], Some(&new_topic));
    state.broadcast_to_channel(channel, &line, None);
}
