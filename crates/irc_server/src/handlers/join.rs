//! JOIN (§4.4).

use crate::reply::{self, Numeric};
use crate::state::{ClientId, ServerState};
use crate::util::{fold, is_valid_channel_name};
use crate::wire::Message;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let Some(channels_arg) = msg.params.first() else {
        super::err_need_more_params(state, id, "JOIN");
        return;
    };
    let keys_arg = msg.params.get(1).cloned().unwrap_or_default();

    let names: Vec<&str> = channels_arg.split(',').collect();
    let mut keys: Vec<&str> = keys_arg.split(',').collect();
    keys.retain(|k| !k.is_empty());

    for (i, name) in names.iter().enumerate() {
        let key = keys.get(i).copied();
        join_one(state, id, name, key);
    }
}

fn join_one(state: &ServerState, id: ClientId, name: &str, key: Option<&str>) {
    let nick = state.client(id).map(|c| c.nick_display.clone()).unwrap_or_default();

    if !is_valid_channel_name(name) {
        let line = reply::numeric(&state.server_name, Numeric::ErrBadChanMask, &nick, &[name], None);
        state.send_to(id, &line);
        return;
    }

    if state.channel(name).map(|c| c.is_member(id)).unwrap_or(false) {
        return;
    }

    let created = state.get_or_create_channel(name);

    if !created {
        let Some(ch) = state.channel(name) else { return };
        if let Some(channel_key) = &ch.modes.key {
            if key != Some(channel_key.as_str()) {
                drop(ch);
                let line = reply::numeric(&state.server_name, Numeric::ErrBadChannelKey, &nick, &[name], None);
                state.send_to(id, &line);
                return;
            }
        }
        if ch.modes.invite_only && !ch.is_invited(&fold(&nick)) {
            drop(ch);
            let line = reply::numeric(&state.server_name, Numeric::ErrInviteOnlyChan, &nick, &[name], None);
            state.send_to(id, &line);
            return;
        }
        if let Some(limit) = ch.modes.limit {
            if ch.members.len() as u32 >= limit {
                drop(ch);
                let line = reply::numeric(&state.server_name, Numeric::ErrChannelIsFull, &nick, &[name], None);
                state.send_to(id, &line);
                return;
            }
        }
    }

    {
        let mut ch = match state.channel_mut(name) {
            Some(c) => c,
            None => return,
        };
        ch.add_member(id);
        if created {
            ch.add_operator(id);
        }
        ch.invited.remove(&fold(&nick));
    }

    if let Some(mut client) = state.client_mut(id) {
        client.channels.insert(fold(name));
    }

    let (topic, display_name) = match state.channel(name) {
        Some(ch) => (ch.topic.clone(), ch.name_display.clone()),
        None => return,
    };

    let prefix = state.client(id).map(|c| c.prefix()).unwrap_or_default();
    let join_line = reply::command(&prefix, "JOIN", &[], Some(&display_name));
    state.broadcast_to_channel(name, &join_line, None);

    if let Some(topic) = topic {
        let line = reply::numeric(&state.server_name, Numeric::Topic, &nick, &[&display_name], Some(&topic));
        state.send_to(id, &line);
    } else {
        let line = reply::numeric(&state.server_name, Numeric::NoTopic, &nick, &[&display_name], None);
        state.send_to(id, &line);
    }

    send_names(state, id, &nick, name, &display_name);
}

fn send_names(state: &ServerState, id: ClientId, nick: &str, folded_name: &str, display_name: &str) {
    let Some(ch) = state.channel(folded_name) else { return };
    let mut entries = Vec::new();
    for member in &ch.members {
        let Some(c) = state.client(*member) else { continue };
        let marker = if ch.is_operator(*member) { "@" } else { "" };
        entries.push(format!("{marker}{}", c.nick_display));
    }
    drop(ch);
    let names_line = entries.join(" ");
    let line = reply::numeric(&state.server_name, Numeric::NamReply, nick, &["=", display_name], Some(&names_line));
    state.send_to(id, &line);
    let end_line = reply::numeric(&state.server_name, Numeric::EndOfNames, nick, &[display_name], None);
    state.send_to(id, &end_line);
}
