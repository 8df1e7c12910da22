//! MODE (§4.4). Only channel modes are handled; user modes are not part
//! of this subset. Exactly one mode letter per command is supported.

use crate::reply::{self, Numeric};
use crate::state::{ClientId, ServerState};
use crate::wire::Message;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let Some(channel) = msg.params.first().cloned() else {
        super::err_need_more_params(state, id, "MODE");
        return;
    };
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

    let Some(modestring) = msg.params.get(1).cloned() else {
        let mode_string = state.channel(&channel).map(|c| c.modes.as_mode_string()).unwrap_or_default();
        let line = reply::numeric(&state.server_name, Numeric::ChannelModeIs, &nick, &[&channel, &mode_string], None);
        state.send_to(id, &line);
        return;
    };

    let mut chars = modestring.chars();
    let (sign, letter) = match (chars.next(), chars.next()) {
        (Some('+'), Some(l)) => (true, l),
        (Some('-'), Some(l)) => (false, l),
        _ => {
            let line = reply::numeric(&state.server_name, Numeric::ErrUnknownMode, &nick, &[&modestring], None);
            state.send_to(id, &line);
            return;
        }
    };

    if !state.channel(&channel).map(|c| c.is_operator(id)).unwrap_or(false) {
        let line = reply::numeric(&state.server_name, Numeric::ErrChanOPrivsNeeded, &nick, &[&channel], None);
        state.send_to(id, &line);
        return;
    }

    let arg = msg.params.get(2).cloned();
    let applied_arg = match letter {
        'i' => {
            let Some(mut ch) = state.channel_mut(&channel) else { return };
            ch.modes.invite_only = sign;
            None
        }
        't' => {
            let Some(mut ch) = state.channel_mut(&channel) else { return };
            ch.modes.topic_protected = sign;
            None
        }
        'k' => {
            if sign {
                let Some(key) = arg else {
                    super::err_need_more_params(state, id, "MODE");
                    return;
                };
                let Some(mut ch) = state.channel_mut(&channel) else { return };
                ch.modes.key = Some(key.clone());
                Some(key)
            } else {
                let Some(mut ch) = state.channel_mut(&channel) else { return };
                ch.modes.key = None;
                None
            }
        }
        'l' => {
            if sign {
                let Some(n) = arg.and_then(|a| a.parse::<u32>().ok()).filter(|n| *n > 0) else {
                    super::err_need_more_params(state, id, "MODE");
                    return;
                };
                let Some(mut ch) = state.channel_mut(&channel) else { return };
                ch.modes.limit = Some(n);
                Some(n.to_string())
            } else {
                let Some(mut ch) = state.channel_mut(&channel) else { return };
                ch.modes.limit = None;
                None
            }
        }
        'o' => {
            let Some(target_nick) = arg else {
                super::err_need_more_params(state, id, "MODE");
                return;
            };
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
            let Some(mut ch) = state.channel_mut(&channel) else { return };
            if sign {
                ch.add_operator(target_id);
            } else {
                ch.remove_operator(target_id);
            }
            drop(ch);
            Some(target_nick)
        }
        _ => {
            let line = reply::numeric(&state.server_name, Numeric::ErrUnknownMode, &nick, &[&modestring], None);
            state.send_to(id, &line);
            return;
        }
    };

    let prefix = state.client(id).map(|c| c.prefix()).unwrap_or_default();
    let final_line = build_mode_line(&prefix, &channel, sign, letter, applied_arg.as_deref());
    state.broadcast_to_channel(&channel, &final_line, None);
}

fn build_mode_line(prefix: &str, channel: &str, sign: bool, letter: char, arg: Option<&str>) -> String {
    let sign_char = if sign { '+' } else { '-' };
    let modestring = format!("{sign_char}{letter}");
    match arg {
        Some(a) => reply::command(prefix, "MODE", &[channel, &modestring, a], None),
        None => reply::command(prefix, "MODE", &[channel, &modestring], None),
    }
}
