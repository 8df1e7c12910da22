//! NICK (§4.3).

use crate::reply::{self, Numeric};
use crate::state::{ClientId, RegistrationStep, ServerState};
use crate::util::{fold, is_valid_nickname};
use crate::wire::Message;

use super::display_or_star;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let step = match state.client(id) {
        Some(c) => c.step,
        None => return,
    };

    if step == RegistrationStep::Connected {
        reply_err(state, id, Numeric::ErrNotRegistered, &[]);
        return;
    }

    let Some(new_nick) = msg.all_params().first().map(|s| s.to_string()) else {
        reply_err(state, id, Numeric::ErrNoNicknameGiven, &[]);
        return;
    };

    if !is_valid_nickname(&new_nick) {
        reply_err(state, id, Numeric::ErrErroneusNickname, &[&new_nick]);
        return;
    }

    let folded = fold(&new_nick);
    let clashes = state.find_by_nick(&new_nick).map(|owner| owner != id).unwrap_or(false);
    if clashes {
        reply_err(state, id, Numeric::ErrNicknameInUse, &[&new_nick]);
        return;
    }

    let old_lower = state.client(id).map(|c| c.nick_lower.clone()).unwrap_or_default();
    let old_prefix = state.client(id).map(|c| c.prefix());

    state.bind_nick(id, &old_lower, &new_nick);
    {
        let mut client = match state.client_mut(id) {
            Some(c) => c,
            None => return,
        };
        client.nick_display = new_nick.clone();
        client.nick_lower = folded;
        if client.step == RegistrationStep::HasPass {
            client.step = RegistrationStep::HasNick;
        }
    }

    let was_registered = step == RegistrationStep::Registered;
    if was_registered {
        let prefix = old_prefix.unwrap_or_else(|| new_nick.clone());
        let line = reply::command(&prefix, "NICK", &[], Some(&new_nick));
        state.send_to(id, &line);
        let channels: Vec<String> = state.client(id).map(|c| c.channels.iter().cloned().collect()).unwrap_or_default();
        for chan in channels {
            state.broadcast_to_channel(&chan, &line, Some(id));
        }
    }
}

fn reply_err(state: &ServerState, id: ClientId, code: Numeric, params: &[&str]) {
    let nick = state.client(id).map(|c| display_or_star(&c.nick_display)).unwrap_or_else(|| "*".to_string());
    let line = reply::numeric(&state.server_name, code, &nick, params, None);
    state.send_to(id, &line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Client;
    use crate::wire::parse_message;
    use tokio::sync::mpsc::unbounded_channel;

    fn client_with(state: &ServerState, id: ClientId, step: RegistrationStep) -> tokio::sync::mpsc::UnboundedReceiver<Vec<u8>> {
        let (tx, rx) = unbounded_channel();
        let mut client = Client::new(id, tx);
        client.step = step;
        state.insert_client(client);
        rx
    }

    /// Unregistered connections get 451 for NICK even with no nickname
    /// argument at all — step takes precedence over parameter presence
    /// (§4.3 "0 Connected | NICK ... | reply 451").
    #[test]
    fn nick_before_pass_is_not_registered_regardless_of_args() {
        let state = ServerState::new("ft_irc".into(), "pw".into());
        let mut rx = client_with(&state, 1, RegistrationStep::Connected);

        handle(&state, 1, &parse_message("NICK\r\n").unwrap());

        let bytes = rx.try_recv().unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("451"));
    }

    #[test]
    fn missing_nick_after_pass_replies_431() {
        let state = ServerState::new("ft_irc".into(), "pw".into());
        let mut rx = client_with(&state, 1, RegistrationStep::HasPass);

        handle(&state, 1, &parse_message("NICK\r\n").unwrap());

        let bytes = rx.try_recv().unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("431"));
    }
}
