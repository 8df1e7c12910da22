//! PASS (§4.3).

use crate::reply::{self, Numeric};
use crate::state::{ClientId, RegistrationStep, ServerState};
use crate::wire::Message;

use super::err_need_more_params;

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let Some(given) = msg.all_params().first().map(|s| s.to_string()) else {
        err_need_more_params(state, id, "PASS");
        return;
    };

    let mut client = match state.client_mut(id) {
        Some(c) => c,
        None => return,
    };

    match client.step {
        RegistrationStep::Connected => {
            if given == state.password {
                client.step = RegistrationStep::HasPass;
            } else {
                client.pass_attempts += 1;
                let attempts = client.pass_attempts;
                let line = reply::numeric(&state.server_name, Numeric::ErrPasswdMismatch, "*", &[], None);
                client.send(line);
                if attempts >= crate::state::MAX_PASSWORD_ATTEMPTS {
                    drop(client);
                    state.purge_client(id);
                }
            }
        }
        _ => {
            let line = reply::numeric(&state.server_name, Numeric::ErrAlreadyRegistred, &super::display_or_star(&client.nick_display), &[], None);
            client.send(line);
        }
    }
}
