//! USER (§4.3): `USER <username> <mode> <unused> <realname>`.

use crate::reply::{self, Numeric};
use crate::state::{ClientId, RegistrationStep, ServerState};
use crate::wire::Message;

use super::{display_or_star, err_need_more_params};

pub fn handle(state: &ServerState, id: ClientId, msg: &Message) {
    let step = match state.client(id) {
        Some(c) => c.step,
        None => return,
    };

    match step {
        RegistrationStep::Connected => {
            let line = reply::numeric(&state.server_name, Numeric::ErrNotRegistered, "*", &[], None);
            state.send_to(id, &line);
            return;
        }
        RegistrationStep::HasPass => {
            let line = reply::numeric(&state.server_name, Numeric::ErrNotRegistered, "*", &[], None);
            state.send_to(id, &line);
            return;
        }
        RegistrationStep::Registered => {
            let nick = state.client(id).map(|c| display_or_star(&c.nick_display)).unwrap_or_else(|| "*".to_string());
            let line = reply::numeric(&state.server_name, Numeric::ErrAlreadyRegistred, &nick, &[], None);
            state.send_to(id, &line);
            return;
        }
        RegistrationStep::HasNick => {}
    }

    let username = match msg.params.first() {
        Some(u) => u.clone(),
        None => {
            err_need_more_params(state, id, "USER");
            return;
        }
    };

    let realname = msg
        .trailing
        .clone()
        .or_else(|| msg.params.get(3).cloned())
        .unwrap_or_else(|| username.clone());

    {
        let mut client = match state.client_mut(id) {
            Some(c) => c,
            None => return,
        };
        client.username = username;
        client.realname = realname;
        client.step = RegistrationStep::Registered;
    }

    send_welcome_burst(state, id);
}

fn send_welcome_burst(state: &ServerState, id: ClientId) {
    let Some(client) = state.client(id) else { return };
    let nick = client.nick_display.clone();
    let prefix = client.prefix();
    let server = state.server_name.clone();
    drop(client);

    let welcome = reply::numeric(
        &server,
        Numeric::Welcome,
        &nick,
        &[],
        Some(&format!("{} {}", Numeric::Welcome.text(), prefix)),
    );
    let your_host = reply::numeric(&server, Numeric::YourHost, &nick, &[], Some(&format!("Your host is {server}")));
    let created = reply::numeric(&server, Numeric::Created, &nick, &[], Some(Numeric::Created.text()));
    let myinfo = reply::numeric(&server, Numeric::MyInfo, &nick, &[&server, "1.0", "o", "itkl"], None);

    state.send_to(id, &welcome);
    state.send_to(id, &your_host);
    state.send_to(id, &created);
    state.send_to(id, &myinfo);
}
