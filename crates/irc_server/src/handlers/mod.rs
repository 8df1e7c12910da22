//! Command handlers (§4.3, §4.4): each is a tight transactional
//! manipulation of client/channel state with well-defined numeric
//! replies. `dispatch` is the uppercase-command -> handler lookup table
//! (§2 "Command dispatch").

mod invite;
mod join;
mod kick;
mod mode;
mod nick;
mod part;
mod pass;
mod ping;
mod privmsg;
pub mod quit;
mod topic;
mod user;

use crate::state::{ClientId, RegistrationStep, ServerState};
use crate::wire::Message;

/// Runs `msg` against `state` on behalf of `id`. This is the single
/// entry point the connection/core loop calls per extracted message;
/// everything it does completes before the next message (from any
/// client) is looked at (§5 "handler code never yields mid-handler").
pub fn dispatch(state: &ServerState, id: ClientId, msg: &Message) {
    match msg.command.as_str() {
        "PASS" => pass::handle(state, id, msg),
        "NICK" => nick::handle(state, id, msg),
        "USER" => user::handle(state, id, msg),
        "PING" => ping::handle_ping(state, id, msg),
        "PONG" => {} // ignored by the core (§4.4)
        "QUIT" => quit::handle(state, id, msg),
        "JOIN" => with_registered(state, id, msg, join::handle),
        "PART" => with_registered(state, id, msg, part::handle),
        "PRIVMSG" => with_registered(state, id, msg, privmsg::handle),
        "TOPIC" => with_registered(state, id, msg, topic::handle),
        "MODE" => with_registered(state, id, msg, mode::handle),
        "INVITE" => with_registered(state, id, msg, invite::handle),
        "KICK" => with_registered(state, id, msg, kick::handle),
        _ => unknown_command(state, id, msg),
    }
}

/// Gate used by every channel/messaging command: step must be
/// `Registered`, otherwise 451 (§4.4 "All handlers begin by verifying
/// step==3").
fn with_registered(
    state: &ServerState,
    id: ClientId,
    msg: &Message,
    handler: fn(&ServerState, ClientId, &Message),
) {
    let registered = state.client(id).map(|c| c.step == RegistrationStep::Registered).unwrap_or(false);
    if registered {
        handler(state, id, msg);
    } else {
        err_not_registered(state, id);
    }
}

fn unknown_command(state: &ServerState, id: ClientId, msg: &Message) {
    let (nick, server_name) = match state.client(id) {
        Some(c) => (display_or_star(&c.nick_display), state.server_name.clone()),
        None => return,
    };
    let line = crate::reply::numeric(&server_name, crate::reply::Numeric::ErrUnknownCommand, &nick, &[&msg.command], None);
    state.send_to(id, &line);
}

fn display_or_star(nick: &str) -> String {
    if nick.is_empty() { "*".to_string() } else { nick.to_string() }
}

fn err_not_registered(state: &ServerState, id: ClientId) {
    let nick = state.client(id).map(|c| display_or_star(&c.nick_display)).unwrap_or_else(|| "*".to_string());
    let line = crate::reply::numeric(&state.server_name, crate::reply::Numeric::ErrNotRegistered, &nick, &[], None);
    state.send_to(id, &line);
}

fn err_need_more_params(state: &ServerState, id: ClientId, command: &str) {
    let nick = state.client(id).map(|c| display_or_star(&c.nick_display)).unwrap_or_else(|| "*".to_string());
    let line = crate::reply::numeric(&state.server_name, crate::reply::Numeric::ErrNeedMoreParams, &nick, &[command], None);
    state.send_to(id, &line);
}
