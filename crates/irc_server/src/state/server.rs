//! Server-wide indices (§3 "Server state"). Exclusively mutated by the
//! single core task (`net::core_loop`); `DashMap` is used for the
//! sharded-entry API it gives `get_mut`/`entry`, not for cross-task
//! concurrency — nothing outside that one task ever touches these maps.

use dashmap::DashMap;
use dashmap::mapref::one::{Ref, RefMut};

use super::channel::Channel;
use super::client::{Client, ClientId};
use crate::util::fold;

pub struct ServerState {
    pub server_name: String,
    pub password: String,
    /// lowercase nickname -> client id. Contains exactly every client
    /// whose registration step is >= HasNick (§3 invariant).
    nicknames: DashMap<String, ClientId>,
    /// lowercase channel name -> channel.
    channels: DashMap<String, Channel>,
    /// connection handle -> client.
    clients: DashMap<ClientId, Client>,
}

impl ServerState {
    pub fn new(server_name: String, password: String) -> Self {
        ServerState {
            server_name,
            password,
            nicknames: DashMap::new(),
            channels: DashMap::new(),
            clients: DashMap::new(),
        }
    }

    // -- clients -----------------------------------------------------

    pub fn insert_client(&self, client: Client) {
        self.clients.insert(client.id, client);
    }

    pub fn client(&self, id: ClientId) -> Option<Ref<'_, ClientId, Client>> {
        self.clients.get(&id)
    }

    pub fn client_mut(&self, id: ClientId) -> Option<RefMut<'_, ClientId, Client>> {
        self.clients.get_mut(&id)
    }

    /// Snapshot of every connected client handle, used by shutdown to
    /// disconnect everyone cleanly (§4.5).
    pub fn client_ids(&self) -> Vec<ClientId> {
        self.clients.iter().map(|e| *e.key()).collect()
    }

    pub fn find_by_nick(&self, nick: &str) -> Option<ClientId> {
        self.nicknames.get(&fold(nick)).map(|e| *e)
    }

    /// Reserves `nick` (folded) for `id` in the nickname index, freeing
    /// any previous nickname `id` held. Caller must have already checked
    /// validity/uniqueness.
    pub fn bind_nick(&self, id: ClientId, old_lower: &str, new_display: &str) {
        if !old_lower.is_empty() {
            self.nicknames.remove(old_lower);
        }
        self.nicknames.insert(fold(new_display), id);
    }

    pub fn nick_in_use(&self, nick: &str) -> bool {
        self.nicknames.contains_key(&fold(nick))
    }

    /// Removes every trace of `id`: channel memberships (deleting
    /// emptied channels), the nickname index, and the connection index
    /// (§4.5 "Disconnect is a single function"). Returns the set of
    /// channel names the client was a member of, so the caller can
    /// broadcast departure before the memberships disappear.
    pub fn purge_client(&self, id: ClientId) -> Vec<String> {
        let channel_names: Vec<String> = self
            .client(id)
            .map(|c| c.channels.iter().cloned().collect())
            .unwrap_or_default();

        for name in &channel_names {
            let empty = self
                .channels
                .get_mut(name)
                .map(|mut ch| ch.remove_member(id))
                .unwrap_or(false);
            if empty {
                self.channels.remove(name);
            }
        }

        if let Some(c) = self.client(id) {
            if !c.nick_lower.is_empty() {
                self.nicknames.remove(&c.nick_lower);
            }
        }
        self.clients.remove(&id);
        channel_names
    }

    // -- channels ------------------------------------------------------

    pub fn channel(&self, name: &str) -> Option<Ref<'_, String, Channel>> {
        self.channels.get(&fold(name))
    }

    pub fn channel_mut(&self, name: &str) -> Option<RefMut<'_, String, Channel>> {
        self.channels.get_mut(&fold(name))
    }

    pub fn channel_exists(&self, name: &str) -> bool {
        self.channels.contains_key(&fold(name))
    }

    /// Finds or creates the named channel, returning whether it was
    /// freshly created (caller makes the creator its sole operator,
    /// §3 invariant).
    pub fn get_or_create_channel(&self, name: &str) -> bool {
        let lower = fold(name);
        if self.channels.contains_key(&lower) {
            false
        } else {
            self.channels.insert(lower, Channel::new(name));
            true
        }
    }

    pub fn remove_channel_if_empty(&self, name: &str) {
        let lower = fold(name);
        let empty = self.channels.get(&lower).map(|c| c.members.is_empty()).unwrap_or(false);
        if empty {
            self.channels.remove(&lower);
        }
    }

    // -- broadcast -----------------------------------------------------

    /// The single "send bytes to fd" primitive (§2 "Channels never write
    /// directly; all writing funnels through a single ... primitive").
    pub fn send_to(&self, id: ClientId, line: &str) {
        if let Some(c) = self.client(id) {
            c.send(line.to_string());
        }
    }

    pub fn broadcast_to_channel(&self, channel_name: &str, line: &str, exclude: Option<ClientId>) {
        let Some(ch) = self.channel(channel_name) else { return };
        for member in &ch.members {
            if Some(*member) != exclude {
                self.send_to(*member, line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    fn new_client(state: &ServerState, id: ClientId) {
        let (tx, _rx) = unbounded_channel();
        state.insert_client(Client::new(id, tx));
    }

    #[test]
    fn nickname_index_round_trips() {
        let state = ServerState::new("ft_irc".into(), "pw".into());
        new_client(&state, 1);
        state.bind_nick(1, "", "alice");
        assert_eq!(state.find_by_nick("ALICE"), Some(1));
        assert!(state.nick_in_use("alice"));
    }

    #[test]
    fn purge_client_empties_channel() {
        let state = ServerState::new("ft_irc".into(), "pw".into());
        new_client(&state, 1);
        state.get_or_create_channel("#room");
        state.channel_mut("#room").unwrap().add_member(1);
        state.client_mut(1).unwrap().channels.insert("#room".into());
        let left = state.purge_client(1);
        assert_eq!(left, vec!["#room".to_string()]);
        assert!(!state.channel_exists("#room"));
        assert!(state.client(1).is_none());
    }
}
