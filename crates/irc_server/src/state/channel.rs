//! Channel membership, operators, invites and modes (§3 "Channel").

use std::collections::HashSet;

use super::client::ClientId;

#[derive(Debug, Default, Clone)]
pub struct ChannelModes {
    pub invite_only: bool, // +i
    pub topic_protected: bool, // +t
    pub key: Option<String>, // +k, active iff Some
    pub limit: Option<u32>, // +l, active iff Some(>0)
}

impl ChannelModes {
    /// The `+itkl ...` string §4.4 MODE with no arguments replies with.
    pub fn as_mode_string(&self) -> String {
        let mut flags = String::from("+");
        let mut args = Vec::new();
        if self.invite_only {
            flags.push('i');
        }
        if self.topic_protected {
            flags.push('t');
        }
        if let Some(k) = &self.key {
            flags.push('k');
            args.push(k.clone());
        }
        if let Some(l) = self.limit {
            flags.push('l');
            args.push(l.to_string());
        }
        if args.is_empty() {
            flags
        } else {
            format!("{flags} {}", args.join(" "))
        }
    }
}

#[derive(Debug)]
pub struct Channel {
    pub name_lower: String,
    pub name_display: String,
    pub topic: Option<String>,
    pub topic_setter: Option<String>,
    pub topic_set_at: Option<u64>,
    pub members: Vec<ClientId>,
    pub operators: Vec<ClientId>,
    pub invited: HashSet<String>,
    pub modes: ChannelModes,
}

impl Channel {
    pub fn new(name_display: &str) -> Self {
        Channel {
            name_lower: crate::util::fold(name_display),
            name_display: name_display.to_string(),
            topic: None,
            topic_setter: None,
            topic_set_at: None,
            members: Vec::new(),
            operators: Vec::new(),
            invited: HashSet::new(),
            modes: ChannelModes::default(),
        }
    }

    pub fn is_member(&self, id: ClientId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_operator(&self, id: ClientId) -> bool {
        self.operators.contains(&id)
    }

    pub fn add_member(&mut self, id: ClientId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Removes `id` from members and operators; returns whether the
    /// channel is now empty (caller deletes it, §3 invariant).
    pub fn remove_member(&mut self, id: ClientId) -> bool {
        self.members.retain(|m| *m != id);
        self.operators.retain(|m| *m != id);
        self.members.is_empty()
    }

    pub fn add_operator(&mut self, id: ClientId) {
        if !self.operators.contains(&id) {
            self.operators.push(id);
        }
    }

    pub fn remove_operator(&mut self, id: ClientId) {
        self.operators.retain(|m| *m != id);
    }

    pub fn is_invited(&self, nick_lower: &str) -> bool {
        self.invited.contains(nick_lower)
    }
}
