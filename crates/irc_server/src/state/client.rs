//! Per-connection identity and registration state (§3 "Client").

use std::collections::BTreeSet;

use tokio::sync::mpsc::UnboundedSender;

/// Integer handle identifying an open socket, unique while the
/// connection lives (§3 "Connection identifier"). Reuse after close is
/// safe because disconnection purges every reference to a handle in one
/// step (`ServerState::disconnect`).
pub type ClientId = u64;

/// Registration step, monotonically non-decreasing for a given client
/// (§3 invariants, §8 "Registration monotonicity").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistrationStep {
    Connected = 0,
    HasPass = 1,
    HasNick = 2,
    Registered = 3,
}

pub const MAX_PASSWORD_ATTEMPTS: u8 = 3;

#[derive(Debug)]
pub struct Client {
    pub id: ClientId,
    /// Lowercase nickname, empty until NICK is accepted.
    pub nick_lower: String,
    /// Original-case nickname other clients see.
    pub nick_display: String,
    pub username: String,
    pub realname: String,
    pub hostname: String,
    pub step: RegistrationStep,
    pub pass_attempts: u8,
    /// Lowercase channel names this client is a member of.
    pub channels: BTreeSet<String>,
    /// The loop's sole write path for this connection (§4.5).
    pub outbound: UnboundedSender<Vec<u8>>,
}

impl Client {
    pub fn new(id: ClientId, outbound: UnboundedSender<Vec<u8>>) -> Self {
        Client {
            id,
            nick_lower: String::new(),
            nick_display: String::new(),
            username: String::new(),
            realname: String::new(),
            hostname: "unknown".to_string(),
            step: RegistrationStep::Connected,
            pass_attempts: 0,
            channels: BTreeSet::new(),
            outbound,
        }
    }

    pub fn prefix(&self) -> String {
        crate::reply::client_prefix(&self.nick_display, &self.username, &self.hostname)
    }

    /// Best-effort send; a client whose connection already died simply
    /// drops the bytes (§4.5, "pending outbound bytes ... are dropped").
    pub fn send(&self, line: String) {
        let _ = self.outbound.send(line.into_bytes());
    }
}
