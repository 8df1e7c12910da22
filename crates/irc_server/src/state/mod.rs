//! Server, client and channel records (§3).

pub mod channel;
pub mod client;
pub mod server;

pub use channel::{Channel, ChannelModes};
pub use client::{Client, ClientId, RegistrationStep, MAX_PASSWORD_ATTEMPTS};
pub use server::ServerState;
