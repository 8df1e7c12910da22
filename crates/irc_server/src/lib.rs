//! A single-process, single-threaded-semantics IRC server compatible
//! with a subset of RFC 2812 (§1).

pub mod config;
pub mod error;
pub mod handlers;
pub mod net;
pub mod reply;
pub mod state;
pub mod util;
pub mod wire;
