//! Byte buffer + message parser (§4.1): the only place in the crate
//! that understands CRLF framing and the `[":" prefix SP] command
//! [params] [":" trailing]` grammar.

pub mod buffer;
pub mod parser;

pub use buffer::ByteBuffer;
pub use parser::{Message, parse_message};
