//! Turns one already CRLF-delimited line into a [`Message`] (§4.1).
//!
//! The grammar here is the simplified subset the distilled spec
//! actually needs — not the full RFC 2812 ABNF (servername masks,
//! hostaddr, etc. Live in `util` and in the handlers that use them).

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while1},
    character::complete::space0,
    combinator::rest,
    sequence::preceded,
};

use crate::error::ProtocolError;

/// A parsed IRC wire message. `command` is always uppercase ASCII.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
    pub trailing: Option<String>,
    pub raw: String,
}

impl Message {
    /// All positional params plus the trailing one, in wire order —
    /// handlers that don't care about the middle/trailing distinction
    /// read this instead of `params`/`trailing` separately.
    pub fn all_params(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.params.iter().map(String::as_str).collect();
        if let Some(t) = &self.trailing {
            out.push(t.as_str());
        }
        out
    }
}

fn not_space(c: char) -> bool {
    c != ' '
}

/// Step 3: `:prefix ` — consumed whole, colon and trailing space dropped.
fn prefix_token(input: &str) -> IResult<&str, &str> {
    preceded(tag(":"), take_while1(not_space)).parse(input)
}

/// Step 4: the command token, up to the next space or end of input.
fn command_token(input: &str) -> IResult<&str, &str> {
    take_while1(not_space).parse(input)
}

/// Step 5: one middle parameter, up to the next space.
fn middle_param(input: &str) -> IResult<&str, &str> {
    take_while1(not_space).parse(input)
}

/// Parses one line. `line` may or may not carry its terminating CRLF or
/// bare LF — both are tolerated on input (§4.1); nothing is emitted with
/// a line terminator still attached to any parsed field.
pub fn parse_message(line: &str) -> Result<Message, ProtocolError> {
    let raw = line.to_string();
    let stripped = line.strip_suffix("\r\n").or_else(|| line.strip_suffix('\n')).unwrap_or(line);

    let (rest_input, _) = space0::<_, nom::error::Error<&str>>(stripped).unwrap_or((stripped, ""));
    if rest_input.is_empty() {
        return Err(ProtocolError::Empty);
    }

    let (rest_input, prefix) = match prefix_token(rest_input) {
        Ok((rem, p)) => {
            // there must be a space after the prefix token, else it's dangling
            if !rem.starts_with(' ') {
                return Err(ProtocolError::DanglingPrefix);
            }
            (rem.trim_start_matches(' '), Some(p.to_string()))
        }
        Err(_) if rest_input.starts_with(':') => return Err(ProtocolError::DanglingPrefix),
        Err(_) => (rest_input, None),
    };

    if rest_input.is_empty() {
        return Err(ProtocolError::MissingCommand);
    }

    let (rest_input, command) = command_token(rest_input).map_err(|_: nom::Err<nom::error::Error<&str>>| {
        ProtocolError::MissingCommand
    })?;
    let command = command.to_ascii_uppercase();

    let mut params = Vec::new();
    let mut trailing = None;
    let mut cursor = rest_input.trim_start_matches(' ');
    loop {
        if cursor.is_empty() {
            break;
        }
        if let Some(t) = cursor.strip_prefix(':') {
            let (_, tail): (&str, &str) = rest(t).unwrap_or(("", t));
            trailing = Some(tail.to_string());
            break;
        }
        match middle_param(cursor) {
            Ok((rem, p)) => {
                params.push(p.to_string());
                cursor = rem.trim_start_matches(' ');
            }
            Err(_) => break,
        }
    }

    Ok(Message { prefix, command, params, trailing, raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_command_no_params() {
        let m = parse_message("PING\r\n").unwrap();
        assert_eq!(m.command, "PING");
        assert!(m.params.is_empty());
        assert!(m.trailing.is_none());
    }

    #[test]
    fn command_is_uppercased() {
        let m = parse_message("nick alice\r\n").unwrap();
        assert_eq!(m.command, "NICK");
        assert_eq!(m.params, vec!["alice"]);
    }

    #[test]
    fn prefix_and_trailing() {
        let m = parse_message(":alice!al@host PRIVMSG #room :hi there\r\n").unwrap();
        assert_eq!(m.prefix.as_deref(), Some("alice!al@host"));
        assert_eq!(m.command, "PRIVMSG");
        assert_eq!(m.params, vec!["#room"]);
        assert_eq!(m.trailing.as_deref(), Some("hi there"));
    }

    #[test]
    fn bare_lf_accepted() {
        let m = parse_message("PING :tok\n").unwrap();
        assert_eq!(m.command, "PING");
        assert_eq!(m.trailing.as_deref(), Some("tok"));
    }

    #[test]
    fn fifteen_params_accepted() {
        let line = format!("CMD {}\r\n", (1..=15).map(|n| n.to_string()).collect::<Vec<_>>().join(" "));
        let m = parse_message(&line).unwrap();
        assert_eq!(m.params.len(), 15);
    }

    #[test]
    fn trailing_with_leading_colon_and_spaces() {
        let m = parse_message("USER alice 0 * :Alice Example\r\n").unwrap();
        assert_eq!(m.params, vec!["alice", "0", "*"]);
        assert_eq!(m.trailing.as_deref(), Some("Alice Example"));
    }

    #[test]
    fn empty_line_fails() {
        assert_eq!(parse_message("\r\n"), Err(ProtocolError::Empty));
        assert_eq!(parse_message("   \r\n"), Err(ProtocolError::Empty));
    }

    #[test]
    fn dangling_prefix_fails() {
        assert_eq!(parse_message(":onlyprefix\r\n"), Err(ProtocolError::DanglingPrefix));
    }

    #[test]
    fn canonicalisation_command_is_uppercase_ascii() {
        for line in ["join #a\r\n", "Join #a\r\n", "JOIN #a\r\n"] {
            let m = parse_message(line).unwrap();
            assert!(m.command.chars().all(|c| !c.is_ascii_lowercase()));
        }
    }
}
