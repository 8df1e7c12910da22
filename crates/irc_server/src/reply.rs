//! Formats numeric and command replies with server prefix and CRLF
//! (§4.2). Every public function here returns a line with its
//! terminating CRLF already attached; nothing downstream re-adds it.

/// Every numeric reply this server emits (§4.2). Only the codes are
/// load-bearing for tests; the trailing text is canonical RFC 2812
/// phrasing but not contractual (§4.2, "tests may assert codes, not
/// English texts").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    Welcome = 1,
    YourHost = 2,
    Created = 3,
    MyInfo = 4,
    ChannelModeIs = 324,
    NoTopic = 331,
    Topic = 332,
    Inviting = 341,
    NamReply = 353,
    EndOfNames = 366,
    ErrNoSuchNick = 401,
    ErrNoSuchChannel = 403,
    ErrCannotSendToChan = 404,
    ErrNoTextToSend = 412,
    ErrUnknownCommand = 421,
    ErrNoNicknameGiven = 431,
    ErrErroneusNickname = 432,
    ErrNicknameInUse = 433,
    ErrNickCollision = 436,
    ErrUserNotInChannel = 441,
    ErrNotOnChannel = 442,
    ErrUserOnChannel = 443,
    ErrNotRegistered = 451,
    ErrNeedMoreParams = 461,
    ErrAlreadyRegistred = 462,
    ErrPasswdMismatch = 464,
    ErrChannelIsFull = 471,
    ErrUnknownMode = 472,
    ErrInviteOnlyChan = 473,
    ErrBadChannelKey = 475,
    ErrBadChanMask = 476,
    ErrChanOPrivsNeeded = 482,
}

impl Numeric {
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Canonical RFC 2812 text for the reply, used when no more specific
    /// trailing text is supplied by the caller.
    pub fn text(self) -> &'static str {
        use Numeric::*;
        match self {
            Welcome => "Welcome to the IRC Network",
            YourHost => "Your host",
            Created => "This server was created",
            MyInfo => "",
            ChannelModeIs => "",
            NoTopic => "No topic is set",
            Topic => "",
            Inviting => "",
            NamReply => "",
            EndOfNames => "End of /NAMES list",
            ErrNoSuchNick => "No such nick/channel",
            ErrNoSuchChannel => "No such channel",
            ErrCannotSendToChan => "Cannot send to channel",
            ErrNoTextToSend => "No text to send",
            ErrUnknownCommand => "Unknown command",
            ErrNoNicknameGiven => "No nickname given",
            ErrErroneusNickname => "Erroneous nickname",
            ErrNicknameInUse => "Nickname is already in use",
            ErrNickCollision => "Nickname collision",
            ErrUserNotInChannel => "They aren't on that channel",
            ErrNotOnChannel => "You're not on that channel",
            ErrUserOnChannel => "is already on channel",
            ErrNotRegistered => "You have not registered",
            ErrNeedMoreParams => "Not enough parameters",
            ErrAlreadyRegistred => "Unauthorized command (already registered)",
            ErrPasswdMismatch => "Password incorrect",
            ErrChannelIsFull => "Cannot join channel (+l)",
            ErrUnknownMode => "is unknown mode char to me",
            ErrInviteOnlyChan => "Cannot join channel (+i)",
            ErrBadChannelKey => "Cannot join channel (+k)",
            ErrBadChanMask => "Bad Channel Mask",
            ErrChanOPrivsNeeded => "You're not channel operator",
        }
    }
}

/// `:<server-name> <3-digit-code> <target> [<params>] [:<trailing>]\r\n`
pub fn numeric(server: &str, code: Numeric, target: &str, params: &[&str], trailing: Option<&str>) -> String {
    let trailing = trailing.or_else(|| {
        let text = code.text();
        (!text.is_empty()).then_some(text)
    });
    build(Some(server), &format!("{:03}", code.code()), target, params, trailing)
}

/// `:<prefix> <command> [<params>] [:<trailing>]\r\n`
pub fn command(prefix: &str, cmd: &str, params: &[&str], trailing: Option<&str>) -> String {
    build_no_target(Some(prefix), cmd, params, trailing)
}

/// `<command> [<params>] [:<trailing>]\r\n`
pub fn bare(cmd: &str, params: &[&str], trailing: Option<&str>) -> String {
    build_no_target(None, cmd, params, trailing)
}

/// `nick!user@host`
pub fn client_prefix(nick: &str, user: &str, host: &str) -> String {
    format!("{nick}!{user}@{host}")
}

fn build(prefix: Option<&str>, token: &str, target: &str, params: &[&str], trailing: Option<&str>) -> String {
    let mut line = String::new();
    if let Some(p) = prefix {
        line.push(':');
        line.push_str(p);
        line.push(' ');
    }
    line.push_str(token);
    line.push(' ');
    line.push_str(target);
    for p in params {
        line.push(' ');
        line.push_str(p);
    }
    if let Some(t) = trailing {
        line.push_str(" :");
        line.push_str(t);
    }
    line.push_str("\r\n");
    line
}

fn build_no_target(prefix: Option<&str>, token: &str, params: &[&str], trailing: Option<&str>) -> String {
    let mut line = String::new();
    if let Some(p) = prefix {
        line.push(':');
        line.push_str(p);
        line.push(' ');
    }
    line.push_str(token);
    for p in params {
        line.push(' ');
        line.push_str(p);
    }
    if let Some(t) = trailing {
        line.push_str(" :");
        line.push_str(t);
    }
    line.push_str("\r\n");
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_reply_shape() {
        let line = numeric("ft_irc", Numeric::ErrNicknameInUse, "*", &["alice"], None);
        assert_eq!(line, ":ft_irc 433 * alice :Nickname is already in use\r\n");
    }

    #[test]
    fn command_relay_shape() {
        let line = command("alice!alice@host", "JOIN", &[], Some("#room"));
        assert_eq!(line, ":alice!alice@host JOIN :#room\r\n");
    }

    #[test]
    fn bare_command_shape() {
        let line = bare("PONG", &["ft_irc"], Some("token"));
        assert_eq!(line, "PONG ft_irc :token\r\n");
    }

    #[test]
    fn numeric_with_no_text_and_no_trailing_omits_trailing() {
        let line = numeric("ft_irc", Numeric::ChannelModeIs, "alice", &["#room", "+i"], None);
        assert_eq!(line, ":ft_irc 324 alice #room +i\r\n");
        let line = numeric("ft_irc", Numeric::Inviting, "alice", &["#room", "carol"], None);
        assert_eq!(line, ":ft_irc 341 alice #room carol\r\n");
    }

    #[test]
    fn every_line_ends_with_crlf() {
        let lines = [
            numeric("ft_irc", Numeric::Welcome, "alice", &[], None),
            command("a!b@c", "PART", &["#x"], None),
            bare("PING", &[], Some("x")),
        ];
        for l in lines {
            assert!(l.ends_with("\r\n"));
        }
    }
}
