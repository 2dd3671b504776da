//! Inbound frame classification and outbound line formatting.

/// Reply to every keepalive probe.
pub const KEEPALIVE_REPLY: &str = "PONG :tmi.twitch.tv";

const PRIVMSG_MARKER: &str = " PRIVMSG ";

/// One inbound protocol line, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Server keepalive probe
    Ping,
    /// A chat message in a channel
    PrivMsg {
        /// Nick of the author
        sender: String,
        /// Channel name without the leading `#`
        channel: String,
        /// Raw message text
        text: String,
    },
    /// Anything else (numerics, JOIN echoes, capability acks)
    Other,
}

/// Classify a line with its terminator already removed.
///
/// Accepts an optional IRCv3 `@tags` segment in front of the prefix. A
/// `PRIVMSG` line without a `:` introducing the text is not a chat message.
///
/// # Examples
///
/// ```
/// use rankbot_social::irc::{Frame, parse_frame};
///
/// let frame = parse_frame(":bob!bob@bob.tmi.twitch.tv PRIVMSG #chan :!rank");
/// assert_eq!(
///     frame,
///     Frame::PrivMsg {
///         sender: "bob".into(),
///         channel: "chan".into(),
///         text: "!rank".into(),
///     }
/// );
/// assert_eq!(parse_frame("PING :tmi.twitch.tv"), Frame::Ping);
/// ```
pub fn parse_frame(line: &str) -> Frame {
    if line.starts_with("PING") {
        return Frame::Ping;
    }

    let line = match line.strip_prefix('@') {
        Some(tagged) => match tagged.split_once(' ') {
            Some((_, rest)) => rest,
            None => return Frame::Other,
        },
        None => line,
    };

    let Some(marker) = line.find(PRIVMSG_MARKER) else {
        return Frame::Other;
    };
    let prefix = line[..marker].trim_start_matches(':');
    let params = &line[marker + PRIVMSG_MARKER.len()..];

    let Some(colon) = params.find(':') else {
        return Frame::Other;
    };
    let sender = prefix.split('!').next().unwrap_or(prefix);
    let channel = params[..colon].trim().trim_start_matches('#');

    Frame::PrivMsg {
        sender: sender.to_string(),
        channel: channel.to_string(),
        text: params[colon + 1..].to_string(),
    }
}

/// Format `<command> <params> :<trailing>` with the CRLF terminator.
///
/// Line breaks inside `trailing` are flattened so a reply can never smuggle
/// a second command onto the wire.
pub fn format_line(command: &str, params: &str, trailing: &str) -> String {
    let trailing: String = trailing
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();
    if params.is_empty() {
        format!("{} :{}\r\n", command, trailing)
    } else {
        format!("{} {} :{}\r\n", command, params, trailing)
    }
}

/// A channel message line.
pub fn privmsg(channel: &str, text: &str) -> String {
    format_line("PRIVMSG", &format!("#{}", channel), text)
}

/// The keepalive reply line.
pub fn pong() -> String {
    format!("{}\r\n", KEEPALIVE_REPLY)
}
