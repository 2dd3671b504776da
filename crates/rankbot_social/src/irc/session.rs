//! Connection and login handshake.

use super::FrameReader;
use rankbot_error::{TransportError, TransportErrorKind};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tracing::{debug, info, instrument};

/// Plain-text Twitch chat endpoint.
pub const TWITCH_IRC_ADDR: &str = "irc.chat.twitch.tv:6667";

/// Credentials and target channel for the handshake.
#[derive(Clone)]
pub struct IrcLogin {
    nick: String,
    password: String,
    channel: String,
}

impl IrcLogin {
    /// Build a login. A password without the `oauth:` scheme gets it
    /// prepended; a leading `#` on the channel is dropped.
    pub fn new(
        nick: impl Into<String>,
        password: impl AsRef<str>,
        channel: impl AsRef<str>,
    ) -> Self {
        let password = password.as_ref();
        let password = if password.starts_with("oauth:") {
            password.to_string()
        } else {
            format!("oauth:{}", password)
        };
        Self {
            nick: nick.into().to_lowercase(),
            password,
            channel: channel.as_ref().trim_start_matches('#').to_lowercase(),
        }
    }

    /// Bot nick.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Channel name without `#`.
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl std::fmt::Debug for IrcLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrcLogin")
            .field("nick", &self.nick)
            .field("password", &"<redacted>")
            .field("channel", &self.channel)
            .finish()
    }
}

/// An open, logged-in chat connection.
#[derive(Debug)]
pub struct IrcConnection {
    /// Inbound frames
    pub reader: FrameReader<BufReader<OwnedReadHalf>>,
    /// Outbound lines
    pub writer: OwnedWriteHalf,
}

/// Send `PASS`, `NICK`, and `JOIN` over `writer`.
#[instrument(skip(writer, login), fields(nick = %login.nick, channel = %login.channel))]
pub async fn login<W>(writer: &mut W, login: &IrcLogin) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let handshake = format!(
        "PASS {}\r\nNICK {}\r\nJOIN #{}\r\n",
        login.password, login.nick, login.channel
    );
    writer
        .write_all(handshake.as_bytes())
        .await
        .map_err(|e| TransportError::new(TransportErrorKind::Write(e.to_string())))?;
    writer
        .flush()
        .await
        .map_err(|e| TransportError::new(TransportErrorKind::Write(e.to_string())))?;
    debug!("Handshake sent");
    Ok(())
}

/// Open a TCP connection to `addr` and log in. Inbound lines longer than
/// `max_frame_len` bytes are dropped.
#[instrument(skip(credentials), fields(nick = %credentials.nick))]
pub async fn connect(
    addr: &str,
    credentials: &IrcLogin,
    max_frame_len: usize,
) -> Result<IrcConnection, TransportError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| TransportError::new(TransportErrorKind::Connect(format!("{}: {}", addr, e))))?;
    let (read_half, mut write_half) = stream.into_split();

    login(&mut write_half, credentials).await?;
    info!(channel = %credentials.channel, "Connected to Twitch chat");

    Ok(IrcConnection {
        reader: FrameReader::with_max_len(BufReader::new(read_half), max_frame_len),
        writer: write_half,
    })
}
