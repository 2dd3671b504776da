//! The dispatch loop.

use crate::irc::{self, Frame, FrameReader, IrcConnection};
use crate::{CommandRegistry, RemoteOperations};
use rankbot_core::{CommandKind, normalize};
use rankbot_error::{TransportError, TransportErrorKind};
use rankbot_rate_limit::{CooldownStatus, CooldownTable};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// What the dispatcher did with one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Answered a keepalive probe
    Keepalive,
    /// Not a chat message
    Ignored,
    /// A chat message that matches no command
    UnknownCommand,
    /// A command suppressed by its cooldown
    CoolingDown,
    /// A command that produced a reply
    Replied,
}

/// Single owner of the chat connection and the cooldown table.
///
/// Frames are handled strictly one at a time: a slow remote operation holds
/// up the frames behind it, which keeps cooldown bookkeeping free of locks.
pub struct Dispatcher<R, W> {
    reader: FrameReader<R>,
    writer: W,
    channel: String,
    registry: CommandRegistry,
    cooldowns: CooldownTable,
    operations: Arc<dyn RemoteOperations>,
}

impl Dispatcher<BufReader<OwnedReadHalf>, OwnedWriteHalf> {
    /// Dispatch over a logged-in TCP connection.
    pub fn new(
        connection: IrcConnection,
        channel: impl Into<String>,
        registry: CommandRegistry,
        operations: Arc<dyn RemoteOperations>,
    ) -> Self {
        Self::from_parts(
            connection.reader,
            connection.writer,
            channel,
            registry,
            operations,
        )
    }
}

impl<R, W> Dispatcher<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Dispatch over any reader and writer pair.
    pub fn from_parts(
        reader: FrameReader<R>,
        writer: W,
        channel: impl Into<String>,
        registry: CommandRegistry,
        operations: Arc<dyn RemoteOperations>,
    ) -> Self {
        Self {
            reader,
            writer,
            channel: channel.into(),
            registry,
            operations,
            cooldowns: CooldownTable::new(),
        }
    }

    /// Process frames until the transport fails or closes.
    ///
    /// Only ever returns with an error; the caller treats it as fatal.
    #[instrument(skip(self), fields(channel = %self.channel, commands = self.registry.len()))]
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!("Dispatch loop started");
        loop {
            let line = self.reader.next_frame().await?;
            self.handle_frame(&line).await?;
        }
    }

    /// Handle one frame, writing at most one line.
    pub async fn handle_frame(&mut self, line: &str) -> Result<DispatchOutcome, TransportError> {
        match irc::parse_frame(line) {
            Frame::Ping => {
                self.write(&irc::pong()).await?;
                debug!("Answered keepalive");
                Ok(DispatchOutcome::Keepalive)
            }
            Frame::PrivMsg { sender, text, .. } => self.handle_message(&sender, &text).await,
            Frame::Other => Ok(DispatchOutcome::Ignored),
        }
    }

    async fn handle_message(
        &mut self,
        sender: &str,
        text: &str,
    ) -> Result<DispatchOutcome, TransportError> {
        let token = normalize(text);
        let Some(spec) = self.registry.get(&token) else {
            debug!(sender, text, "No command for message");
            return Ok(DispatchOutcome::UnknownCommand);
        };
        let spec = spec.clone();

        let now = Instant::now();
        if let CooldownStatus::Cooling { .. } = self.cooldowns.check(&token, *spec.cooldown(), now) {
            return Ok(DispatchOutcome::CoolingDown);
        }

        let reply = match spec.kind() {
            CommandKind::Static { response } => response.clone(),
            CommandKind::Remote { operation } => match self.operations.run(*operation).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(token = %token, operation = %operation, error = %e.source, "Remote operation failed");
                    e.phrase.to_string()
                }
            },
        };

        self.cooldowns.record(&token, Instant::now());
        info!(sender, token = %token, "Dispatched command");

        let line = irc::privmsg(&self.channel, &format!("@{} {}", sender, reply));
        self.write(&line).await?;
        Ok(DispatchOutcome::Replied)
    }

    async fn write(&mut self, line: &str) -> Result<(), TransportError> {
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| TransportError::new(TransportErrorKind::Write(e.to_string())))?;
        self.writer
            .flush()
            .await
            .map_err(|e| TransportError::new(TransportErrorKind::Write(e.to_string())))
    }

    /// The cooldown table, for inspection.
    pub fn cooldowns(&self) -> &CooldownTable {
        &self.cooldowns
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Mutable access to the underlying writer.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}
