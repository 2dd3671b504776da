//! Twitch IRC plumbing.
//!
//! Only the slice of IRC the bot needs: keepalive probes, channel messages,
//! and the `PASS`/`NICK`/`JOIN` handshake. Everything else is ignored.

mod frame;
mod reader;
mod session;

pub use frame::{Frame, KEEPALIVE_REPLY, format_line, parse_frame, pong, privmsg};
pub use reader::{DEFAULT_MAX_FRAME_LEN, FrameReader};
pub use session::{IrcConnection, IrcLogin, TWITCH_IRC_ADDR, connect, login};
