// Twitch chat client — plain IRC over TCP.
//
// A thin line-oriented wrapper: log in, join one channel, then yield
// parsed PRIVMSG lines one at a time. PING/PONG keepalive is answered
// internally so callers only ever see chat messages. The parser must
// tolerate anything the server sends — unknown or malformed lines are
// skipped, never fatal.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info};

use super::auth::ChatAuth;

/// Twitch IRC ingress, unencrypted port.
pub const TWITCH_IRC_ADDR: &str = "irc.chat.twitch.tv:6667";

/// One chat message, ready for the aggregation core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Sender's login name, taken from the IRC prefix.
    pub sender: String,
    pub text: String,
}

/// A connected, joined chat session.
pub struct ChatClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    channel: String,
}

impl ChatClient {
    /// Connect, authenticate, and join `channel`.
    pub async fn connect(channel: &str, auth: &ChatAuth) -> Result<Self> {
        let stream = TcpStream::connect(TWITCH_IRC_ADDR)
            .await
            .with_context(|| format!("Failed to connect to {TWITCH_IRC_ADDR}"))?;
        let (read_half, write_half) = stream.into_split();

        let mut client = Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            channel: channel.to_lowercase(),
        };

        match auth {
            ChatAuth::Token { username, token } => {
                client.send_raw(&format!("PASS oauth:{token}")).await?;
                client.send_raw(&format!("NICK {username}")).await?;
            }
            ChatAuth::Anonymous => {
                client.send_raw(&format!("NICK {}", anonymous_nick())).await?;
            }
        }

        let join = format!("JOIN #{}", client.channel);
        client.send_raw(&join).await?;
        info!(channel = %client.channel, "Joined channel");

        Ok(client)
    }

    /// Read until the next chat message.
    ///
    /// PINGs are answered transparently and non-PRIVMSG traffic (numerics,
    /// JOIN/PART echoes, notices) is skipped. Returns `Ok(None)` once the
    /// server closes the connection.
    pub async fn next_message(&mut self) -> Result<Option<ChatMessage>> {
        loop {
            let mut line = String::new();
            let bytes = self
                .reader
                .read_line(&mut line)
                .await
                .context("Failed to read from chat connection")?;
            if bytes == 0 {
                return Ok(None);
            }

            let line = line.trim_end_matches(['\r', '\n']);

            if let Some(payload) = line.strip_prefix("PING") {
                let pong = format!("PONG{payload}");
                self.send_raw(&pong).await?;
                continue;
            }

            if let Some(message) = parse_privmsg(line) {
                return Ok(Some(message));
            }

            debug!(line, "Ignoring server line");
        }
    }

    /// Politely end the session. Errors are irrelevant at this point —
    /// the process is shutting down either way.
    pub async fn quit(mut self) {
        let _ = self.send_raw("QUIT").await;
    }

    async fn send_raw(&mut self, command: &str) -> Result<()> {
        self.writer
            .write_all(command.as_bytes())
            .await
            .context("Failed to write to chat connection")?;
        self.writer
            .write_all(b"\r\n")
            .await
            .context("Failed to write to chat connection")
    }
}

/// Read-only nick from the justinfan family Twitch reserves for
/// anonymous clients. Derived from the process id so concurrent local
/// runs don't collide.
fn anonymous_nick() -> String {
    format!("justinfan{}", 10_000 + std::process::id() % 80_000)
}

/// Extract sender and text from a PRIVMSG line, if that's what it is.
///
/// Handles the general shape `[@tags ]:nick!user@host PRIVMSG #chan :text`.
/// Anything that doesn't parse cleanly is treated as not-a-message.
fn parse_privmsg(line: &str) -> Option<ChatMessage> {
    // IRCv3 tag section, present if tag capabilities were negotiated
    let line = match line.strip_prefix('@') {
        Some(tagged) => tagged.split_once(' ')?.1,
        None => line,
    };

    let rest = line.strip_prefix(':')?;
    let (prefix, rest) = rest.split_once(' ')?;
    let (command, params) = rest.split_once(' ')?;
    if command != "PRIVMSG" {
        return None;
    }

    // Prefix is nick!user@host; the nick is the login name
    let sender = prefix.split('!').next()?.to_string();
    if sender.is_empty() {
        return None;
    }

    let (_target, text) = params.split_once(" :")?;
    Some(ChatMessage {
        sender,
        text: text.to_string(),
    })
}
