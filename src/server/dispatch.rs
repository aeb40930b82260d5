//! The per-connection message loop that runs once the handshake is done.

use std::time::Duration;

use log::{debug, info};
use tokio::io::{AsyncRead, AsyncWrite};

use super::probe;
use super::session::{GameSession, Step};
use crate::logutil::escape_log;
use crate::metrics;
use crate::pgwire::messages::SQLSTATE_ADMIN_SHUTDOWN;
use crate::pgwire::{BackendMessage, ErrorFields, FrameReader, FrameWriter, FrontendMessage, WireError};

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub server_version: String,
    pub idle_timeout: Option<Duration>,
    pub banner_on_connect: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            server_version: "16.8".to_string(),
            idle_timeout: None,
            banner_on_connect: true,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Peer closed the stream between frames.
    Disconnected,
    /// Peer sent Terminate.
    Terminated,
    GameOver,
    Quit,
    IdleTimeout,
}

/// Strip line breaks and statement terminators a SQL client adds to typed text.
pub fn clean_command(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | ';'))
        .collect();
    kept.trim().to_string()
}

fn narration(lines: Vec<String>) -> impl Iterator<Item = BackendMessage> {
    lines.into_iter().map(BackendMessage::Notice)
}

/// Serve queries until the peer leaves, the game ends or the idle timeout fires.
pub async fn run_session<R, W>(
    reader: &mut FrameReader<R>,
    writer: &mut FrameWriter<W>,
    session: &mut GameSession,
    settings: &DispatchSettings,
    peer: &str,
) -> Result<SessionEnd, WireError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if settings.banner_on_connect {
        for msg in narration(session.banner()) {
            writer.queue(&msg);
        }
        writer.queue(&BackendMessage::ReadyForQuery);
        writer.flush().await?;
    }

    loop {
        let next = match settings.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, reader.read_message()).await {
                Ok(res) => res?,
                Err(_) => {
                    info!("{}: idle for {:?}, closing", peer, limit);
                    return Ok(SessionEnd::IdleTimeout);
                }
            },
            None => reader.read_message().await?,
        };

        let query = match next {
            None => return Ok(SessionEnd::Disconnected),
            Some(FrontendMessage::Terminate) => return Ok(SessionEnd::Terminated),
            Some(FrontendMessage::Sync) => {
                writer.send(&BackendMessage::ReadyForQuery).await?;
                continue;
            }
            Some(FrontendMessage::Other(tag)) => {
                debug!("{}: ignoring frame '{}'", peer, tag as char);
                continue;
            }
            Some(FrontendMessage::Query(text)) => text,
        };

        if let Some(kind) = probe::classify(&query) {
            debug!("{}: probe {:?}: {}", peer, kind, escape_log(&query));
            metrics::inc_probes();
            writer.queue_all(&probe::reply(kind, &settings.server_version));
            writer.flush().await?;
            continue;
        }

        let line = clean_command(&query);
        if line.is_empty() && !session.is_awaiting_label() {
            writer.queue(&BackendMessage::EmptyQueryResponse);
            writer.queue(&BackendMessage::ReadyForQuery);
            writer.flush().await?;
            continue;
        }

        debug!("{}: command '{}'", peer, escape_log(&line));
        metrics::inc_commands();
        let mut lines: Vec<String> = Vec::new();
        let step = session.handle_line(&line, &mut lines);
        for msg in narration(lines) {
            writer.queue(&msg);
        }

        match step {
            Step::Continue => {
                writer.queue(&BackendMessage::ReadyForQuery);
                writer.flush().await?;
            }
            Step::GameOver => {
                metrics::inc_deaths();
                writer.queue(&BackendMessage::Error(ErrorFields::fatal(
                    SQLSTATE_ADMIN_SHUTDOWN,
                    "game over",
                )));
                writer.flush().await?;
                return Ok(SessionEnd::GameOver);
            }
            Step::Quit => {
                writer.queue(&BackendMessage::Error(ErrorFields::fatal(
                    SQLSTATE_ADMIN_SHUTDOWN,
                    "session ended by player",
                )));
                writer.flush().await?;
                return Ok(SessionEnd::Quit);
            }
        }
    }
}
