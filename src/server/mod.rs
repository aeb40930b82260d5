//! # Game server
//!
//! Accepts TCP connections and gives each one its own task, world and TLS
//! identity. Sessions share nothing but the process-wide [`metrics`](crate::metrics).
//!
//! ```text
//! accept ─▶ SSLRequest ─▶ TLS ─▶ Startup ─▶ banner ─▶ query loop ─▶ close
//! ```
//!
//! - [`probe`] - canned answers to client introspection queries
//! - [`session`] - the [`GameSession`] wrapping one world
//! - [`dispatch`] - the per-connection query loop

pub mod dispatch;
pub mod probe;
pub mod session;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::metrics;
use crate::pgwire::{self, FrameReader, FrameWriter, ServerParameters, WireError};
use crate::worlds::{build_world, WorldKind};

pub use dispatch::{run_session, DispatchSettings, SessionEnd};
pub use session::{GameSession, Step};

/// Everything a connection task needs, shared read-only.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub world: WorldKind,
    pub max_frame_len: usize,
    pub params: ServerParameters,
    pub dispatch: DispatchSettings,
}

impl ConnectionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            world: config.game.world,
            max_frame_len: config.server.max_frame_len,
            params: ServerParameters::new(config.server.server_version.clone()),
            dispatch: DispatchSettings {
                server_version: config.server.server_version.clone(),
                idle_timeout: config.server.idle_timeout(),
                banner_on_connect: config.game.banner_on_connect,
            },
        }
    }
}

pub struct GameServer {
    config: Config,
    settings: Arc<ConnectionSettings>,
}

impl GameServer {
    pub fn new(config: Config) -> Self {
        let settings = Arc::new(ConnectionSettings::from_config(&config));
        Self { config, settings }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bind the configured address and serve until ctrl-c.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.server.listen_addr)
            .await
            .with_context(|| format!("binding {}", self.config.server.listen_addr))?;
        self.serve(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received shutdown signal");
        })
        .await
    }

    /// Serve connections from `listener` until `shutdown` completes.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let local = listener.local_addr()?;
        info!(
            "pgquest listening on {} (world '{}')",
            local, self.settings.world
        );
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            if let Err(e) = stream.set_nodelay(true) {
                                debug!("{}: set_nodelay failed: {}", peer, e);
                            }
                            let settings = Arc::clone(&self.settings);
                            tasks.spawn(handle_connection(stream, peer, settings));
                        }
                        Err(e) => warn!("accept failed: {}", e),
                    }
                }
                Some(joined) = tasks.join_next() => {
                    if let Err(e) = joined {
                        error!("connection task failed: {}", e);
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        let open = tasks.len();
        if open > 0 {
            info!("closing {} open session(s)", open);
        }
        tasks.shutdown().await;
        let m = metrics::snapshot();
        info!(
            "server stopped: {} sessions served, peak {} concurrent, {} deaths",
            m.sessions_started, m.sessions_peak, m.deaths
        );
        Ok(())
    }
}

async fn handle_connection(
    stream: tokio::net::TcpStream,
    peer: SocketAddr,
    settings: Arc<ConnectionSettings>,
) {
    let peer = peer.to_string();
    info!("{}: connected", peer);
    match serve_connection(stream, &peer, &settings).await {
        Ok(end) => info!("{}: session closed ({:?})", peer, end),
        Err(e) => match e.downcast_ref::<WireError>() {
            Some(WireError::SslRequired) => info!("{}: refused plaintext connection", peer),
            Some(_) => warn!("{}: connection error: {}", peer, e),
            None => error!("{}: {:#}", peer, e),
        },
    }
}

/// Run one connection from SSLRequest to close.
pub async fn serve_connection<S>(
    stream: S,
    peer: &str,
    settings: &ConnectionSettings,
) -> Result<SessionEnd>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let stream = pgwire::accept_ssl_request(stream, settings.max_frame_len).await?;
    let acceptor = pgwire::tls::ephemeral_acceptor()?;
    let tls = acceptor.accept(stream).await.map_err(WireError::from)?;
    debug!("{}: TLS established", peer);

    let (r, w) = tokio::io::split(tls);
    let mut reader = FrameReader::new(r).max_frame_len(settings.max_frame_len);
    let mut writer = FrameWriter::new(w);
    pgwire::complete_startup(&mut reader, &mut writer, &settings.params).await?;

    let world = build_world(settings.world)?;
    let mut session = GameSession::new(world);

    metrics::record_session_start();
    let result = run_session(
        &mut reader,
        &mut writer,
        &mut session,
        &settings.dispatch,
        peer,
    )
    .await;
    metrics::record_session_end();

    Ok(result?)
}
