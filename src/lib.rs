//! # pgquest - a text adventure served over the PostgreSQL wire protocol
//!
//! Connect with any PostgreSQL client (`psql "host=localhost sslmode=require"`)
//! and every query you type becomes a game command. Narration comes back as
//! notices, so `psql` prints it inline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pgquest::config::Config;
//! use pgquest::server::GameServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     GameServer::new(config).run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - world model, items, inventory and command handling
//! - [`worlds`] - playable world content
//! - [`pgwire`] - PostgreSQL protocol framing, TLS and startup
//! - [`server`] - listener, per-connection sessions and query dispatch
//! - [`config`] - TOML configuration
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │     server      │ ← accept, probes, dispatch
//! └─────────────────┘
//!     │         │
//! ┌────────┐ ┌────────┐
//! │ pgwire │ │  game  │ ← world state, verbs
//! └────────┘ └────────┘
//!                │
//!           ┌────────┐
//!           │ worlds │ ← locations and puzzles
//!           └────────┘
//! ```

pub mod config;
pub mod game;
pub mod logutil;
pub mod metrics;
pub mod pgwire;
pub mod server;
pub mod worlds;
