//! Just enough of the PostgreSQL v3 frontend/backend protocol to carry a game.
//!
//! - [`messages`] - frame types and their byte layout
//! - [`codec`] - buffered frame reader/writer over any async stream
//! - [`tls`] - per-connection self-signed server identity
//! - [`negotiate`] - SSL upgrade and the startup/authentication exchange
//!
//! Only the simple query flow is understood. Extended-query frames are read and
//! discarded by the caller.

pub mod codec;
pub mod messages;
pub mod negotiate;
pub mod tls;

use thiserror::Error;

pub use codec::{FrameReader, FrameWriter, DEFAULT_MAX_FRAME_LEN};
pub use messages::{
    BackendMessage, ErrorFields, FieldDescription, FrontendMessage, Severity, StartupFrame,
    StartupMessage,
};
pub use negotiate::{accept_ssl_request, complete_startup, ServerParameters};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS error: {0}")]
    Tls(#[from] tokio_rustls::rustls::Error),

    #[error("certificate generation failed: {0}")]
    Certificate(#[from] rcgen::Error),

    /// First frame was something other than an SSLRequest.
    #[error("client did not request SSL")]
    SslRequired,

    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("frame of {len} bytes exceeds limit of {max}")]
    FrameTooLarge { len: usize, max: usize },

    /// Peer closed the stream part way through a frame.
    #[error("connection closed mid-frame")]
    UnexpectedEof,
}

impl WireError {
    pub(crate) fn protocol(msg: impl Into<String>) -> Self {
        WireError::Protocol(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, WireError>;
